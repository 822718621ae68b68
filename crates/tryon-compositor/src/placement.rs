//! Placement geometry: where the scaled overlay lands and what part of it
//! overlaps the base image.

use crate::Result;
use crate::resize::{scaled_size, validate_scale};

/// Where to center the overlay on the base and how much to resize it.
///
/// Offsets are in base pixel coordinates and may fall outside the base;
/// whatever does not overlap is clipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRequest {
    pub x: i64,
    pub y: i64,
    pub scale: f64,
}

impl PlacementRequest {
    /// Create a request, rejecting non-positive or non-finite scales.
    pub fn new(x: i64, y: i64, scale: f64) -> Result<Self> {
        validate_scale(scale)?;
        Ok(Self { x, y, scale })
    }
}

/// Axis-aligned rectangle in base coordinates. Empty when either side is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.left
            && y >= self.top
            && u64::from(x) < u64::from(self.left) + u64::from(self.width)
            && u64::from(y) < u64::from(self.top) + u64::from(self.height)
    }
}

/// Unclipped rectangle covered by an overlay of `width` x `height` centered
/// at (`x`, `y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Footprint {
    pub left: i64,
    pub top: i64,
    pub width: u32,
    pub height: u32,
}

impl Footprint {
    pub fn centered(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            left: x.saturating_sub(i64::from(width / 2)),
            top: y.saturating_sub(i64::from(height / 2)),
            width,
            height,
        }
    }

    /// Intersect with `[0, base_width) x [0, base_height)`.
    pub fn clip(&self, base_width: u32, base_height: u32) -> Region {
        let (left, width) = clip_span(self.left, self.width, base_width);
        let (top, height) = clip_span(self.top, self.height, base_height);
        if width == 0 || height == 0 {
            return Region::default();
        }
        Region {
            left,
            top,
            width,
            height,
        }
    }
}

/// Clip the span `[start, start + len)` to `[0, limit)`.
fn clip_span(start: i64, len: u32, limit: u32) -> (u32, u32) {
    let lo = start.clamp(0, i64::from(limit));
    let hi = start.saturating_add(i64::from(len)).clamp(0, i64::from(limit));
    if hi <= lo {
        return (0, 0);
    }
    (lo as u32, (hi - lo) as u32)
}

/// Region of a `base_width` x `base_height` image that compositing an
/// `overlay_width` x `overlay_height` overlay with `request` would touch.
pub fn placement_region(
    base_width: u32,
    base_height: u32,
    overlay_width: u32,
    overlay_height: u32,
    request: &PlacementRequest,
) -> Result<Region> {
    let (width, height) = scaled_size(overlay_width, overlay_height, request.scale)?;
    Ok(Footprint::centered(request.x, request.y, width, height).clip(base_width, base_height))
}
