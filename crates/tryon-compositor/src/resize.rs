//! Overlay scaling.
//!
//! Uses bilinear (`Triangle`) filtering so upscaled product images stay
//! smooth and alpha edges stay soft.

use std::borrow::Cow;

use image::imageops::{self, FilterType};
use tracing::debug;

use crate::raster::Raster;
use crate::{Result, invalid};

/// Largest scaled overlay, in pixels, that will be allocated (8192 x 8192).
pub const MAX_SCALED_PIXELS: u64 = 1 << 26;

/// Check that `scale` is a usable resize factor.
pub fn validate_scale(scale: f64) -> Result<()> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(invalid(format!("scale must be a positive number, got {scale}")));
    }
    Ok(())
}

/// Size of a `width` x `height` image after multiplying both sides by `scale`.
///
/// Each side is rounded to the nearest pixel and never drops below 1.
/// Sizes above [`MAX_SCALED_PIXELS`] are rejected.
pub fn scaled_size(width: u32, height: u32, scale: f64) -> Result<(u32, u32)> {
    validate_scale(scale)?;
    let (scaled_w, scaled_h) = (scale_side(width, scale)?, scale_side(height, scale)?);
    let pixels = u64::from(scaled_w) * u64::from(scaled_h);
    if pixels > MAX_SCALED_PIXELS {
        return Err(invalid(format!(
            "scaling {width}x{height} by {scale} gives {scaled_w}x{scaled_h}, \
             over the {MAX_SCALED_PIXELS} pixel limit"
        )));
    }
    Ok((scaled_w, scaled_h))
}

fn scale_side(side: u32, scale: f64) -> Result<u32> {
    let scaled = (f64::from(side) * scale).round();
    if scaled > f64::from(u32::MAX) {
        return Err(invalid(format!(
            "scaling {side}px by {scale} exceeds the maximum image size"
        )));
    }
    Ok((scaled as u32).max(1))
}

/// Resize `overlay` to exactly `width` x `height`, keeping its channel layout.
///
/// Returns the overlay borrowed as-is when it already has that size.
pub fn resize_overlay(overlay: &Raster, width: u32, height: u32) -> Cow<'_, Raster> {
    if overlay.dimensions() == (width, height) {
        debug!(width, height, "Overlay already at target size, skipping resize");
        return Cow::Borrowed(overlay);
    }

    debug!(
        orig_w = overlay.width(),
        orig_h = overlay.height(),
        new_width = width,
        new_height = height,
        "Resizing overlay"
    );

    let resized = match overlay {
        Raster::Rgb(img) => Raster::Rgb(imageops::resize(img, width, height, FilterType::Triangle)),
        Raster::Rgba(img) => {
            Raster::Rgba(imageops::resize(img, width, height, FilterType::Triangle))
        }
    };
    Cow::Owned(resized)
}
