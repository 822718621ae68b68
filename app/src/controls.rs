//! User placement controls: overlay center and scale percentage.
//!
//! Values are kept inside the same ranges the upload page's sliders
//! allowed: `x` in `[0, width]`, `y` in `[0, height]` and the scale within
//! the configured percent bounds.

use serde::Serialize;
use tracing::warn;
use tryon_compositor::{CompositeError, PlacementRequest};

use crate::config::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub x: u32,
    pub y: u32,
    pub scale_percent: u32,
}

impl Controls {
    /// Overlay centered on the base at the configured default scale.
    pub fn centered(base_width: u32, base_height: u32, config: &AppConfig) -> Self {
        Self {
            x: base_width / 2,
            y: base_height / 2,
            scale_percent: config.default_scale_percent,
        }
    }

    /// Build controls from optional user input, clamping each value into
    /// its slider range. Missing values take their centered defaults.
    pub fn clamped(
        base_width: u32,
        base_height: u32,
        config: &AppConfig,
        x: Option<i64>,
        y: Option<i64>,
        scale_percent: Option<u32>,
    ) -> Self {
        let defaults = Self::centered(base_width, base_height, config);
        Self {
            x: x.map_or(defaults.x, |v| clamp_offset("x", v, base_width)),
            y: y.map_or(defaults.y, |v| clamp_offset("y", v, base_height)),
            scale_percent: scale_percent.map_or(defaults.scale_percent, |v| {
                let clamped = v.clamp(config.scale_min_percent, config.scale_max_percent);
                if clamped != v {
                    warn!(
                        requested = v,
                        clamped,
                        min = config.scale_min_percent,
                        max = config.scale_max_percent,
                        "Scale out of range, clamping"
                    );
                }
                clamped
            }),
        }
    }

    /// Multiplicative scale factor (`scale_percent / 100`).
    pub fn scale_factor(&self) -> f64 {
        f64::from(self.scale_percent) / 100.0
    }

    pub fn to_placement(&self) -> Result<PlacementRequest, CompositeError> {
        PlacementRequest::new(i64::from(self.x), i64::from(self.y), self.scale_factor())
    }
}

fn clamp_offset(axis: &str, value: i64, limit: u32) -> u32 {
    let clamped = value.clamp(0, i64::from(limit));
    if clamped != value {
        warn!(axis, requested = value, clamped, limit, "Offset out of range, clamping");
    }
    clamped as u32
}
