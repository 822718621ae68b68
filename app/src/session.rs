//! One try-on: a decoded photo and product image, rendered on demand.
//!
//! Each render is independent; changing the controls and rendering again
//! recomputes the result from the original inputs.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tracing::info;
use tryon_compositor::{Raster, Region, composite, composite_with_region, placement_region};

use crate::codec;
use crate::config::AppConfig;
use crate::controls::Controls;

pub struct TryOnSession {
    base: Raster,
    overlay: Raster,
}

/// Summary of an exported render, printed by `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct RenderReport {
    pub output: PathBuf,
    pub bytes: usize,
    pub width: u32,
    pub height: u32,
    pub overlay_width: u32,
    pub overlay_height: u32,
    pub overlay_has_alpha: bool,
    pub controls: Controls,
    pub affected: AffectedRegion,
}

/// Part of the photo covered by the placed overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AffectedRegion {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl From<Region> for AffectedRegion {
    fn from(region: Region) -> Self {
        Self {
            left: region.left,
            top: region.top,
            width: region.width,
            height: region.height,
        }
    }
}

impl TryOnSession {
    pub fn new(base: Raster, overlay: Raster) -> Self {
        Self { base, overlay }
    }

    /// Decode both images from files.
    pub fn open(base_path: &Path, overlay_path: &Path) -> anyhow::Result<Self> {
        let base = codec::load_base(base_path)
            .with_context(|| format!("Failed to load photo: {}", base_path.display()))?;
        let overlay = codec::load_overlay(overlay_path)
            .with_context(|| format!("Failed to load product image: {}", overlay_path.display()))?;
        Ok(Self::new(base, overlay))
    }

    pub fn base(&self) -> &Raster {
        &self.base
    }

    pub fn overlay(&self) -> &Raster {
        &self.overlay
    }

    /// Controls built from optional user input, clamped to this photo.
    pub fn controls(
        &self,
        config: &AppConfig,
        x: Option<i64>,
        y: Option<i64>,
        scale_percent: Option<u32>,
    ) -> Controls {
        let (width, height) = self.base.dimensions();
        Controls::clamped(width, height, config, x, y, scale_percent)
    }

    pub fn render(&self, controls: &Controls) -> anyhow::Result<Raster> {
        let request = controls.to_placement()?;
        Ok(composite(&self.base, &self.overlay, request)?)
    }

    /// Region of the photo a render with `controls` would modify.
    pub fn affected_region(&self, controls: &Controls) -> anyhow::Result<AffectedRegion> {
        let request = controls.to_placement()?;
        let (width, height) = self.base.dimensions();
        let (overlay_width, overlay_height) = self.overlay.dimensions();
        let region = placement_region(width, height, overlay_width, overlay_height, &request)?;
        Ok(region.into())
    }

    /// Render and write the result to `output`: PNG when it ends in
    /// `.png`, JPEG at `quality` otherwise.
    pub fn export(
        &self,
        controls: &Controls,
        output: &Path,
        quality: u8,
    ) -> anyhow::Result<RenderReport> {
        let request = controls.to_placement()?;
        let (result, region) = composite_with_region(&self.base, &self.overlay, request)?;
        let encoded = codec::encode_for_path(&result, output, quality)?;
        std::fs::write(output, &encoded)
            .with_context(|| format!("Failed to save result: {}", output.display()))?;

        info!(
            path = %output.display(),
            bytes = encoded.len(),
            x = controls.x,
            y = controls.y,
            scale_percent = controls.scale_percent,
            "Exported try-on result"
        );

        Ok(RenderReport {
            output: output.to_path_buf(),
            bytes: encoded.len(),
            width: result.width(),
            height: result.height(),
            overlay_width: self.overlay.width(),
            overlay_height: self.overlay.height(),
            overlay_has_alpha: self.overlay.has_alpha(),
            controls: *controls,
            affected: region.into(),
        })
    }
}
