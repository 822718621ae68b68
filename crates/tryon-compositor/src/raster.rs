//! In-memory pixel grids with either 3 (RGB) or 4 (RGBA) channels.

use image::{ColorType, DynamicImage, RgbImage, RgbaImage};

use crate::{Result, invalid};

/// A decoded image. Channel order is always RGB(A).
#[derive(Debug, Clone, PartialEq)]
pub enum Raster {
    /// Opaque color.
    Rgb(RgbImage),
    /// Color plus a per-pixel alpha weight (0 = transparent, 255 = opaque).
    Rgba(RgbaImage),
}

impl Raster {
    /// Build a raster from a tightly packed, row-major byte buffer.
    ///
    /// Rejects zero-sized grids, channel counts other than 3 or 4, and
    /// buffers whose length does not match `width * height * channels`.
    pub fn from_raw(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(invalid(format!("raster must not be empty, got {width}x{height}")));
        }
        if channels != 3 && channels != 4 {
            return Err(invalid(format!(
                "unsupported channel count {channels}, expected 3 or 4"
            )));
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(usize::from(channels)))
            .ok_or_else(|| invalid(format!("raster {width}x{height} is too large")))?;
        if data.len() != expected {
            return Err(invalid(format!(
                "pixel buffer holds {} bytes, expected {expected} for {width}x{height}x{channels}",
                data.len()
            )));
        }

        let raster = if channels == 3 {
            RgbImage::from_raw(width, height, data).map(Raster::Rgb)
        } else {
            RgbaImage::from_raw(width, height, data).map(Raster::Rgba)
        };
        raster.ok_or_else(|| invalid("pixel buffer does not match raster dimensions"))
    }

    pub fn width(&self) -> u32 {
        match self {
            Raster::Rgb(img) => img.width(),
            Raster::Rgba(img) => img.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Raster::Rgb(img) => img.height(),
            Raster::Rgba(img) => img.height(),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn channels(&self) -> u8 {
        match self {
            Raster::Rgb(_) => 3,
            Raster::Rgba(_) => 4,
        }
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self, Raster::Rgba(_))
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Raw row-major pixel bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Raster::Rgb(img) => img.as_raw(),
            Raster::Rgba(img) => img.as_raw(),
        }
    }
}

impl From<RgbImage> for Raster {
    fn from(img: RgbImage) -> Self {
        Raster::Rgb(img)
    }
}

impl From<RgbaImage> for Raster {
    fn from(img: RgbaImage) -> Self {
        Raster::Rgba(img)
    }
}

impl TryFrom<DynamicImage> for Raster {
    type Error = crate::CompositeError;

    /// Accepts RGB and RGBA images of any bit depth (narrowed to 8 bits).
    /// Luma images are rejected rather than guessing their channel meaning.
    fn try_from(img: DynamicImage) -> Result<Self> {
        match img.color() {
            ColorType::Rgb8 | ColorType::Rgb16 | ColorType::Rgb32F => Ok(Raster::Rgb(img.into_rgb8())),
            ColorType::Rgba8 | ColorType::Rgba16 | ColorType::Rgba32F => {
                Ok(Raster::Rgba(img.into_rgba8()))
            }
            other => Err(invalid(format!(
                "unsupported color type {other:?}, expected RGB or RGBA"
            ))),
        }
    }
}

impl From<Raster> for DynamicImage {
    fn from(raster: Raster) -> Self {
        match raster {
            Raster::Rgb(img) => DynamicImage::ImageRgb8(img),
            Raster::Rgba(img) => DynamicImage::ImageRgba8(img),
        }
    }
}
