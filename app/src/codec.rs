//! Decoding uploaded photos/product images and encoding try-on results.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use tracing::debug;
use tryon_compositor::{CompositeError, Raster};

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported image: {0}")]
    Unsupported(#[from] CompositeError),
}

/// Decode the user's photo. Always yields 3-channel color; any alpha is dropped.
pub fn decode_base(bytes: &[u8]) -> Result<Raster, CodecError> {
    let img = image::load_from_memory(bytes).map_err(CodecError::Decode)?;
    debug!(width = img.width(), height = img.height(), color = ?img.color(), "Decoded base image");
    Ok(Raster::Rgb(img.into_rgb8()))
}

/// Decode the product image, keeping its alpha channel if it has one.
///
/// Grayscale images are promoted to RGB (or RGBA when they carry alpha).
pub fn decode_overlay(bytes: &[u8]) -> Result<Raster, CodecError> {
    let img = image::load_from_memory(bytes).map_err(CodecError::Decode)?;
    let color = img.color();
    debug!(width = img.width(), height = img.height(), ?color, "Decoded overlay image");

    let img = if color.has_color() {
        img
    } else if color.has_alpha() {
        DynamicImage::ImageRgba8(img.into_rgba8())
    } else {
        DynamicImage::ImageRgb8(img.into_rgb8())
    };
    Ok(Raster::try_from(img)?)
}

pub fn load_base(path: &Path) -> Result<Raster, CodecError> {
    decode_base(&std::fs::read(path)?)
}

pub fn load_overlay(path: &Path) -> Result<Raster, CodecError> {
    decode_overlay(&std::fs::read(path)?)
}

/// Encode as baseline JPEG. RGBA rasters are flattened by dropping alpha.
pub fn encode_jpeg(raster: &Raster, quality: u8) -> Result<Vec<u8>, CodecError> {
    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
    let encoded = match raster {
        Raster::Rgb(img) => encoder.encode_image(img),
        Raster::Rgba(img) => {
            encoder.encode_image(&DynamicImage::ImageRgba8(img.clone()).into_rgb8())
        }
    };
    encoded.map_err(CodecError::Encode)?;
    debug!(bytes = buf.len(), quality, "Encoded JPEG");
    Ok(buf)
}

/// Encode for `path`: PNG for a `.png` extension (any case), JPEG otherwise.
pub fn encode_for_path(raster: &Raster, path: &Path, quality: u8) -> Result<Vec<u8>, CodecError> {
    let is_png = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if is_png {
        encode_png(raster)
    } else {
        encode_jpeg(raster, quality)
    }
}

/// Encode as PNG, keeping alpha if present.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>, CodecError> {
    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::from(raster.clone())
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(CodecError::Encode)?;
    Ok(cursor.into_inner())
}
