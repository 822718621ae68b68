//! Image composition: place a scaled overlay over a base image.

use image::{Rgb, RgbImage, Rgba};
use tracing::debug;

use crate::placement::{Footprint, PlacementRequest, Region};
use crate::raster::Raster;
use crate::resize::{resize_overlay, scaled_size};
use crate::{Result, invalid};

/// Composite `overlay` onto a copy of `base`.
///
/// The overlay is resized by `request.scale` and centered at
/// (`request.x`, `request.y`). Where it overlaps the base, RGBA overlays are
/// alpha-blended and RGB overlays replace the base pixels outright. Parts of
/// the overlay outside the base are clipped; if nothing overlaps, the result
/// is an unmodified copy of `base`.
///
/// `base` must be RGB. All argument checks happen before the output is
/// allocated, and neither input is modified.
pub fn composite(base: &Raster, overlay: &Raster, request: PlacementRequest) -> Result<Raster> {
    composite_with_region(base, overlay, request).map(|(raster, _)| raster)
}

/// Like [`composite`], also returning the region of the base that was covered.
pub fn composite_with_region(
    base: &Raster,
    overlay: &Raster,
    request: PlacementRequest,
) -> Result<(Raster, Region)> {
    let Raster::Rgb(base_img) = base else {
        return Err(invalid(format!(
            "base image must have 3 channels, got {}",
            base.channels()
        )));
    };
    if base.is_empty() {
        return Err(invalid("base image is empty"));
    }
    if overlay.is_empty() {
        return Err(invalid("overlay image is empty"));
    }

    let (scaled_w, scaled_h) = scaled_size(overlay.width(), overlay.height(), request.scale)?;
    let footprint = Footprint::centered(request.x, request.y, scaled_w, scaled_h);
    let region = footprint.clip(base_img.width(), base_img.height());

    debug!(
        x = request.x,
        y = request.y,
        scale = request.scale,
        scaled_w,
        scaled_h,
        ?region,
        "Compositing overlay"
    );

    let mut output = base_img.clone();
    if region.is_empty() {
        debug!("Overlay does not intersect the base, returning it unchanged");
        return Ok((Raster::Rgb(output), region));
    }

    let scaled = resize_overlay(overlay, scaled_w, scaled_h);
    // Offset of the region's top-left corner inside the scaled overlay
    let src_x = (i64::from(region.left) - footprint.left) as u32;
    let src_y = (i64::from(region.top) - footprint.top) as u32;

    match &*scaled {
        Raster::Rgba(top) => {
            for_each_in(&mut output, region, |out, dx, dy| {
                let pixel = top.get_pixel(src_x + dx, src_y + dy);
                *out = blend_pixel(out, pixel);
            });
        }
        Raster::Rgb(top) => {
            for_each_in(&mut output, region, |out, dx, dy| {
                *out = *top.get_pixel(src_x + dx, src_y + dy);
            });
        }
    }

    Ok((Raster::Rgb(output), region))
}

/// Visit every pixel of `region`, passing its offset relative to the region.
fn for_each_in(img: &mut RgbImage, region: Region, mut f: impl FnMut(&mut Rgb<u8>, u32, u32)) {
    for dy in 0..region.height {
        for dx in 0..region.width {
            f(img.get_pixel_mut(region.left + dx, region.top + dy), dx, dy);
        }
    }
}

/// `bg * (1 - a) + fg * a` with `a = alpha / 255`, rounded to nearest.
///
/// Alpha 0 yields `bg` exactly and alpha 255 yields the foreground color.
fn blend_pixel(bg: &Rgb<u8>, fg: &Rgba<u8>) -> Rgb<u8> {
    let alpha = u32::from(fg[3]);
    let inv = 255 - alpha;
    let mix = |b: u8, f: u8| ((u32::from(b) * inv + u32::from(f) * alpha + 127) / 255) as u8;
    Rgb([mix(bg[0], fg[0]), mix(bg[1], fg[1]), mix(bg[2], fg[2])])
}
