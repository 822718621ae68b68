//! End-to-end compositing scenarios and whole-image properties.

use image::{Rgb, RgbImage, Rgba, RgbaImage};

use crate::{CompositeError, PlacementRequest, Raster, Region, composite, placement_region};

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

fn black_base(width: u32, height: u32) -> Raster {
    Raster::from(RgbImage::from_pixel(width, height, BLACK))
}

/// Base with a distinct color at every pixel so any stray write shows up.
fn patterned_base(width: u32, height: u32) -> Raster {
    Raster::from(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 7 % 251) as u8, (y * 13 % 241) as u8, ((x + y) % 239) as u8])
    }))
}

fn white_overlay(size: u32, alpha: u8) -> Raster {
    Raster::from(RgbaImage::from_pixel(size, size, Rgba([255, 255, 255, alpha])))
}

fn place(x: i64, y: i64, scale: f64) -> PlacementRequest {
    PlacementRequest::new(x, y, scale).unwrap()
}

fn pixels(raster: &Raster) -> &RgbImage {
    match raster {
        Raster::Rgb(img) => img,
        Raster::Rgba(_) => panic!("compositing must produce an RGB raster"),
    }
}

/// Bounding box of all pixels that differ between `a` and `b`.
fn changed_bounds(a: &Raster, b: &Raster) -> Option<Region> {
    let (a, b) = (pixels(a), pixels(b));
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pa) in a.enumerate_pixels() {
        if pa != b.get_pixel(x, y) {
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
    }
    bounds.map(|(x0, y0, x1, y1)| Region {
        left: x0,
        top: y0,
        width: x1 - x0 + 1,
        height: y1 - y0 + 1,
    })
}

#[test]
fn test_white_square_centered_on_black() {
    let base = black_base(100, 100);
    let result = composite(&base, &white_overlay(20, 255), place(50, 50, 1.0)).unwrap();
    let img = pixels(&result);

    assert_eq!(img.dimensions(), (100, 100));
    for (x, y, p) in img.enumerate_pixels() {
        let inside = (40..60).contains(&x) && (40..60).contains(&y);
        let expected = if inside { WHITE } else { BLACK };
        assert_eq!(*p, expected, "pixel ({x}, {y})");
    }
}

#[test]
fn test_white_square_at_top_left_corner_is_clipped() {
    let base = black_base(100, 100);
    let result = composite(&base, &white_overlay(20, 255), place(0, 0, 1.0)).unwrap();
    let img = pixels(&result);

    for (x, y, p) in img.enumerate_pixels() {
        let inside = x < 10 && y < 10;
        let expected = if inside { WHITE } else { BLACK };
        assert_eq!(*p, expected, "pixel ({x}, {y})");
    }
}

#[test]
fn test_non_positive_scale_is_invalid_argument() {
    let base = black_base(100, 100);
    let overlay = white_overlay(20, 255);
    for scale in [0.0, -1.0, -0.25] {
        let request = PlacementRequest {
            x: 50,
            y: 50,
            scale,
        };
        let err = composite(&base, &overlay, request).unwrap_err();
        assert!(
            matches!(err, CompositeError::InvalidArgument(_)),
            "scale {scale} should be rejected"
        );
    }
    assert!(PlacementRequest::new(50, 50, 0.0).is_err());
}

#[test]
fn test_changes_stay_inside_placement_region() {
    let base = patterned_base(64, 48);
    let overlay = Raster::from(RgbaImage::from_pixel(10, 6, Rgba([0, 0, 0, 200])));
    for (x, y, scale) in [(20, 20, 1.0), (32, 24, 1.5), (50, 10, 0.7), (10, 40, 2.0)] {
        let request = place(x, y, scale);
        let region = placement_region(64, 48, 10, 6, &request).unwrap();
        let result = composite(&base, &overlay, request).unwrap();

        for (px, py, p) in pixels(&result).enumerate_pixels() {
            if !region.contains(px, py) {
                assert_eq!(
                    p,
                    pixels(&base).get_pixel(px, py),
                    "pixel ({px}, {py}) outside {region:?} changed"
                );
            }
        }
    }
}

#[test]
fn test_empty_overlap_returns_base_exactly() {
    let base = patterned_base(30, 20);
    let overlay = white_overlay(8, 255);
    for (x, y) in [(-100, 10), (10, -100), (200, 10), (10, 200), (34, 10), (i64::MAX, i64::MIN)] {
        let result = composite(&base, &overlay, place(x, y, 1.0)).unwrap();
        assert_eq!(result, base, "placement ({x}, {y})");
    }
}

#[test]
fn test_transparent_overlay_leaves_base() {
    let base = patterned_base(40, 40);
    let result = composite(&base, &white_overlay(16, 0), place(20, 20, 1.0)).unwrap();
    assert_eq!(result, base);
}

#[test]
fn test_opaque_overlay_shows_overlay_color() {
    let base = patterned_base(40, 40);
    let overlay = Raster::from(RgbaImage::from_pixel(16, 16, Rgba([12, 34, 56, 255])));
    let result = composite(&base, &overlay, place(20, 20, 1.0)).unwrap();
    let img = pixels(&result);
    for y in 12..28 {
        for x in 12..28 {
            assert_eq!(*img.get_pixel(x, y), Rgb([12, 34, 56]));
        }
    }
}

#[test]
fn test_doubling_scale_doubles_affected_region() {
    let base = black_base(200, 200);
    let overlay = white_overlay(15, 255);

    let small = composite(&base, &overlay, place(100, 100, 2.0)).unwrap();
    let large = composite(&base, &overlay, place(100, 100, 4.0)).unwrap();
    let small = changed_bounds(&base, &small).unwrap();
    let large = changed_bounds(&base, &large).unwrap();

    assert_eq!((small.width, small.height), (30, 30));
    assert!(large.width.abs_diff(small.width * 2) <= 1);
    assert!(large.height.abs_diff(small.height * 2) <= 1);
}

#[test]
fn test_inputs_are_not_mutated() {
    let base = patterned_base(25, 25);
    let overlay = Raster::from(RgbaImage::from_fn(9, 9, |x, y| {
        Rgba([x as u8 * 20, y as u8 * 20, 99, (x * y) as u8 * 3])
    }));
    let (base_before, overlay_before) = (base.clone(), overlay.clone());

    let result = composite(&base, &overlay, place(12, 12, 1.7)).unwrap();

    assert_eq!(base, base_before);
    assert_eq!(overlay, overlay_before);
    assert_ne!(result, base);
}

#[test]
fn test_repeated_calls_are_identical() {
    let base = patterned_base(30, 30);
    let overlay = Raster::from(RgbaImage::from_pixel(7, 5, Rgba([200, 10, 10, 90])));
    let first = composite(&base, &overlay, place(3, 28, 1.3)).unwrap();
    let second = composite(&base, &overlay, place(3, 28, 1.3)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_huge_scale_is_rejected_without_allocating() {
    let base = black_base(10, 10);
    let overlay = white_overlay(4, 255);
    let result = composite(&base, &overlay, place(5, 5, 100_000.0));
    assert!(matches!(result, Err(CompositeError::InvalidArgument(_))));
}

#[test]
fn test_rejects_malformed_channel_layouts() {
    assert!(Raster::from_raw(4, 4, 2, vec![0; 32]).is_err());
    let rgba_base = Raster::from(RgbaImage::new(10, 10));
    let result = composite(&rgba_base, &white_overlay(4, 255), place(5, 5, 1.0));
    assert!(matches!(result, Err(CompositeError::InvalidArgument(_))));
}

#[test]
fn test_concurrent_calls_agree() {
    let base = patterned_base(50, 50);
    let overlay = white_overlay(10, 128);
    let expected = composite(&base, &overlay, place(25, 25, 1.0)).unwrap();

    let (base, overlay) = (&base, &overlay);
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(move || composite(base, overlay, place(25, 25, 1.0)).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
