#![allow(dead_code)]

use image::{ImageBuffer, Rgba, RgbaImage};
use retext::{BoundingBox, DetectedRegion};
use tempfile::NamedTempFile;

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const INK: Rgba<u8> = Rgba([20, 30, 40, 255]);
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Shorthand for a box literal in tests.
pub fn bbox(x0: f64, y0: f64, x1: f64, y1: f64) -> BoundingBox {
    BoundingBox { x0, y0, x1, y1 }
}

pub fn region(x0: f64, y0: f64, x1: f64, y1: f64, text: &str) -> DetectedRegion {
    DetectedRegion::new(bbox(x0, y0, x1, y1), text, 0.9)
}

/// A bitmap filled with a single color.
pub fn solid_bitmap(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
    ImageBuffer::from_pixel(width, height, color)
}

/// Paint the pixels `[x0, x1) × [y0, y1)` with `color`.
pub fn fill_rect(img: &mut RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgba<u8>) {
    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x, y, color);
        }
    }
}

/// A white page with a block of ink inside each of `glyphs`.
///
/// Glyph rectangles are inset by one pixel so the box edges stay background.
pub fn page_with_glyphs(width: u32, height: u32, glyphs: &[(u32, u32, u32, u32)]) -> RgbaImage {
    let mut img = solid_bitmap(width, height, WHITE);
    for &(x0, y0, x1, y1) in glyphs {
        fill_rect(&mut img, x0 + 1, y0 + 1, x1 - 1, y1 - 1, INK);
    }
    img
}

/// Saves `img` as a PNG temp file that is removed when dropped.
pub fn save_temp_png(img: &RgbaImage) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("Failed to create temp image file");
    img.save_with_format(file.path(), image::ImageFormat::Png)
        .expect("Failed to save test image");
    file
}
