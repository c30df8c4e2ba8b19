use image::{Rgba, RgbaImage};

use crate::config::MAX_CROP_BYTES;
use crate::error::{RegionError, Result};
use crate::models::BoundingBox;

/// Cut `bbox` out of `bitmap` onto a white canvas with `padding` pixels of
/// border on every side.
///
/// The canvas is `(w + 2·padding) × (h + 2·padding)` for the box snapped to
/// whole pixels. Parts of the box outside the bitmap stay white. Boxes whose
/// canvas would exceed `u32` dimensions or [`MAX_CROP_BYTES`] are rejected
/// with [`RegionError::OversizedBox`].
pub fn crop(bitmap: &RgbaImage, bbox: &BoundingBox, padding: u32) -> Result<RgbaImage> {
    bbox.validate()?;
    let rect = bbox.to_pixels();
    if bbox.is_degenerate() || rect.width() <= 0 || rect.height() <= 0 {
        return Err(RegionError::DegenerateBox(*bbox));
    }

    let padded = |side: i64| {
        u32::try_from(side)
            .ok()
            .and_then(|side| side.checked_add(padding))
            .and_then(|side| side.checked_add(padding))
    };
    let (Some(width), Some(height)) = (padded(rect.width()), padded(rect.height())) else {
        return Err(RegionError::OversizedBox(*bbox));
    };
    if (width as u64 * height as u64).saturating_mul(4) > MAX_CROP_BYTES {
        return Err(RegionError::OversizedBox(*bbox));
    }

    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));

    let (bitmap_w, bitmap_h) = (bitmap.width() as i64, bitmap.height() as i64);
    let (sx0, sx1) = (rect.x0.clamp(0, bitmap_w), rect.x1.clamp(0, bitmap_w));
    let (sy0, sy1) = (rect.y0.clamp(0, bitmap_h), rect.y1.clamp(0, bitmap_h));

    for sy in sy0..sy1 {
        for sx in sx0..sx1 {
            let px = bitmap.get_pixel(sx as u32, sy as u32);
            let cx = (padding as i64 + sx - rect.x0) as u32;
            let cy = (padding as i64 + sy - rect.y0) as u32;
            canvas.put_pixel(cx, cy, over_white(px));
        }
    }

    Ok(canvas)
}

/// Composite a pixel onto opaque white.
fn over_white(px: &Rgba<u8>) -> Rgba<u8> {
    let alpha = px[3] as u32;
    let blend = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
    Rgba([blend(px[0]), blend(px[1]), blend(px[2]), 255])
}
