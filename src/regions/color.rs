//! Color inference for a region: background mask color from the pixels just
//! outside the box, text color from the pixels inside it.

use image::RgbaImage;
use tracing::debug;

use crate::config::StyleParams;
use crate::models::{BoundingBox, Color, PixelRect, RegionColorProfile, TextStyle};
use crate::regions::sampler::PixelSampler;

/// Background mask color around `bbox`, sampled `padding + 1` pixels outside it.
pub fn estimate_background(bitmap: &RgbaImage, bbox: &BoundingBox, padding: u32) -> Color {
    let params = StyleParams::default().with_background_padding(padding);
    estimate_background_with(bitmap, bbox, &params)
}

pub fn estimate_background_with(
    bitmap: &RgbaImage,
    bbox: &BoundingBox,
    params: &StyleParams,
) -> Color {
    let sampler = PixelSampler::new(bitmap).with_alpha_gate(params.alpha_gate);
    let samples = edge_samples(sampler, bbox.to_pixels(), params.background_padding);

    match channel_median(&samples) {
        Some(color) => color,
        None => {
            debug!(?bbox, "no visible background pixels, using white");
            Color::WHITE
        }
    }
}

/// Pixels of the four one-pixel strips framing `rect`.
///
/// Each strip reaches `padding` pixels past the box on both ends and sits
/// `padding + 1` pixels away from the edge it follows, clear of anti-aliased
/// glyph borders.
pub fn edge_samples(sampler: PixelSampler<'_>, rect: PixelRect, padding: u32) -> Vec<Color> {
    // Snapped coordinates may sit at the ends of the i64 range
    let p = padding as i64;
    let (left, right) = (rect.x0.saturating_sub(p), rect.x1.saturating_add(p));
    let (top, bottom) = (rect.y0.saturating_sub(p), rect.y1.saturating_add(p));

    let mut samples: Vec<Color> = Vec::new();
    samples.extend(sampler.samples(left, top.saturating_sub(1), right, top));
    samples.extend(sampler.samples(left, bottom, right, bottom.saturating_add(1)));
    samples.extend(sampler.samples(left.saturating_sub(1), top, left, bottom));
    samples.extend(sampler.samples(right, top, right.saturating_add(1), bottom));
    samples
}

/// Per-channel median: each channel is ranked on its own and the element at
/// index `len / 2` is taken. `None` when there are no samples.
pub fn channel_median(samples: &[Color]) -> Option<Color> {
    if samples.is_empty() {
        return None;
    }

    let rank = samples.len() / 2;
    Some(Color::new(
        histogram_rank(samples.iter().map(|c| c.r), rank),
        histogram_rank(samples.iter().map(|c| c.g), rank),
        histogram_rank(samples.iter().map(|c| c.b), rank),
    ))
}

/// Value at `rank` of the sorted sequence, found through a 256-bucket histogram.
fn histogram_rank(values: impl Iterator<Item = u8>, rank: usize) -> u8 {
    let mut histogram = [0usize; 256];
    for value in values {
        histogram[value as usize] += 1;
    }

    let mut seen = 0;
    for (value, count) in histogram.iter().enumerate() {
        seen += count;
        if seen > rank {
            return value as u8;
        }
    }
    u8::MAX
}

/// Text fill and size for `bbox`.
///
/// The fill is the darkest visible pixel inside the box. This assumes dark text
/// on a light background; light-on-dark regions get their darkest background
/// pixel instead.
pub fn estimate_text_style(
    bitmap: &RgbaImage,
    bbox: &BoundingBox,
    current_font_size: Option<u32>,
) -> TextStyle {
    estimate_text_style_with(bitmap, bbox, current_font_size, &StyleParams::default())
}

pub fn estimate_text_style_with(
    bitmap: &RgbaImage,
    bbox: &BoundingBox,
    current_font_size: Option<u32>,
    params: &StyleParams,
) -> TextStyle {
    let font_size = current_font_size.unwrap_or_else(|| fallback_font_size(bbox, params));

    let sampler = PixelSampler::new(bitmap).with_alpha_gate(params.alpha_gate);
    let darkest = sampler
        .samples_in(bbox.to_pixels())
        .fold(None::<(f64, Color)>, |darkest, color| {
            let luminance = color.luminance();
            match darkest {
                Some((best, _)) if best <= luminance => darkest,
                _ => Some((luminance, color)),
            }
        });

    match darkest {
        Some((_, fill)) => TextStyle { fill, font_size },
        None => {
            debug!(?bbox, "no visible text pixels, using black");
            TextStyle {
                fill: Color::BLACK,
                font_size,
            }
        }
    }
}

fn fallback_font_size(bbox: &BoundingBox, params: &StyleParams) -> u32 {
    (params.font_size_ratio * bbox.height()).round().max(0.0) as u32
}

/// Background and foreground estimates for one region.
pub fn estimate_profile(
    bitmap: &RgbaImage,
    bbox: &BoundingBox,
    current_font_size: Option<u32>,
    params: &StyleParams,
) -> RegionColorProfile {
    let background = estimate_background_with(bitmap, bbox, params);
    let style = estimate_text_style_with(bitmap, bbox, current_font_size, params);
    RegionColorProfile::new(background, style)
}
