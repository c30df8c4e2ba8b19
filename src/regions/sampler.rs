use image::RgbaImage;

use crate::config::ALPHA_GATE;
use crate::models::{Color, PixelRect};

/// Reads rectangular windows of a bitmap, yielding only visible pixels.
#[derive(Clone, Copy)]
pub struct PixelSampler<'a> {
    bitmap: &'a RgbaImage,
    alpha_gate: u8,
}

impl<'a> PixelSampler<'a> {
    pub fn new(bitmap: &'a RgbaImage) -> Self {
        Self {
            bitmap,
            alpha_gate: ALPHA_GATE,
        }
    }

    pub fn with_alpha_gate(mut self, alpha_gate: u8) -> Self {
        self.alpha_gate = alpha_gate;
        self
    }

    /// Visible pixels of the window `[x0, x1) × [y0, y1)` in row-major order.
    ///
    /// The window is clipped to the bitmap, so windows partly or fully outside
    /// it simply yield fewer (or no) samples.
    pub fn samples(self, x0: i64, y0: i64, x1: i64, y1: i64) -> impl Iterator<Item = Color> + 'a {
        let bitmap = self.bitmap;
        let gate = self.alpha_gate;
        let (width, height) = (bitmap.width() as i64, bitmap.height() as i64);
        let (cx0, cx1) = (x0.clamp(0, width), x1.clamp(0, width));
        let (cy0, cy1) = (y0.clamp(0, height), y1.clamp(0, height));

        (cy0..cy1)
            .flat_map(move |y| (cx0..cx1).map(move |x| (x, y)))
            .filter_map(move |(x, y)| {
                let px = bitmap.get_pixel(x as u32, y as u32);
                (px[3] >= gate).then(|| Color::new(px[0], px[1], px[2]))
            })
    }

    pub fn samples_in(self, rect: PixelRect) -> impl Iterator<Item = Color> + 'a {
        self.samples(rect.x0, rect.y0, rect.x1, rect.y1)
    }
}
