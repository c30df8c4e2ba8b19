use serde::{Deserialize, Serialize};

use crate::error::{RegionError, Result};

/// Axis-aligned rectangle in image pixel coordinates.
///
/// `x1`/`y1` are exclusive edges, so a box covering the single pixel at
/// `(3, 4)` is `{3, 4, 4, 5}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

/// A box snapped to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl PixelRect {
    pub fn width(&self) -> i64 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> i64 {
        self.y1.saturating_sub(self.y0)
    }
}

impl BoundingBox {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Result<Self> {
        let bbox = Self { x0, y0, x1, y1 };
        bbox.validate()?;
        Ok(bbox)
    }

    /// Check that the coordinates are finite and ordered.
    pub fn validate(&self) -> Result<()> {
        let finite = [self.x0, self.y0, self.x1, self.y1]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.x1 < self.x0 || self.y1 < self.y0 {
            return Err(RegionError::InvalidBox {
                x0: self.x0,
                y0: self.y0,
                x1: self.x1,
                y1: self.y1,
            });
        }
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Smallest box covering both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Non-strict containment: equal boxes contain each other.
    pub fn contains(&self, inner: &BoundingBox) -> bool {
        inner.x0 >= self.x0 && inner.y0 >= self.y0 && inner.x1 <= self.x1 && inner.y1 <= self.y1
    }

    /// Length of the intersection of the two vertical intervals (0 if disjoint).
    pub fn vertical_overlap(&self, other: &BoundingBox) -> f64 {
        (self.y1.min(other.y1) - self.y0.max(other.y0)).max(0.0)
    }

    /// Distance between the nearer vertical edges, 0 when the horizontal intervals overlap.
    pub fn horizontal_gap(&self, other: &BoundingBox) -> f64 {
        (self.x0.max(other.x0) - self.x1.min(other.x1)).max(0.0)
    }

    pub fn to_pixels(&self) -> PixelRect {
        PixelRect {
            x0: self.x0.round() as i64,
            y0: self.y0.round() as i64,
            x1: self.x1.round() as i64,
            y1: self.y1.round() as i64,
        }
    }
}

/// One detection handed over by the recognition engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedRegion {
    pub bbox: BoundingBox,
    pub text: String,
    pub confidence: f32,
}

impl DetectedRegion {
    pub fn new(bbox: BoundingBox, text: impl Into<String>, confidence: f32) -> Self {
        Self {
            bbox,
            text: text.into(),
            confidence,
        }
    }
}

/// An 8-bit RGB triple. Pixel samples and estimated colors share this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Rec. 601 luma.
    pub fn luminance(&self) -> f64 {
        0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64
    }

    /// `#rrggbb`, lowercase.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Foreground estimate for a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub fill: Color,
    pub font_size: u32,
}

/// Background and foreground styling inferred for one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionColorProfile {
    pub background_hex: String,
    pub foreground_hex: String,
    pub font_size_estimate: u32,
}

impl RegionColorProfile {
    pub fn new(background: Color, style: TextStyle) -> Self {
        Self {
            background_hex: background.to_hex(),
            foreground_hex: style.fill.to_hex(),
            font_size_estimate: style.font_size,
        }
    }
}

/// A consolidated region ready for the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledRegion {
    pub bbox: BoundingBox,
    pub text: String,
    pub confidence: f32,
    pub profile: Option<RegionColorProfile>,
}
