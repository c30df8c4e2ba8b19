//! Fixed algorithm parameters.
//!
//! These are tuning knobs for tests and experiments, not user-facing settings.
//! The `Default` impls of [`MergeParams`] and [`StyleParams`] use the constants.

/// Minimum `min(ha, hb) / max(ha, hb)` for two boxes to merge.
pub const HEIGHT_SIMILARITY: f64 = 0.7;

/// Vertical intersection must exceed this fraction of the smaller height.
pub const VERTICAL_OVERLAP: f64 = 0.5;

/// Horizontal gap must stay below this fraction of the average height.
pub const HORIZONTAL_GAP: f64 = 1.0;

/// Pixels with alpha below this are excluded from all color statistics.
pub const ALPHA_GATE: u8 = 10;

/// Distance between the box edge and the background sampling strips.
pub const BACKGROUND_PADDING: u32 = 2;

/// White border added around a cropped region.
pub const CROP_PADDING: u32 = 10;

/// Upper bound on the pixel buffer of a single crop, the same cap `image`
/// applies to decoding by default.
pub const MAX_CROP_BYTES: u64 = 512 * 1024 * 1024;

/// Fallback font size as a fraction of the box height.
pub const FONT_SIZE_RATIO: f64 = 0.8;

/// Thresholds for the adaptive merge test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeParams {
    pub height_similarity: f64,
    pub vertical_overlap: f64,
    pub horizontal_gap: f64,
}

impl MergeParams {
    pub fn new() -> Self {
        Self {
            height_similarity: HEIGHT_SIMILARITY,
            vertical_overlap: VERTICAL_OVERLAP,
            horizontal_gap: HORIZONTAL_GAP,
        }
    }

    pub fn with_height_similarity(mut self, ratio: f64) -> Self {
        self.height_similarity = ratio;
        self
    }

    pub fn with_vertical_overlap(mut self, fraction: f64) -> Self {
        self.vertical_overlap = fraction;
        self
    }

    pub fn with_horizontal_gap(mut self, fraction: f64) -> Self {
        self.horizontal_gap = fraction;
        self
    }
}

impl Default for MergeParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters for color inference and cropping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleParams {
    pub alpha_gate: u8,
    pub background_padding: u32,
    pub crop_padding: u32,
    pub font_size_ratio: f64,
}

impl StyleParams {
    pub fn new() -> Self {
        Self {
            alpha_gate: ALPHA_GATE,
            background_padding: BACKGROUND_PADDING,
            crop_padding: CROP_PADDING,
            font_size_ratio: FONT_SIZE_RATIO,
        }
    }

    pub fn with_background_padding(mut self, padding: u32) -> Self {
        self.background_padding = padding;
        self
    }

    pub fn with_crop_padding(mut self, padding: u32) -> Self {
        self.crop_padding = padding;
        self
    }
}

impl Default for StyleParams {
    fn default() -> Self {
        Self::new()
    }
}
