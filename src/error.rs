//! Error types for region consolidation, styling and bitmap access.

use thiserror::Error;

use crate::models::BoundingBox;

/// Errors surfaced by the region core.
///
/// Sampling exhaustion is not represented here: the estimators recover from it
/// locally with neutral defaults.
#[derive(Debug, Error)]
pub enum RegionError {
    /// Coordinates are non-finite or inverted (`x1 < x0` or `y1 < y0`).
    #[error("invalid bounding box ({x0}, {y0}) to ({x1}, {y1})")]
    InvalidBox { x0: f64, y0: f64, x1: f64, y1: f64 },

    /// The box has zero width or zero height.
    #[error("degenerate bounding box {0:?}")]
    DegenerateBox(BoundingBox),

    /// The padded crop of the box would not fit in a bitmap.
    #[error("bounding box {0:?} is too large to crop")]
    OversizedBox(BoundingBox),

    /// The source bitmap could not be decoded.
    #[error("failed to decode bitmap")]
    Decode(#[source] image::ImageError),

    /// A raw pixel buffer does not match its declared dimensions.
    #[error("pixel buffer of {len} bytes does not hold a {width}x{height} RGBA8 bitmap")]
    BufferSize { width: u32, height: u32, len: usize },

    #[error("i/o error")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RegionError>;
