//! Access to decoded source bitmaps.
//!
//! Everything downstream works on an in-memory [`RgbaImage`]; these helpers are
//! the only places where a backing-store failure can occur.

use std::path::Path;

use image::{ImageReader, RgbaImage};
use tracing::debug;

use crate::error::{RegionError, Result};

/// Decode an image file into an RGBA8 bitmap.
pub fn load_bitmap<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    let path = path.as_ref();
    let img = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(RegionError::Decode)?;
    debug!(path = %path.display(), width = img.width(), height = img.height(), "bitmap decoded");
    Ok(img.to_rgba8())
}

/// Wrap a raw RGBA8 buffer (row-major, 4 bytes per pixel).
pub fn bitmap_from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<RgbaImage> {
    let len = data.len();
    let expected = width as usize * height as usize * 4;
    if len != expected {
        return Err(RegionError::BufferSize { width, height, len });
    }
    RgbaImage::from_raw(width, height, data).ok_or(RegionError::BufferSize { width, height, len })
}
