mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from retext for tests
pub use retext::{BoundingBox, Color, DetectedRegion, MergeParams, RegionError, StyleParams};
