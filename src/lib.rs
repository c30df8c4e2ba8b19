pub mod bitmap;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod regions;

pub use bitmap::{bitmap_from_raw, load_bitmap};
pub use config::{MergeParams, StyleParams};
pub use error::RegionError;
pub use models::{
    BoundingBox, Color, DetectedRegion, PixelRect, RegionColorProfile, StyledRegion, TextStyle,
};
pub use pipeline::{DebugConfig, Pipeline, PipelineContext, PipelineStep, RegionData};
pub use regions::color::{estimate_background, estimate_profile, estimate_text_style};
pub use regions::containment::{filter, filter_regions};
pub use regions::crop::crop;
pub use regions::merge::{merge, merge_regions, should_merge};
pub use regions::sampler::PixelSampler;
pub use regions::{build_standard_pipeline, process_regions};
