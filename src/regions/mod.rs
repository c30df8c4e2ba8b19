pub mod color;
pub mod containment;
pub mod crop;
pub mod merge;
pub mod ocr;
pub mod sampler;
pub mod steps;

use std::sync::Arc;

use image::RgbaImage;

use crate::config::{MergeParams, StyleParams};
use crate::models::{DetectedRegion, StyledRegion};
use crate::pipeline::Pipeline;

/// Build the standard consolidation + styling pipeline
pub fn build_standard_pipeline(verbose: bool, merge: MergeParams, style: StyleParams) -> Pipeline {
    use crate::regions::steps::*;

    Pipeline::new()
        .with_verbose(verbose)
        .with_crop_padding(style.crop_padding)
        .add_step(Arc::new(DegenerateFilterStep))
        .add_step(Arc::new(MergeStep { params: merge }))
        .add_step(Arc::new(ContainmentFilterStep))
        .add_step(Arc::new(StyleStep {
            params: style,
            parallel: true,
        }))
}

/// Consolidate raw detections and infer their styling with default parameters.
pub fn process_regions(
    bitmap: Arc<RgbaImage>,
    detections: Vec<DetectedRegion>,
) -> anyhow::Result<Vec<StyledRegion>> {
    let pipeline = build_standard_pipeline(false, MergeParams::default(), StyleParams::default());
    let data = pipeline.run(bitmap, detections)?;
    Ok(data.into_iter().map(|item| item.into_styled()).collect())
}
