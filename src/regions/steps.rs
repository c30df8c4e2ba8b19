use anyhow::Result;
use rayon::prelude::*;
use tracing::debug;

use crate::config::{MergeParams, StyleParams};
use crate::models::BoundingBox;
use crate::pipeline::{PipelineContext, PipelineStep, RegionData};
use crate::regions::color::estimate_profile;
use crate::regions::containment::filter_contained;
use crate::regions::merge::{Mergeable, merge_with};

impl Mergeable for RegionData {
    fn bbox(&self) -> &BoundingBox {
        &self.region.bbox
    }

    fn absorb(self, other: Self) -> Self {
        RegionData {
            region: self.region.absorb(other.region),
            font_size: self.font_size.or(other.font_size),
            profile: None,
        }
    }
}

/// Drop detections with zero width or height before they reach the merger
pub struct DegenerateFilterStep;

impl PipelineStep for DegenerateFilterStep {
    fn process(
        &self,
        data: Vec<RegionData>,
        _context: &PipelineContext,
    ) -> Result<Vec<RegionData>> {
        let mut result = Vec::with_capacity(data.len());
        for item in data {
            let bbox = &item.region.bbox;
            if bbox.validate().is_err() || bbox.is_degenerate() {
                debug!(?bbox, text = %item.region.text, "dropping degenerate detection");
                continue;
            }
            result.push(item);
        }
        Ok(result)
    }

    fn name(&self) -> &str {
        "Degenerate Filtering"
    }
}

/// Consolidate fragments of one line into a single region
pub struct MergeStep {
    pub params: MergeParams,
}

impl PipelineStep for MergeStep {
    fn process(
        &self,
        data: Vec<RegionData>,
        _context: &PipelineContext,
    ) -> Result<Vec<RegionData>> {
        Ok(merge_with(data, &self.params)?)
    }

    fn name(&self) -> &str {
        "Adaptive Merge"
    }
}

/// Remove regions enclosed by another region
pub struct ContainmentFilterStep;

impl PipelineStep for ContainmentFilterStep {
    fn process(
        &self,
        data: Vec<RegionData>,
        _context: &PipelineContext,
    ) -> Result<Vec<RegionData>> {
        Ok(filter_contained(data))
    }

    fn name(&self) -> &str {
        "Containment Filtering"
    }
}

/// Infer background mask color and text style for every region
pub struct StyleStep {
    pub params: StyleParams,
    /// Estimate regions on the rayon pool
    pub parallel: bool,
}

impl PipelineStep for StyleStep {
    fn process(
        &self,
        data: Vec<RegionData>,
        context: &PipelineContext,
    ) -> Result<Vec<RegionData>> {
        let bitmap = context.bitmap.as_ref();
        let style = |mut item: RegionData| {
            item.profile = Some(estimate_profile(
                bitmap,
                &item.region.bbox,
                item.font_size,
                &self.params,
            ));
            item
        };

        // Each region only reads the shared bitmap and writes its own profile
        let result = if self.parallel {
            data.into_par_iter().map(&style).collect()
        } else {
            data.into_iter().map(&style).collect()
        };
        Ok(result)
    }

    fn name(&self) -> &str {
        "Region Styling"
    }
}
