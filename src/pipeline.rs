use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use tracing::{debug, info};

use crate::config::CROP_PADDING;
use crate::models::{DetectedRegion, RegionColorProfile, StyledRegion};
use crate::regions::crop::crop;

/// Data that flows through the pipeline: one region plus whatever the steps
/// have inferred about it so far.
#[derive(Debug, Clone)]
pub struct RegionData {
    pub region: DetectedRegion,

    /// Font size already chosen by the caller, if any.
    pub font_size: Option<u32>,

    pub profile: Option<RegionColorProfile>,
}

impl RegionData {
    pub fn new(region: DetectedRegion) -> Self {
        Self {
            region,
            font_size: None,
            profile: None,
        }
    }

    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = Some(font_size);
        self
    }

    pub fn into_styled(self) -> StyledRegion {
        StyledRegion {
            bbox: self.region.bbox,
            text: self.region.text,
            confidence: self.region.confidence,
            profile: self.profile,
        }
    }
}

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

/// Context available to all pipeline steps
#[derive(Clone)]
pub struct PipelineContext {
    /// The source bitmap every region refers to
    pub bitmap: Arc<RgbaImage>,
    pub verbose: bool,
    pub debug: Option<DebugConfig>,
    /// White border around the region crops written in debug mode
    pub crop_padding: u32,
}

/// Trait that all pipeline steps must implement
pub trait PipelineStep: Send + Sync {
    /// Process the whole region set; steps may merge (many → fewer), filter or annotate.
    fn process(&self, data: Vec<RegionData>, context: &PipelineContext) -> Result<Vec<RegionData>>;

    /// Human-readable name for this step (used in logs and debug directories)
    fn name(&self) -> &str;
}

/// Composable pipeline builder
pub struct Pipeline {
    steps: Vec<Arc<dyn PipelineStep>>,
    verbose: bool,
    debug: Option<DebugConfig>,
    crop_padding: u32,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            verbose: false,
            debug: None,
            crop_padding: CROP_PADDING,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                anyhow::bail!("Debug directory is not empty: {}", output_dir.display());
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.debug = Some(DebugConfig { output_dir });

        Ok(self)
    }

    pub fn with_crop_padding(mut self, padding: u32) -> Self {
        self.crop_padding = padding;
        self
    }

    pub fn add_step(mut self, step: Arc<dyn PipelineStep>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn add_step_boxed(mut self, step: Box<dyn PipelineStep>) -> Self {
        self.steps.push(Arc::from(step));
        self
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Run every step over the detections of `bitmap`.
    pub fn run(
        &self,
        bitmap: Arc<RgbaImage>,
        detections: Vec<DetectedRegion>,
    ) -> Result<Vec<RegionData>> {
        self.run_partial(bitmap, detections, self.steps.len())
    }

    /// Run the pipeline but stop after `num_steps` steps (useful for debugging)
    pub fn run_partial(
        &self,
        bitmap: Arc<RgbaImage>,
        detections: Vec<DetectedRegion>,
        num_steps: usize,
    ) -> Result<Vec<RegionData>> {
        let data = detections.into_iter().map(RegionData::new).collect();
        self.run_with_data(bitmap, data, num_steps)
    }

    /// Run the first `num_steps` steps over regions that may already carry
    /// caller-provided hints such as a font size.
    pub fn run_with_data(
        &self,
        bitmap: Arc<RgbaImage>,
        mut data: Vec<RegionData>,
        num_steps: usize,
    ) -> Result<Vec<RegionData>> {
        let context = PipelineContext {
            bitmap,
            verbose: self.verbose,
            debug: self.debug.clone(),
            crop_padding: self.crop_padding,
        };

        save_debug_output(&context, "00_input", &data)?;

        for (step_idx, step) in self.steps.iter().take(num_steps).enumerate() {
            let before = data.len();
            if context.verbose {
                info!("Running step: {} (processing {} regions)", step.name(), before);
            }

            data = step
                .process(data, &context)
                .with_context(|| format!("step '{}' failed", step.name()))?;

            debug!(step = step.name(), before, after = data.len(), "step finished");

            let step_dir_name = format!(
                "{:02}_{}",
                step_idx + 1,
                step.name().to_lowercase().replace(' ', "_")
            );
            save_debug_output(&context, &step_dir_name, &data)?;
        }

        Ok(data)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Write an annotated overview and one padded crop per region into
/// `<debug dir>/<step_dir_name>/`. Does nothing unless debug mode is on.
fn save_debug_output(
    context: &PipelineContext,
    step_dir_name: &str,
    data: &[RegionData],
) -> Result<()> {
    let Some(debug_config) = context.debug.as_ref() else {
        return Ok(());
    };

    let step_dir = debug_config.output_dir.join(step_dir_name);
    std::fs::create_dir_all(&step_dir)?;

    save_overview(&context.bitmap, data, &step_dir.join("overview.png"))?;

    for (idx, item) in data.iter().enumerate() {
        // Degenerate and oversized regions have no crop to show
        let Ok(cropped) = crop(&context.bitmap, &item.region.bbox, context.crop_padding) else {
            continue;
        };
        let output_path = step_dir.join(format!("{:02}.png", idx + 1));
        cropped
            .save(&output_path)
            .map_err(|e| anyhow::anyhow!("Failed to save debug image: {}", e))?;
    }

    if context.verbose {
        info!("  Debug: saved {} regions to {}/", data.len(), step_dir_name);
    }

    Ok(())
}

fn save_overview(bitmap: &RgbaImage, data: &[RegionData], path: &Path) -> Result<()> {
    let mut overview = bitmap.clone();
    let outline = Rgba([255u8, 0, 0, 255]);

    // Outlines are clamped to one pixel past the bitmap so edges beyond it stay off-canvas
    let (max_x, max_y) = (bitmap.width() as i64 + 1, bitmap.height() as i64 + 1);
    for item in data {
        let rect = item.region.bbox.to_pixels();
        let (x0, x1) = (rect.x0.clamp(-1, max_x), rect.x1.clamp(-1, max_x));
        let (y0, y1) = (rect.y0.clamp(-1, max_y), rect.y1.clamp(-1, max_y));
        if x1 <= x0 || y1 <= y0 {
            continue;
        }
        let shape = Rect::at(x0 as i32, y0 as i32).of_size((x1 - x0) as u32, (y1 - y0) as u32);
        draw_hollow_rect_mut(&mut overview, shape, outline);
    }

    overview
        .save(path)
        .map_err(|e| anyhow::anyhow!("Failed to save debug overview: {}", e))?;
    Ok(())
}
