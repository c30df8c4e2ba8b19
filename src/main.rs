use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use retext::config::CROP_PADDING;
use retext::regions::ocr::{OcrsRecognizer, Recognizer, load_detections, reocr_region};
use retext::{MergeParams, StyleParams, build_standard_pipeline, crop, load_bitmap};

#[derive(Parser)]
#[command(name = "retext")]
#[command(about = "Consolidate text detections and infer overlay colors for them")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// JSON file with raw detections (runs the bundled OCR engine when omitted)
    #[arg(long, value_name = "FILE")]
    detections: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Save debug outputs to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Skip color inference (consolidation only)
    #[arg(long)]
    skip_styling: bool,

    /// Index of a consolidated region to crop and read again
    #[arg(long, value_name = "INDEX")]
    crop: Option<usize>,

    /// Where to write the crop selected with --crop
    #[arg(long, value_name = "FILE", requires = "crop")]
    crop_out: Option<PathBuf>,

    /// White border in pixels around cropped regions
    #[arg(long, value_name = "PIXELS", default_value_t = CROP_PADDING)]
    crop_padding: u32,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Loading image: {:?}", args.image_path);
    let bitmap = Arc::new(load_bitmap(&args.image_path).context("Failed to load image")?);
    info!("Image loaded: {}x{}", bitmap.width(), bitmap.height());

    let recognizer = OcrsRecognizer::new();
    let detections = match &args.detections {
        Some(path) => load_detections(path)?,
        None => recognizer.detect(&bitmap)?,
    };
    info!("{} raw detections", detections.len());

    let style = StyleParams::default().with_crop_padding(args.crop_padding);
    let mut pipeline = build_standard_pipeline(args.verbose, MergeParams::default(), style);
    if let Some(debug_dir) = args.debug_out {
        pipeline = pipeline.with_debug(debug_dir)?;
    }

    // Styling is the last step of the standard pipeline
    let steps = pipeline.step_names().len();
    let num_steps = if args.skip_styling { steps.saturating_sub(1) } else { steps };
    let regions: Vec<_> = pipeline
        .run_partial(bitmap.clone(), detections, num_steps)?
        .into_iter()
        .map(|item| item.into_styled())
        .collect();

    if let Some(index) = args.crop {
        let region = regions
            .get(index)
            .with_context(|| format!("no region {} (found {})", index, regions.len()))?;

        if let Some(path) = &args.crop_out {
            crop(&bitmap, &region.bbox, style.crop_padding)?
                .save(path)
                .with_context(|| format!("Failed to save crop to {}", path.display()))?;
            info!("Saved crop of region {} to {}", index, path.display());
        }

        match reocr_region(&recognizer, &bitmap, &region.bbox, style.crop_padding)? {
            Some((text, confidence)) => {
                let reading = serde_json::json!({
                    "index": index,
                    "text": text,
                    "confidence": confidence,
                });
                println!("{}", reading);
            }
            None => println!("{}", serde_json::json!({ "index": index, "text": null })),
        }
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(&regions)?);
    Ok(())
}
