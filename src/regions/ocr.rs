//! Recognition engine adapters: where detections come from and how a single
//! region is read again.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use image::{DynamicImage, RgbaImage};
use ocrs::{OcrEngineParams, TextItem};
pub use ocrs::{ImageSource, OcrEngine};
use rten::Model;
use tracing::{debug, info};

use crate::models::{BoundingBox, DetectedRegion};
use crate::regions::crop::crop;

/// `ocrs` does not report per-word confidence.
pub const DEFAULT_CONFIDENCE: f32 = 0.9;

/// Produces detections for a bitmap and reads isolated regions.
pub trait Recognizer: Send + Sync {
    /// Word-level detections over the whole bitmap.
    fn detect(&self, bitmap: &RgbaImage) -> Result<Vec<DetectedRegion>>;

    /// Text of an already isolated region, `None` when nothing was read.
    fn recognize(&self, bitmap: &RgbaImage) -> Result<Option<(String, f32)>>;
}

/// Load `ocrs` models from the standard cache location (`~/.cache/ocrs`).
pub fn init_ocr_engine() -> Result<OcrEngine> {
    let home_dir = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE"))?;

    let cache_dir = Path::new(&home_dir).join(".cache/ocrs");
    let detection_model_path = cache_dir.join("text-detection.rten");
    let recognition_model_path = cache_dir.join("text-recognition.rten");

    if !detection_model_path.exists() || !recognition_model_path.exists() {
        anyhow::bail!(
            "OCR models not found. Please run: ocrs-cli --help (or download models manually)\n\
             Expected locations:\n  - {}\n  - {}",
            detection_model_path.display(),
            recognition_model_path.display()
        );
    }

    let detection_model = Model::load_file(&detection_model_path)
        .with_context(|| format!("loading {}", detection_model_path.display()))?;
    let recognition_model = Model::load_file(&recognition_model_path)
        .with_context(|| format!("loading {}", recognition_model_path.display()))?;

    let engine = OcrEngine::new(OcrEngineParams {
        detection_model: Some(detection_model),
        recognition_model: Some(recognition_model),
        ..Default::default()
    })?;

    Ok(engine)
}

/// [`Recognizer`] backed by `ocrs`. Models are loaded on first use.
pub struct OcrsRecognizer {
    engine: Mutex<Option<Arc<OcrEngine>>>,
}

impl OcrsRecognizer {
    pub fn new() -> Self {
        Self {
            engine: Mutex::new(None),
        }
    }

    fn engine(&self) -> Result<Arc<OcrEngine>> {
        let mut guard = self
            .engine
            .lock()
            .map_err(|_| anyhow::anyhow!("OCR engine lock poisoned"))?;
        if let Some(engine) = guard.as_ref() {
            return Ok(engine.clone());
        }

        info!("initializing OCR engine");
        let engine = Arc::new(init_ocr_engine()?);
        *guard = Some(engine.clone());
        Ok(engine)
    }
}

impl Default for OcrsRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for OcrsRecognizer {
    fn detect(&self, bitmap: &RgbaImage) -> Result<Vec<DetectedRegion>> {
        let engine = self.engine()?;
        let rgb = DynamicImage::ImageRgba8(bitmap.clone()).to_rgb8();
        let source = ImageSource::from_bytes(rgb.as_raw(), rgb.dimensions())
            .map_err(|_| anyhow::anyhow!("bitmap rejected by OCR engine"))?;
        let input = engine.prepare_input(source)?;

        let word_rects = engine.detect_words(&input)?;
        let line_rects = engine.find_text_lines(&input, &word_rects);
        let lines = engine.recognize_text(&input, &line_rects)?;

        let mut detections = Vec::new();
        for line in lines.iter().flatten() {
            for word in line.words() {
                let rect = word.bounding_rect();
                let bbox = BoundingBox {
                    x0: rect.left() as f64,
                    y0: rect.top() as f64,
                    x1: rect.right() as f64,
                    y1: rect.bottom() as f64,
                };
                let text = word.to_string();
                if bbox.is_degenerate() || text.trim().is_empty() {
                    continue;
                }
                detections.push(DetectedRegion::new(bbox, text.trim(), DEFAULT_CONFIDENCE));
            }
        }

        debug!(count = detections.len(), "words detected");
        Ok(detections)
    }

    fn recognize(&self, bitmap: &RgbaImage) -> Result<Option<(String, f32)>> {
        let engine = self.engine()?;
        let rgb = DynamicImage::ImageRgba8(bitmap.clone()).to_rgb8();
        let source = ImageSource::from_bytes(rgb.as_raw(), rgb.dimensions())
            .map_err(|_| anyhow::anyhow!("bitmap rejected by OCR engine"))?;
        let input = engine.prepare_input(source)?;

        let text = engine.get_text(&input)?;
        let text = text.trim().to_string();
        if text.is_empty() {
            Ok(None)
        } else {
            Ok(Some((text, DEFAULT_CONFIDENCE)))
        }
    }
}

/// Crop one region with its white border and run it through the recognizer again.
pub fn reocr_region(
    recognizer: &dyn Recognizer,
    bitmap: &RgbaImage,
    bbox: &BoundingBox,
    padding: u32,
) -> Result<Option<(String, f32)>> {
    let isolated = crop(bitmap, bbox, padding)?;
    recognizer.recognize(&isolated)
}

/// Read detections previously exported as a JSON array of
/// `{"bbox": {"x0", "y0", "x1", "y1"}, "text", "confidence"}` objects.
pub fn load_detections<P: AsRef<Path>>(path: P) -> Result<Vec<DetectedRegion>> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("reading detections from {}", path.display()))?;
    let detections: Vec<DetectedRegion> = serde_json::from_str(&data)
        .with_context(|| format!("parsing detections in {}", path.display()))?;
    Ok(detections)
}
