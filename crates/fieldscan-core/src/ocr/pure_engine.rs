//! Pure Rust OCR engine wrapper using `pure-onnx-ocr`.

use std::path::Path;
use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info};

use crate::error::OcrError;

use super::{OcrBackend, OcrOptions};

/// OCR engine backed by `pure-onnx-ocr` (PaddleOCR models, no external binary).
pub struct PureOcrEngine {
    engine: pure_onnx_ocr::engine::OcrEngine,
}

/// A recognized region reduced to what reading order needs.
struct Region {
    top: f32,
    left: f32,
    text: String,
}

impl PureOcrEngine {
    /// Create an engine from `det.onnx`, `latin_rec.onnx` and `latin_dict.txt` in `model_dir`.
    pub fn from_dir(model_dir: &Path) -> Result<Self, OcrError> {
        let det_path = model_dir.join("det.onnx");
        let rec_path = model_dir.join("latin_rec.onnx");
        let dict_path = model_dir.join("latin_dict.txt");

        for path in [&det_path, &rec_path, &dict_path] {
            if !path.exists() {
                return Err(OcrError::ModelLoad(format!(
                    "missing model file {}",
                    path.display()
                )));
            }
        }

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", model_dir.display());

        Ok(Self { engine })
    }
}

impl OcrBackend for PureOcrEngine {
    /// Page segmentation options are Tesseract-specific and ignored here.
    fn recognize(&self, image: &DynamicImage, _options: &OcrOptions) -> Result<String, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();

        let results = self
            .engine
            .run_from_image(image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        debug!("pure-onnx-ocr returned {} text regions", results.len());

        let mut regions: Vec<Region> = results
            .iter()
            .map(|r| {
                let (left, top) = top_left(&r.bounding_box);
                Region {
                    top,
                    left,
                    text: r.text.replace("[UNK]", " "),
                }
            })
            .collect();

        // Group into rows of ~20px, then left to right
        regions.sort_by(|a, b| {
            let row_a = (a.top / 20.0) as i32;
            let row_b = (b.top / 20.0) as i32;
            row_a
                .cmp(&row_b)
                .then(a.left.partial_cmp(&b.left).unwrap_or(std::cmp::Ordering::Equal))
        });

        let text = regions
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        info!(
            "OCR complete: {}x{} image, {} regions in {}ms",
            width,
            height,
            regions.len(),
            start.elapsed().as_millis()
        );

        Ok(text)
    }
}

/// Minimum x and y over the polygon's exterior points.
fn top_left(polygon: &pure_onnx_ocr::Polygon<f64>) -> (f32, f32) {
    polygon
        .exterior()
        .coords()
        .fold((f32::INFINITY, f32::INFINITY), |(x, y), c| {
            (x.min(c.x as f32), y.min(c.y as f32))
        })
}
