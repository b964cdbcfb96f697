//! OCR backends and image preprocessing.

mod preprocessing;
mod tesseract;

#[cfg(feature = "onnx")]
mod pure_engine;

pub use preprocessing::{Preprocessing, binarize};
pub use tesseract::TesseractEngine;

#[cfg(feature = "onnx")]
pub use pure_engine::PureOcrEngine;

use image::DynamicImage;

use crate::error::{FieldscanError, OcrError};
use crate::models::config::{OcrBackendKind, OcrConfig};

/// Engine tuning for a single recognition call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OcrOptions {
    /// OCR engine mode (Tesseract `--oem`).
    pub engine_mode: Option<u8>,
    /// Page segmentation mode (Tesseract `--psm`).
    pub page_segmentation_mode: Option<u8>,
}

impl OcrOptions {
    /// Engine defaults.
    pub fn engine_defaults() -> Self {
        Self::default()
    }

    /// Options for a binarized page, taken from the configuration.
    pub fn for_binarized(config: &OcrConfig) -> Self {
        Self {
            engine_mode: Some(config.oem),
            page_segmentation_mode: Some(config.page_segmentation_mode),
        }
    }
}

/// Trait for OCR engines turning a raster image into text.
pub trait OcrBackend {
    /// Recognize the text of `image` as one newline-delimited blob.
    fn recognize(&self, image: &DynamicImage, options: &OcrOptions) -> Result<String, OcrError>;
}

/// Split an OCR text blob into trimmed, non-blank lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build the configured OCR backend.
pub fn create_backend(config: &OcrConfig) -> Result<Box<dyn OcrBackend>, FieldscanError> {
    match config.backend {
        OcrBackendKind::Tesseract => Ok(Box::new(TesseractEngine::from_config(config))),
        #[cfg(feature = "onnx")]
        OcrBackendKind::Onnx => Ok(Box::new(PureOcrEngine::from_dir(&config.model_dir)?)),
        #[cfg(not(feature = "onnx"))]
        OcrBackendKind::Onnx => Err(FieldscanError::Config(
            "the onnx OCR backend requires building with the `onnx` feature".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_lines_drops_blank_lines() {
        let text = "  ACME MARKET \n\n\t\n2x Apple 1.00\r\nTOTAL 2.00\n\x0c";
        assert_eq!(
            split_lines(text),
            vec!["ACME MARKET", "2x Apple 1.00", "TOTAL 2.00"]
        );
    }

    #[test]
    fn test_binarized_options_follow_config() {
        let mut config = OcrConfig::default();
        config.page_segmentation_mode = 4;

        assert_eq!(
            OcrOptions::for_binarized(&config),
            OcrOptions {
                engine_mode: Some(3),
                page_segmentation_mode: Some(4),
            }
        );
        assert_eq!(OcrOptions::engine_defaults(), OcrOptions::default());
    }

    #[cfg(not(feature = "onnx"))]
    #[test]
    fn test_onnx_backend_requires_feature() {
        let mut config = OcrConfig::default();
        config.backend = OcrBackendKind::Onnx;
        assert!(matches!(create_backend(&config), Err(FieldscanError::Config(_))));
    }
}
