//! Tesseract OCR through its command-line executable.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::OcrConfig;

use super::{OcrBackend, OcrOptions};

/// OCR engine invoking an external `tesseract` binary.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    executable: PathBuf,
    language: String,
}

impl TesseractEngine {
    /// Create an engine for the executable at `executable`.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            language: "eng".to_string(),
        }
    }

    /// Create an engine from the OCR configuration.
    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new(&config.tesseract_path).with_language(&config.language)
    }

    /// Set the language pack(s).
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Command-line arguments for recognizing `input`.
    fn arguments(&self, input: &Path, options: &OcrOptions) -> Vec<String> {
        let mut args = vec![
            input.display().to_string(),
            "stdout".to_string(),
            "-l".to_string(),
            self.language.clone(),
        ];
        if let Some(oem) = options.engine_mode {
            args.push("--oem".to_string());
            args.push(oem.to_string());
        }
        if let Some(psm) = options.page_segmentation_mode {
            args.push("--psm".to_string());
            args.push(psm.to_string());
        }
        args
    }
}

impl OcrBackend for TesseractEngine {
    fn recognize(&self, image: &DynamicImage, options: &OcrOptions) -> Result<String, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();

        // Tesseract reads from a file, so stage the page as PNG
        let temp_dir = tempfile::tempdir()
            .map_err(|e| OcrError::Preprocessing(format!("failed to create temp dir: {}", e)))?;
        let input = temp_dir.path().join("page.png");
        image
            .save(&input)
            .map_err(|e| OcrError::Preprocessing(format!("failed to write page image: {}", e)))?;

        let args = self.arguments(&input, options);
        debug!("Running {} {}", self.executable.display(), args.join(" "));

        let output = Command::new(&self.executable)
            .args(&args)
            .output()
            .map_err(|e| OcrError::Launch {
                path: self.executable.display().to_string(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(OcrError::Engine {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();

        info!(
            "OCR complete: {}x{} image, {} chars in {}ms",
            width,
            height,
            text.len(),
            start.elapsed().as_millis()
        );

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_arguments_with_engine_defaults() {
        let engine = TesseractEngine::new("tesseract");
        let args = engine.arguments(Path::new("page.png"), &OcrOptions::engine_defaults());
        assert_eq!(args, vec!["page.png", "stdout", "-l", "eng"]);
    }

    #[test]
    fn test_arguments_for_binarized_page() {
        let mut config = OcrConfig::default();
        config.language = "deu+eng".to_string();
        let engine = TesseractEngine::from_config(&config);

        let args = engine.arguments(Path::new("page.png"), &OcrOptions::for_binarized(&config));
        assert_eq!(
            args,
            vec!["page.png", "stdout", "-l", "deu+eng", "--oem", "3", "--psm", "6"]
        );
    }

    #[test]
    fn test_missing_executable_is_launch_error() {
        let engine = TesseractEngine::new("/nonexistent/fieldscan-tesseract");
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([255, 255, 255])));

        let err = engine
            .recognize(&image, &OcrOptions::engine_defaults())
            .unwrap_err();
        assert!(matches!(err, OcrError::Launch { .. }));
    }
}
