//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the fieldscan pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldscanConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Text generation service configuration.
    pub llm: LlmConfig,
}

/// Which OCR engine to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OcrBackendKind {
    /// External Tesseract executable.
    #[default]
    Tesseract,
    /// PaddleOCR models through `pure-onnx-ocr` (requires the `onnx` feature).
    Onnx,
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Engine to use.
    pub backend: OcrBackendKind,

    /// Path to the Tesseract executable.
    pub tesseract_path: PathBuf,

    /// Tesseract language pack(s), e.g. `eng` or `deu+eng`.
    pub language: String,

    /// OCR engine mode passed as `--oem` for binarized input.
    pub oem: u8,

    /// Page segmentation mode passed as `--psm` for binarized input.
    pub page_segmentation_mode: u8,

    /// Directory holding `det.onnx`, `latin_rec.onnx` and `latin_dict.txt`.
    pub model_dir: PathBuf,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            backend: OcrBackendKind::Tesseract,
            tesseract_path: default_tesseract_path(),
            language: "eng".to_string(),
            oem: 3,
            page_segmentation_mode: 6,
            model_dir: PathBuf::from("models"),
        }
    }
}

/// Platform default location of the Tesseract executable.
pub fn default_tesseract_path() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\Program Files\Tesseract-OCR\tesseract.exe")
    } else {
        PathBuf::from("tesseract")
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Path to the Poppler `pdftoppm` executable.
    pub pdftoppm_path: PathBuf,

    /// DPI for rendering PDF pages to images.
    pub render_dpi: u32,

    /// Maximum pages to process (0 = unlimited).
    pub max_pages: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            pdftoppm_path: PathBuf::from("pdftoppm"),
            render_dpi: 300,
            max_pages: 0,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Value written for a target field that no line mentions.
    pub na_sentinel: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            na_sentinel: "NA".to_string(),
        }
    }
}

/// Text generation service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Environment variable holding the API key.
    pub api_key_env: String,

    /// Model name.
    pub model: String,

    /// REST base URL.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GOOGLE_API_KEY".to_string(),
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 120,
        }
    }
}

impl FieldscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: FieldscanConfig =
            serde_json::from_str(r#"{"ocr": {"language": "deu+eng"}, "pdf": {"max_pages": 2}}"#)
                .unwrap();

        assert_eq!(config.ocr.language, "deu+eng");
        assert_eq!(config.ocr.page_segmentation_mode, 6);
        assert_eq!(config.ocr.tesseract_path, default_tesseract_path());
        assert_eq!(config.pdf.max_pages, 2);
        assert_eq!(config.pdf.render_dpi, 300);
        assert_eq!(config.extraction.na_sentinel, "NA");
        assert_eq!(config.llm.api_key_env, "GOOGLE_API_KEY");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = FieldscanConfig::default();
        config.ocr.backend = OcrBackendKind::Onnx;
        config.llm.model = "gemini-1.5-pro".to_string();
        config.save(&path).unwrap();

        let loaded = FieldscanConfig::from_file(&path).unwrap();
        assert_eq!(loaded.ocr.backend, OcrBackendKind::Onnx);
        assert_eq!(loaded.llm.model, "gemini-1.5-pro");
    }

    #[test]
    fn test_invalid_file_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FieldscanConfig::from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
