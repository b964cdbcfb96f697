//! Core library for receipt and invoice field extraction.
//!
//! This crate provides:
//! - Document acquisition (images, PDF pages rendered with `pdftoppm`)
//! - Otsu binarization and OCR (Tesseract, or PaddleOCR models with `onnx`)
//! - Line-item parsing and targeted field matching over OCR lines
//! - Hybrid extraction with a Gemini text generation call
//! - Result tables written as CSV or JSON

pub mod document;
pub mod error;
pub mod extraction;
pub mod llm;
pub mod models;
pub mod ocr;
pub mod pdf;
pub mod table;

pub use document::{DocumentKind, DocumentReader, SourceDocument};
pub use error::{FieldscanError, Result};
pub use extraction::{FieldMatcher, Flow, match_fields, parse_item_line};
pub use llm::{GeminiClient, InferredReply, TextGenerator};
pub use models::{FieldMap, FieldscanConfig, ItemRecord};
pub use ocr::{OcrBackend, OcrOptions, TesseractEngine, create_backend};
pub use pdf::{PageRasterizer, PdftoppmRasterizer};
pub use table::ResultTable;
