//! Error types for the fieldscan-core library.

use thiserror::Error;

/// Main error type for the fieldscan library.
#[derive(Error, Debug)]
pub enum FieldscanError {
    /// Input document error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Text generation service error.
    #[error("text generation error: {0}")]
    Llm(#[from] LlmError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// CSV output error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to the input document itself.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The input file does not exist.
    #[error("File not found: {0}")]
    NotFound(String),

    /// The file extension is not one of the supported formats.
    #[error("unsupported file format '{0}' (supported: .png, .jpg, .jpeg, .pdf)")]
    UnsupportedFormat(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Rasterizing pages to images failed.
    #[error("failed to render pages: {0}")]
    Render(String),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The OCR engine could not be started.
    #[error("failed to launch OCR engine '{path}': {reason}")]
    Launch { path: String, reason: String },

    /// The OCR engine ran but reported a failure.
    #[error("OCR engine failed (exit code {code}): {stderr}")]
    Engine { code: i32, stderr: String },

    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Image preprocessing failed.
    #[error("preprocessing failed: {0}")]
    Preprocessing(String),
}

/// Errors related to field extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// No target fields were supplied.
    #[error("No fields provided")]
    NoFields,

    /// Nothing could be extracted from the document.
    #[error("No data extracted")]
    NoData,
}

/// Errors raised by the text generation service.
#[derive(Error, Debug)]
pub enum LlmError {
    /// The API credential is not configured.
    #[error("API key not found (set {0} in the environment or a .env file)")]
    MissingApiKey(String),

    /// HTTP transport error.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The reply contained no text.
    #[error("Empty response from text generation service")]
    EmptyResponse,

    /// The reply could not be parsed as JSON.
    #[error("invalid JSON in reply: {0}")]
    InvalidJson(String),
}

/// Result type for the fieldscan library.
pub type Result<T> = std::result::Result<T, FieldscanError>;
