//! Input documents and the page → OCR line pipeline.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::{debug, info};

use crate::error::{DocumentError, Result};
use crate::ocr::{OcrBackend, OcrOptions, Preprocessing, split_lines};
use crate::pdf::PageRasterizer;

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// A single raster image (`.png`, `.jpg`, `.jpeg`).
    Image,
    /// A PDF whose pages are rendered before OCR.
    Pdf,
}

impl DocumentKind {
    /// Accepted file extensions, lowercase with leading dot.
    pub const EXTENSIONS: [&'static str; 4] = [".png", ".jpg", ".jpeg", ".pdf"];

    /// Determine the kind from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> std::result::Result<Self, DocumentError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "png" | "jpg" | "jpeg" => Ok(Self::Image),
            "pdf" => Ok(Self::Pdf),
            _ => Err(DocumentError::UnsupportedFormat(extension)),
        }
    }
}

/// A validated input file loaded into memory.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    path: PathBuf,
    kind: DocumentKind,
    data: Vec<u8>,
}

impl SourceDocument {
    /// Validate `path` without reading it.
    ///
    /// Checks existence first, then the extension.
    pub fn validate(path: &Path) -> std::result::Result<DocumentKind, DocumentError> {
        if !path.exists() {
            return Err(DocumentError::NotFound(path.display().to_string()));
        }
        DocumentKind::from_path(path)
    }

    /// Validate and read the file at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let kind = Self::validate(path)?;
        let data = std::fs::read(path)?;
        debug!("Read {} bytes from {}", data.len(), path.display());

        Ok(Self {
            path: path.to_path_buf(),
            kind,
            data,
        })
    }

    /// Source path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Document kind.
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Decode the document into page images, in page order.
    pub fn pages(&self, rasterizer: &dyn PageRasterizer) -> Result<Vec<DynamicImage>> {
        match self.kind {
            DocumentKind::Image => {
                let image = image::load_from_memory(&self.data)?;
                Ok(vec![image])
            }
            DocumentKind::Pdf => Ok(rasterizer.rasterize(&self.data)?),
        }
    }
}

/// Runs page images through preprocessing and OCR.
pub struct DocumentReader<'a> {
    rasterizer: &'a dyn PageRasterizer,
    ocr: &'a dyn OcrBackend,
    preprocessing: Preprocessing,
    options: OcrOptions,
}

impl<'a> DocumentReader<'a> {
    /// Create a reader with no preprocessing and engine-default options.
    pub fn new(rasterizer: &'a dyn PageRasterizer, ocr: &'a dyn OcrBackend) -> Self {
        Self {
            rasterizer,
            ocr,
            preprocessing: Preprocessing::None,
            options: OcrOptions::engine_defaults(),
        }
    }

    /// Set the preprocessing step.
    pub fn with_preprocessing(mut self, preprocessing: Preprocessing) -> Self {
        self.preprocessing = preprocessing;
        self
    }

    /// Set the OCR options.
    pub fn with_options(mut self, options: OcrOptions) -> Self {
        self.options = options;
        self
    }

    /// OCR lines of every page, page 1 first.
    pub fn read_lines(&self, document: &SourceDocument) -> Result<Vec<String>> {
        self.read_lines_with_progress(document, |_, _| {})
    }

    /// Like [`read_lines`](Self::read_lines), calling `progress(page, total)`
    /// before each page is recognized.
    pub fn read_lines_with_progress<F>(
        &self,
        document: &SourceDocument,
        mut progress: F,
    ) -> Result<Vec<String>>
    where
        F: FnMut(usize, usize),
    {
        let pages = document.pages(self.rasterizer)?;
        let total = pages.len();
        let mut lines = Vec::new();

        for (index, page) in pages.into_iter().enumerate() {
            progress(index + 1, total);

            let prepared = self.preprocessing.apply(page);
            let text = self.ocr.recognize(&prepared, &self.options)?;
            let page_lines = split_lines(&text);
            debug!("Page {}/{}: {} lines", index + 1, total, page_lines.len());

            lines.extend(page_lines);
        }

        info!(
            "Read {} lines from {} ({} pages)",
            lines.len(),
            document.path().display(),
            total
        );
        Ok(lines)
    }
}
