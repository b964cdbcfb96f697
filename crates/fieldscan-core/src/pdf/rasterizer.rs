//! Page rendering through Poppler's `pdftoppm`.

use std::path::{Path, PathBuf};
use std::process::Command;

use image::DynamicImage;
use tracing::{debug, info, warn};

use super::{PageRasterizer, Result, page_count};
use crate::error::PdfError;
use crate::models::config::PdfConfig;

const PAGE_PREFIX: &str = "page";

/// Renders PDF pages to PNG with an external `pdftoppm` binary.
#[derive(Debug, Clone)]
pub struct PdftoppmRasterizer {
    executable: PathBuf,
    dpi: u32,
    max_pages: usize,
}

impl PdftoppmRasterizer {
    /// Create a rasterizer for the executable at `executable`, rendering at 300 DPI.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            dpi: 300,
            max_pages: 0,
        }
    }

    /// Create a rasterizer from the PDF configuration.
    pub fn from_config(config: &PdfConfig) -> Self {
        Self::new(&config.pdftoppm_path)
            .with_dpi(config.render_dpi)
            .with_max_pages(config.max_pages)
    }

    /// Set the render resolution.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Limit the number of rendered pages (0 = all).
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    fn arguments(&self, input: &Path, output_prefix: &Path, last_page: u32) -> Vec<String> {
        vec![
            "-png".to_string(),
            "-r".to_string(),
            self.dpi.to_string(),
            "-f".to_string(),
            "1".to_string(),
            "-l".to_string(),
            last_page.to_string(),
            input.display().to_string(),
            output_prefix.display().to_string(),
        ]
    }

    fn pages_to_render(&self, total: u32) -> u32 {
        if self.max_pages == 0 {
            total
        } else {
            total.min(self.max_pages as u32)
        }
    }
}

impl PageRasterizer for PdftoppmRasterizer {
    fn rasterize(&self, data: &[u8]) -> Result<Vec<DynamicImage>> {
        let total = page_count(data)?;
        let last_page = self.pages_to_render(total);
        if last_page < total {
            warn!("Rendering only the first {} of {} pages", last_page, total);
        }

        let temp_dir = tempfile::tempdir()
            .map_err(|e| PdfError::Render(format!("failed to create temp dir: {}", e)))?;
        let input = temp_dir.path().join("input.pdf");
        std::fs::write(&input, data)
            .map_err(|e| PdfError::Render(format!("failed to write PDF: {}", e)))?;

        let prefix = temp_dir.path().join(PAGE_PREFIX);
        let args = self.arguments(&input, &prefix, last_page);
        debug!("Running {} {}", self.executable.display(), args.join(" "));

        let output = Command::new(&self.executable)
            .args(&args)
            .output()
            .map_err(|e| {
                PdfError::Render(format!(
                    "failed to launch '{}': {}",
                    self.executable.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(PdfError::Render(format!(
                "pdftoppm exited with {}: {}",
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let files = rendered_pages(temp_dir.path())?;
        if files.is_empty() {
            return Err(PdfError::Render("pdftoppm produced no images".to_string()));
        }

        let mut images = Vec::with_capacity(files.len());
        for (number, path) in files {
            let image = image::open(&path).map_err(|e| {
                PdfError::Render(format!("failed to read page {}: {}", number, e))
            })?;
            images.push(image);
        }

        info!("Rendered {} pages at {} DPI", images.len(), self.dpi);
        Ok(images)
    }
}

/// Rendered `page-N.png` files in `dir`, sorted by page number.
///
/// `pdftoppm` zero-pads the number to the width of the page count, so the
/// number is parsed rather than relying on name order.
fn rendered_pages(dir: &Path) -> Result<Vec<(u32, PathBuf)>> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| PdfError::Render(format!("failed to list rendered pages: {}", e)))?;

    let mut pages: Vec<(u32, PathBuf)> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("png"))
        .filter_map(|path| {
            let stem = path.file_stem()?.to_str()?;
            let number = stem.strip_prefix(PAGE_PREFIX)?.strip_prefix('-')?.parse().ok()?;
            Some((number, path))
        })
        .collect();

    pages.sort_by_key(|(number, _)| *number);
    Ok(pages)
}
