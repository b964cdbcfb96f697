//! PDF inspection and page rasterization.

mod rasterizer;

pub use rasterizer::PdftoppmRasterizer;

use image::DynamicImage;
use lopdf::Document;
use tracing::debug;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for turning PDF bytes into page images.
pub trait PageRasterizer {
    /// Render every page, in page order.
    fn rasterize(&self, data: &[u8]) -> Result<Vec<DynamicImage>>;
}

/// Parse the PDF and return its page count.
///
/// Fails on unparseable input, on encryption that an empty password does not
/// open, and on documents without pages.
pub fn page_count(data: &[u8]) -> Result<u32> {
    let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

    if doc.is_encrypted() {
        if doc.decrypt("").is_err() {
            return Err(PdfError::Encrypted);
        }
        debug!("Decrypted PDF with empty password");
    }

    let pages = doc.get_pages().len() as u32;
    if pages == 0 {
        return Err(PdfError::NoPages);
    }

    debug!("PDF has {} pages", pages);
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;
    use lopdf::{Object, Stream};

    /// Build a minimal PDF with `pages` blank pages.
    pub(crate) fn blank_pdf(pages: usize) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let kids: Vec<Object> = (0..pages)
            .map(|_| {
                let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
                doc.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => pages_id,
                    "Contents" => content_id,
                    "MediaBox" => vec![0.into(), 0.into(), 200.into(), 100.into()],
                })
                .into()
            })
            .collect();

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => pages as i64,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut data = Vec::new();
        doc.save_to(&mut data).unwrap();
        data
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(&blank_pdf(2)).unwrap(), 2);
    }

    #[test]
    fn test_empty_pdf_has_no_pages() {
        assert!(matches!(page_count(&blank_pdf(0)), Err(PdfError::NoPages)));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        assert!(matches!(page_count(b"not a pdf"), Err(PdfError::Parse(_))));
    }
}
