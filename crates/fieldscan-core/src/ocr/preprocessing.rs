//! Image preprocessing for OCR.

use image::{DynamicImage, GrayImage};
use imageproc::contrast::{ThresholdType, otsu_level, threshold};
use tracing::debug;

/// How a page image is prepared before recognition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preprocessing {
    /// OCR the decoded page as-is.
    #[default]
    None,
    /// Grayscale plus Otsu binarization.
    Binarize,
}

impl Preprocessing {
    /// Apply this preprocessing step to `image`.
    pub fn apply(self, image: DynamicImage) -> DynamicImage {
        match self {
            Self::None => image,
            Self::Binarize => DynamicImage::ImageLuma8(binarize(&image)),
        }
    }
}

/// Convert to grayscale and threshold at the Otsu level.
///
/// Pixels above the level become white, the rest black.
pub fn binarize(image: &DynamicImage) -> GrayImage {
    let gray = image.to_luma8();
    let level = otsu_level(&gray);
    debug!(
        "Binarizing {}x{} image at Otsu level {}",
        gray.width(),
        gray.height(),
        level
    );
    threshold(&gray, level, ThresholdType::Binary)
}
