//! Otsu global thresholding.

use crate::image::io::to_gray_image;
use crate::image::FingerprintImage;
use crate::util::FingerMatchResult;

/// Picks the global level that maximizes between-class variance.
pub fn otsu_threshold(img: &FingerprintImage) -> FingerMatchResult<u8> {
    let gray = to_gray_image(img)?;
    Ok(imageproc::contrast::otsu_level(&gray))
}

/// Maps samples above `level` to `255` and the rest to `0`.
pub fn binarize(img: &FingerprintImage, level: u8) -> FingerprintImage {
    img.map(|v| if v > level { 255 } else { 0 })
}
