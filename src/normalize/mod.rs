//! Image normalization: grayscale decode, histogram equalization, smoothing
//! and Otsu binarization.
//!
//! Every stage returns a fresh `FingerprintImage`; all three intermediate
//! grids are kept so callers can store the grayscale and extract from the
//! binary one.

mod blur;
mod equalize;
mod threshold;

pub use blur::gaussian_blur;
pub use equalize::equalize_histogram;
pub use threshold::{binarize, otsu_threshold};

use crate::image::io::load_gray_image;
use crate::image::FingerprintImage;
use crate::trace::{trace_event, trace_span};
use crate::util::{FingerMatchError, FingerMatchResult};
use std::path::Path;

/// Smoothing parameters applied between equalization and thresholding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizeConfig {
    /// Odd Gaussian kernel size; `1` leaves the image untouched.
    pub blur_ksize: usize,
    /// Gaussian sigma; `0.0` derives it from the kernel size.
    pub blur_sigma: f32,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            blur_ksize: 1,
            blur_sigma: 0.0,
        }
    }
}

impl NormalizeConfig {
    /// Checks that the kernel size is odd and the sigma is usable.
    pub fn validate(&self) -> FingerMatchResult<()> {
        if self.blur_ksize == 0 || self.blur_ksize % 2 == 0 {
            return Err(FingerMatchError::InvalidInput(
                "blur_ksize must be an odd number >= 1",
            ));
        }
        if !self.blur_sigma.is_finite() || self.blur_sigma < 0.0 {
            return Err(FingerMatchError::InvalidInput(
                "blur_sigma must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

/// The three retained normalization stages.
#[derive(Clone, Debug)]
pub struct NormalizedImages {
    /// Decoded single-channel image, as stored.
    pub grayscale: FingerprintImage,
    /// Contrast-equalized image.
    pub equalized: FingerprintImage,
    /// Otsu-binarized image (`0` background, `255` foreground).
    pub binary: FingerprintImage,
}

/// Loads the image at `path` and runs the normalization chain.
///
/// Fails with `ImageNotFound` if the file cannot be decoded.
pub fn normalize<P: AsRef<Path>>(
    path: P,
    config: &NormalizeConfig,
) -> FingerMatchResult<NormalizedImages> {
    let path = path.as_ref();
    let _span = trace_span!("normalize", path = path.display().to_string().as_str()).entered();
    let grayscale = load_gray_image(path)?;
    normalize_image(grayscale, config)
}

/// Runs the normalization chain on an already decoded grayscale image.
pub fn normalize_image(
    grayscale: FingerprintImage,
    config: &NormalizeConfig,
) -> FingerMatchResult<NormalizedImages> {
    config.validate()?;
    let equalized = equalize_histogram(&grayscale);
    let smoothed = gaussian_blur(&equalized, config.blur_ksize, config.blur_sigma)?;
    let level = otsu_threshold(&smoothed)?;
    let binary = binarize(&smoothed, level);
    trace_event!(
        "normalized",
        width = grayscale.width(),
        height = grayscale.height(),
        otsu_level = level
    );
    Ok(NormalizedImages {
        grayscale,
        equalized,
        binary,
    })
}
