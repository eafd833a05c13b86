//! Histogram equalization.

use crate::image::FingerprintImage;

/// Spreads the cumulative intensity distribution over the full `0..=255` range.
///
/// The darkest occupied level maps to `0` and the brightest to `255`. A
/// constant image is returned unchanged.
pub fn equalize_histogram(img: &FingerprintImage) -> FingerprintImage {
    let mut hist = [0u64; 256];
    for &v in img.data() {
        hist[v as usize] += 1;
    }
    let total = img.data().len() as u64;

    let Some(first) = hist.iter().position(|&count| count > 0) else {
        return img.clone();
    };
    if hist[first] == total {
        return img.clone();
    }

    let scale = 255.0 / (total - hist[first]) as f64;
    let mut lut = [0u8; 256];
    let mut cumulative = 0u64;
    for level in (first + 1)..256 {
        cumulative += hist[level];
        lut[level] = (cumulative as f64 * scale).round().clamp(0.0, 255.0) as u8;
    }

    img.map(|v| lut[v as usize])
}
