//! Separable Gaussian smoothing with reflect-101 borders.

use crate::image::FingerprintImage;
use crate::util::{FingerMatchError, FingerMatchResult};

/// Smooths `img` with an odd `ksize` Gaussian kernel.
///
/// `sigma == 0.0` derives the spread from the kernel size. A kernel size of
/// `1` returns an identical copy.
pub fn gaussian_blur(
    img: &FingerprintImage,
    ksize: usize,
    sigma: f32,
) -> FingerMatchResult<FingerprintImage> {
    if ksize == 0 || ksize % 2 == 0 {
        return Err(FingerMatchError::InvalidInput(
            "gaussian kernel size must be odd",
        ));
    }
    if ksize == 1 {
        return Ok(img.clone());
    }

    let kernel = gaussian_kernel(ksize, sigma);
    let width = img.width();
    let height = img.height();
    let radius = (ksize / 2) as isize;
    let src = img.data();

    let mut horizontal = vec![0f32; src.len()];
    for y in 0..height {
        let row = &src[y * width..(y + 1) * width];
        for x in 0..width {
            let mut acc = 0f32;
            for (k, weight) in kernel.iter().enumerate() {
                let sx = reflect101(x as isize + k as isize - radius, width);
                acc += weight * row[sx] as f32;
            }
            horizontal[y * width + x] = acc;
        }
    }

    let mut out = vec![0u8; src.len()];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0f32;
            for (k, weight) in kernel.iter().enumerate() {
                let sy = reflect101(y as isize + k as isize - radius, height);
                acc += weight * horizontal[sy * width + x];
            }
            out[y * width + x] = acc.round().clamp(0.0, 255.0) as u8;
        }
    }

    FingerprintImage::new(out, width, height)
}

fn gaussian_kernel(ksize: usize, sigma: f32) -> Vec<f32> {
    let sigma = if sigma > 0.0 {
        sigma
    } else {
        0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
    };
    let center = (ksize / 2) as f32;
    let mut kernel: Vec<f32> = (0..ksize)
        .map(|i| {
            let d = i as f32 - center;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f32 = kernel.iter().sum();
    for w in kernel.iter_mut() {
        *w /= sum;
    }
    kernel
}

fn reflect101(mut i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let n = len as isize;
    loop {
        if i < 0 {
            i = -i;
        } else if i >= n {
            i = 2 * n - 2 - i;
        } else {
            return i as usize;
        }
    }
}
