//! Owned grayscale image buffers.
//!
//! `FingerprintImage` is the contiguous row-major buffer every normalization
//! stage produces.

use crate::util::{FingerMatchError, FingerMatchResult};

pub mod io;

/// Owned contiguous 8-bit grayscale image.
///
/// Used for the raw, equalized and binary stages alike; binary images hold
/// only `0` and `255`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FingerprintImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl FingerprintImage {
    /// Creates an image from a row-major buffer of exactly `width * height` samples.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> FingerMatchResult<Self> {
        if width == 0 || height == 0 {
            return Err(FingerMatchError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .ok_or(FingerMatchError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(FingerMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(FingerMatchError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates an image with every sample set to `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> FingerMatchResult<Self> {
        let len = width
            .checked_mul(height)
            .ok_or(FingerMatchError::InvalidDimensions { width, height })?;
        Self::new(vec![value; len], width, height)
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the row-major sample buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the sample at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Sets the sample at `(x, y)`; out-of-bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = value;
        }
    }

    /// Returns a new image with `f` applied to every sample.
    pub fn map(&self, f: impl Fn(u8) -> u8) -> Self {
        Self {
            data: self.data.iter().map(|&v| f(v)).collect(),
            width: self.width,
            height: self.height,
        }
    }
}
