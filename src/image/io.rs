//! Conversions between `FingerprintImage` and the `image` crate, plus the
//! PNG codec used for stored records.

use crate::image::FingerprintImage;
use crate::util::{FingerMatchError, FingerMatchResult};
use image::{DynamicImage, GrayImage, ImageFormat};
use std::io::Cursor;
use std::path::Path;

/// Creates an owned image from a grayscale image buffer.
pub fn from_gray_image(img: &GrayImage) -> FingerMatchResult<FingerprintImage> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    FingerprintImage::new(img.as_raw().clone(), width, height)
}

/// Creates a grayscale image buffer for use with `image`/`imageproc`.
pub fn to_gray_image(img: &FingerprintImage) -> FingerMatchResult<GrayImage> {
    let width = u32::try_from(img.width()).map_err(|_| FingerMatchError::InvalidDimensions {
        width: img.width(),
        height: img.height(),
    })?;
    let height = u32::try_from(img.height()).map_err(|_| FingerMatchError::InvalidDimensions {
        width: img.width(),
        height: img.height(),
    })?;
    GrayImage::from_raw(width, height, img.data().to_vec()).ok_or(
        FingerMatchError::BufferTooSmall {
            needed: img.width() * img.height(),
            got: img.data().len(),
        },
    )
}

/// Loads an image from disk and converts it to single-channel grayscale.
///
/// Any read or decode failure is reported as `ImageNotFound`.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> FingerMatchResult<FingerprintImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|err| FingerMatchError::ImageNotFound {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;
    decoded_to_owned(path, &img.to_luma8())
}

/// A decoded but unusable raster (e.g. zero-sized) is reported like a missing one.
fn decoded_to_owned(path: &Path, img: &GrayImage) -> FingerMatchResult<FingerprintImage> {
    from_gray_image(img).map_err(|err| FingerMatchError::ImageNotFound {
        path: path.display().to_string(),
        reason: err.to_string(),
    })
}

/// Writes an image to disk; the format follows the file extension.
pub fn save_gray_image<P: AsRef<Path>>(img: &FingerprintImage, path: P) -> FingerMatchResult<()> {
    to_gray_image(img)?
        .save(path.as_ref())
        .map_err(|err| FingerMatchError::Encode {
            reason: err.to_string(),
        })
}

/// Encodes an image as an 8-bit grayscale PNG.
pub fn encode_png(img: &FingerprintImage) -> FingerMatchResult<Vec<u8>> {
    let gray = to_gray_image(img)?;
    let mut bytes = Vec::new();
    DynamicImage::ImageLuma8(gray)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|err| FingerMatchError::Encode {
            reason: err.to_string(),
        })?;
    Ok(bytes)
}

/// Decodes PNG bytes back into a grayscale image.
///
/// The error carries only the codec reason; callers attach the record name.
pub fn decode_png(bytes: &[u8]) -> Result<FingerprintImage, String> {
    let img = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(|err| err.to_string())?;
    from_gray_image(&img.to_luma8()).map_err(|err| err.to_string())
}
