//! Error types for fingermatch.

use thiserror::Error;

/// Result alias for fingermatch operations.
pub type FingerMatchResult<T> = std::result::Result<T, FingerMatchError>;

/// Errors that can occur while normalizing, extracting, storing or matching.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FingerMatchError {
    /// The image at `path` could not be read or decoded into a grayscale grid.
    #[error("image not found: {path}: {reason}")]
    ImageNotFound { path: String, reason: String },
    /// A stored record could not be decoded back into features or pixels.
    #[error("cannot decode stored record {name:?}: {reason}")]
    Decode { name: String, reason: String },
    /// The store is unreachable or a statement failed.
    #[error("storage error: {0}")]
    Storage(String),
    /// An image could not be encoded for storage.
    #[error("cannot encode image: {reason}")]
    Encode { reason: String },
    /// Feature text did not follow the coordinate-list grammar.
    #[error("invalid feature text: {reason}")]
    InvalidFeatureText { reason: String },
    /// Image dimensions are zero or overflow.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Backing buffer is shorter than the dimensions require.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// The input data or parameters are invalid.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}

impl FingerMatchError {
    /// Returns `false` for errors confined to a single stored record.
    ///
    /// A scan reports and skips non-fatal errors; everything else aborts the run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, FingerMatchError::Decode { .. })
    }
}

impl From<sqlx::Error> for FingerMatchError {
    fn from(err: sqlx::Error) -> Self {
        FingerMatchError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for FingerMatchError {
    fn from(err: std::io::Error) -> Self {
        FingerMatchError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::FingerMatchError;

    #[test]
    fn decode_errors_are_not_fatal() {
        let err = FingerMatchError::Decode {
            name: "a.tif".into(),
            reason: "bad png".into(),
        };
        assert!(!err.is_fatal());
        assert!(FingerMatchError::Storage("gone".into()).is_fatal());
    }

    #[test]
    fn image_not_found_names_the_path() {
        let err = FingerMatchError::ImageNotFound {
            path: "data/102_5.tif".into(),
            reason: "No such file or directory".into(),
        };
        assert!(err.to_string().contains("data/102_5.tif"));
    }
}
