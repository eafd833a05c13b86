//! Low-level building blocks for custom pipelines.
//!
//! Most users should prefer [`crate::Pipeline`] or the top-level
//! `normalize`/`extract`/`FeatureStore` API.

pub use crate::features::codec::{decode_features, encode_features};
pub use crate::features::{polygon_area, simplify_closed_chain};
pub use crate::image::io::{decode_png, encode_png, from_gray_image, to_gray_image};
pub use crate::normalize::{binarize, equalize_histogram, gaussian_blur, otsu_threshold};
