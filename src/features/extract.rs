//! Outer-contour tracing and minutia emission.

use crate::features::polygon::{polygon_area, simplify_closed_chain};
use crate::features::{FeatureSet, MinutiaPoint};
use crate::image::io::to_gray_image;
use crate::image::FingerprintImage;
use crate::trace::{trace_event, trace_span};
use crate::util::{FingerMatchError, FingerMatchResult};
use image::imageops::replace;
use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};

/// Contour filtering policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtractConfig {
    /// Boundaries enclosing this area or less (square pixels) are treated as noise.
    pub min_area: f64,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { min_area: 50.0 }
    }
}

/// Extracts minutiae from a binary image.
///
/// Only outermost boundaries of non-zero blobs are traced; holes and blobs
/// nested inside holes are ignored. Pixels outside the image count as
/// background, so blobs touching the edge are outer boundaries too. Each boundary is reduced to its corner
/// vertices and kept when its polygon area exceeds `config.min_area`.
/// Boundaries appear in raster discovery order, vertices in trace order.
pub fn extract(binary: &FingerprintImage, config: &ExtractConfig) -> FingerMatchResult<FeatureSet> {
    if !config.min_area.is_finite() || config.min_area < 0.0 {
        return Err(FingerMatchError::InvalidInput(
            "min_area must be finite and non-negative",
        ));
    }
    let _span = trace_span!("extract", width = binary.width(), height = binary.height()).entered();

    let gray = to_gray_image(binary)?;
    // Zero frame: the tracer treats the edge itself as a border otherwise.
    let mut framed = GrayImage::new(gray.width() + 2, gray.height() + 2);
    replace(&mut framed, &gray, 1, 1);
    let contours = find_contours::<i64>(&framed);

    let mut features = FeatureSet::new();
    let mut traced = 0usize;
    let mut kept = 0usize;
    for contour in contours
        .iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
    {
        traced += 1;
        let chain: Vec<(i64, i64)> = contour
            .points
            .iter()
            .map(|p| (p.x - 1, p.y - 1))
            .collect();
        let polygon = simplify_closed_chain(&chain);
        if polygon_area(&polygon) <= config.min_area {
            continue;
        }
        kept += 1;
        features.extend(polygon.into_iter().filter_map(|(x, y)| {
            Some(MinutiaPoint::new(u32::try_from(x).ok()?, u32::try_from(y).ok()?))
        }));
    }

    trace_event!(
        "extracted",
        contours = traced,
        kept = kept,
        minutiae = features.len()
    );
    Ok(features)
}
