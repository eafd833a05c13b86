//! Minutia points and contour-based feature extraction.
//!
//! A "minutia" here is a corner of the simplified outer boundary of a blob
//! in the binary image, not a ridge ending or bifurcation.

pub mod codec;
mod extract;
mod polygon;

pub use extract::{extract, ExtractConfig};
pub use polygon::{polygon_area, simplify_closed_chain};

use serde::{Deserialize, Serialize};

/// Integer pixel coordinate of a boundary vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct MinutiaPoint {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

impl MinutiaPoint {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl From<(u32, u32)> for MinutiaPoint {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

impl From<MinutiaPoint> for (u32, u32) {
    fn from(p: MinutiaPoint) -> Self {
        (p.x, p.y)
    }
}

/// Ordered collection of minutiae extracted from one image.
///
/// Order carries no meaning for matching but is kept through storage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSet {
    points: Vec<MinutiaPoint>,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of points, duplicates included.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[MinutiaPoint] {
        &self.points
    }

    pub fn push(&mut self, point: MinutiaPoint) {
        self.points.push(point);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MinutiaPoint> {
        self.points.iter()
    }
}

impl From<Vec<MinutiaPoint>> for FeatureSet {
    fn from(points: Vec<MinutiaPoint>) -> Self {
        Self { points }
    }
}

impl FromIterator<MinutiaPoint> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = MinutiaPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl Extend<MinutiaPoint> for FeatureSet {
    fn extend<I: IntoIterator<Item = MinutiaPoint>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

impl<'a> IntoIterator for &'a FeatureSet {
    type Item = &'a MinutiaPoint;
    type IntoIter = std::slice::Iter<'a, MinutiaPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
