//! fingermatch extracts contour-based minutiae from grayscale fingerprint
//! images, keeps them in a SQLite store next to the source image, and scores
//! a reference fingerprint against everything stored.
//!
//! The matcher is deliberately coarse: two prints are compared by how many
//! boundary vertices each produced, not by where those vertices lie. Enable
//! the `tracing` feature to get spans and events for every pipeline stage.

pub mod features;
pub mod image;
pub mod lowlevel;
pub mod matcher;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod store;
mod trace;
pub mod util;

pub use features::{extract, ExtractConfig, FeatureSet, MinutiaPoint};
pub use image::FingerprintImage;
pub use matcher::{is_match, score, CardinalityScorer, Matcher, Scorer, Verdict};
pub use normalize::{normalize, normalize_image, NormalizeConfig, NormalizedImages};
pub use pipeline::{Comparison, EnrollSummary, Pipeline, PipelineConfig, Scan, Stage};
pub use report::{CollectingReporter, Reporter, ScanSummary};
pub use store::{FeatureStore, FingerprintRecord, StoreConfig, StoredRow};
pub use util::{FingerMatchError, FingerMatchResult};
