//! Text encoding of feature sets for storage.
//!
//! A feature set is stored as a JSON array of `[x, y]` pairs of unsigned
//! integers, e.g. `[[12,40],[13,41]]`. Decoding accepts exactly that shape:
//! anything else (objects, negative or fractional numbers, triples, trailing
//! text) is rejected.

use crate::features::FeatureSet;
use crate::util::{FingerMatchError, FingerMatchResult};

/// Encodes features as a compact coordinate-pair list.
pub fn encode_features(features: &FeatureSet) -> FingerMatchResult<String> {
    serde_json::to_string(features).map_err(|err| FingerMatchError::InvalidFeatureText {
        reason: err.to_string(),
    })
}

/// Parses a coordinate-pair list produced by [`encode_features`].
pub fn decode_features(text: &str) -> FingerMatchResult<FeatureSet> {
    serde_json::from_str(text).map_err(|err| FingerMatchError::InvalidFeatureText {
        reason: err.to_string(),
    })
}
