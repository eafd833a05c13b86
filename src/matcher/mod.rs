//! Feature-set similarity and match classification.
//!
//! The baseline score is the absolute difference of the two point counts.
//! It ignores where the points are and only reflects how many were found,
//! so it is a coarse placeholder. A spatial scorer (alignment followed by
//! nearest-neighbour correspondence counting) would plug in through
//! [`Scorer`].

use crate::features::FeatureSet;

/// Default classification threshold.
pub const DEFAULT_THRESHOLD: u64 = 100;

/// Dissimilarity between two feature sets; `0` means indistinguishable.
pub trait Scorer {
    fn score(&self, a: &FeatureSet, b: &FeatureSet) -> u64;
}

/// Scores by `|count(a) - count(b)|`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CardinalityScorer;

impl Scorer for CardinalityScorer {
    fn score(&self, a: &FeatureSet, b: &FeatureSet) -> u64 {
        score(a, b)
    }
}

/// Absolute difference between the two feature counts.
pub fn score(a: &FeatureSet, b: &FeatureSet) -> u64 {
    (a.len() as u64).abs_diff(b.len() as u64)
}

/// A pair matches when its score is strictly below the threshold.
pub fn is_match(score: u64, threshold: u64) -> bool {
    score < threshold
}

/// Outcome of comparing one pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub score: u64,
    pub is_match: bool,
}

/// A scorer bound to a threshold.
#[derive(Clone, Debug)]
pub struct Matcher<S = CardinalityScorer> {
    scorer: S,
    threshold: u64,
}

impl Matcher<CardinalityScorer> {
    /// Cardinality matcher with the given threshold.
    pub fn new(threshold: u64) -> Self {
        Self::with_scorer(CardinalityScorer, threshold)
    }
}

impl Default for Matcher<CardinalityScorer> {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl<S: Scorer> Matcher<S> {
    pub fn with_scorer(scorer: S, threshold: u64) -> Self {
        Self { scorer, threshold }
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Scores `candidate` against `reference` and classifies the pair.
    pub fn compare(&self, reference: &FeatureSet, candidate: &FeatureSet) -> Verdict {
        let score = self.scorer.score(reference, candidate);
        Verdict {
            score,
            is_match: is_match(score, self.threshold),
        }
    }
}
