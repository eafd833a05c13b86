//! Consumers of scan results.
//!
//! The scan only produces [`Comparison`] values; styling, JSON output or
//! writing matched images to disk live behind [`Reporter`].

use crate::pipeline::Comparison;
use crate::util::FingerMatchError;

/// Receives each scan result as it is produced.
pub trait Reporter {
    /// Called for every scored record.
    fn comparison(&mut self, comparison: &Comparison);

    /// Called for a record that could not be decoded and was skipped.
    fn skipped(&mut self, _error: &FingerMatchError) {}

    /// Called once after the last record.
    fn finish(&mut self, _summary: &ScanSummary) {}
}

/// Counts gathered while draining a scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub matches: usize,
    pub non_matches: usize,
    pub skipped: usize,
}

impl ScanSummary {
    pub fn compared(&self) -> usize {
        self.matches + self.non_matches
    }

    pub(crate) fn record(&mut self, comparison: &Comparison) {
        if comparison.is_match {
            self.matches += 1;
        } else {
            self.non_matches += 1;
        }
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn comparison(&mut self, comparison: &Comparison) {
        (**self).comparison(comparison);
    }

    fn skipped(&mut self, error: &FingerMatchError) {
        (**self).skipped(error);
    }

    fn finish(&mut self, summary: &ScanSummary) {
        (**self).finish(summary);
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn comparison(&mut self, comparison: &Comparison) {
        (**self).comparison(comparison);
    }

    fn skipped(&mut self, error: &FingerMatchError) {
        (**self).skipped(error);
    }

    fn finish(&mut self, summary: &ScanSummary) {
        (**self).finish(summary);
    }
}

impl<R: Reporter> Reporter for Vec<R> {
    fn comparison(&mut self, comparison: &Comparison) {
        for reporter in self.iter_mut() {
            reporter.comparison(comparison);
        }
    }

    fn skipped(&mut self, error: &FingerMatchError) {
        for reporter in self.iter_mut() {
            reporter.skipped(error);
        }
    }

    fn finish(&mut self, summary: &ScanSummary) {
        for reporter in self.iter_mut() {
            reporter.finish(summary);
        }
    }
}

/// Collects everything in memory; handy for tests and batch callers.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    pub comparisons: Vec<Comparison>,
    pub skipped: Vec<FingerMatchError>,
    pub summary: Option<ScanSummary>,
}

impl Reporter for CollectingReporter {
    fn comparison(&mut self, comparison: &Comparison) {
        self.comparisons.push(comparison.clone());
    }

    fn skipped(&mut self, error: &FingerMatchError) {
        self.skipped.push(error.clone());
    }

    fn finish(&mut self, summary: &ScanSummary) {
        self.summary = Some(*summary);
    }
}
