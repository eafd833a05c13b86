//! One-shot reference scan: normalize, extract, store, then score the
//! reference against every stored fingerprint.
//!
//! The run moves through `Init -> ReferenceProcessed -> StoredReference ->
//! Scored -> Done` without looping back. Anything failing before the scan
//! starts aborts the run with a single error; during the scan, a record that
//! cannot be decoded is yielded as an error and the scan continues.

use crate::features::{extract, ExtractConfig, FeatureSet};
use crate::image::FingerprintImage;
use crate::matcher::{Matcher, DEFAULT_THRESHOLD};
use crate::normalize::{normalize, NormalizeConfig};
use crate::report::{Reporter, ScanSummary};
use crate::store::{FeatureStore, StoreConfig, StoredRow};
use crate::trace::{trace_event, trace_span, trace_warn};
use crate::util::{FingerMatchError, FingerMatchResult};
use std::path::PathBuf;

/// Inputs of a reference scan.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    /// Directory holding the fingerprint images.
    pub dataset_dir: PathBuf,
    /// File name of the reference image inside `dataset_dir`; also its store key.
    pub reference_name: String,
    /// Scores strictly below this value count as matches.
    pub threshold: u64,
    pub store: StoreConfig,
    pub normalize: NormalizeConfig,
    pub extract: ExtractConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dataset_dir: PathBuf::from("fingerprint_dataset/"),
            reference_name: "102_5.tif".to_string(),
            threshold: DEFAULT_THRESHOLD,
            store: StoreConfig::default(),
            normalize: NormalizeConfig::default(),
            extract: ExtractConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Full path of the reference image.
    pub fn reference_path(&self) -> PathBuf {
        self.dataset_dir.join(&self.reference_name)
    }
}

/// Progress of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Init,
    ReferenceProcessed,
    StoredReference,
    Scored,
    Done,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Init => "init",
            Stage::ReferenceProcessed => "reference_processed",
            Stage::StoredReference => "stored_reference",
            Stage::Scored => "scored",
            Stage::Done => "done",
        }
    }
}

/// Result of scoring one stored record against the reference.
#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    pub id: i64,
    pub name: String,
    pub score: u64,
    pub is_match: bool,
    pub minutiae: usize,
    /// Stored grayscale image, for viewers and exporters.
    pub image: FingerprintImage,
}

/// Outcome of enrolling a dataset directory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnrollSummary {
    /// Names stored, in processing order.
    pub enrolled: Vec<String>,
    /// Files that could not be decoded as images or have no UTF-8 name.
    pub skipped: Vec<FingerMatchError>,
}

/// Wires the normalizer, extractor, store and matcher together.
pub struct Pipeline {
    config: PipelineConfig,
    matcher: Matcher,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let matcher = Matcher::new(config.threshold);
        Self { config, matcher }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs the reference flow and returns the lazy scan over stored records.
    ///
    /// The store is opened for the duration of this call only; the returned
    /// scan owns the fetched rows and decodes them one by one.
    pub fn run(&self) -> FingerMatchResult<Scan> {
        let _span = trace_span!("run", reference = self.config.reference_name.as_str()).entered();

        let stage = Stage::Init;
        trace_event!("stage", stage = stage.as_str());
        let store = FeatureStore::open(&self.config.store)?;
        store.ensure_schema()?;

        let (features, grayscale) = self.process(&self.config.reference_path())?;
        let stage = Stage::ReferenceProcessed;
        trace_event!("stage", stage = stage.as_str(), minutiae = features.len());

        store.put(&self.config.reference_name, &features, &grayscale)?;
        let stage = Stage::StoredReference;
        trace_event!("stage", stage = stage.as_str());

        let rows = store.scan()?;
        store.close();
        let stage = Stage::Scored;
        trace_event!("stage", stage = stage.as_str(), records = rows.len());

        Ok(Scan {
            reference_name: self.config.reference_name.clone(),
            reference: features,
            matcher: self.matcher.clone(),
            rows: rows.into_iter(),
            stage,
        })
    }

    /// Normalizes, extracts and stores every image file in the dataset directory.
    ///
    /// Files are visited in name order. Files that are not decodable images are
    /// collected in the summary instead of failing the whole enrollment.
    pub fn enroll_dataset(&self) -> FingerMatchResult<EnrollSummary> {
        let _span = trace_span!("enroll").entered();
        let mut paths: Vec<PathBuf> = std::fs::read_dir(&self.config.dataset_dir)
            .map_err(|err| FingerMatchError::ImageNotFound {
                path: self.config.dataset_dir.display().to_string(),
                reason: err.to_string(),
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file())
            .collect();
        paths.sort();

        let store = FeatureStore::open(&self.config.store)?;
        store.ensure_schema()?;

        let mut summary = EnrollSummary::default();
        for path in paths {
            let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_owned) else {
                trace_warn!("enroll_skipped", file = path.display().to_string().as_str());
                summary.skipped.push(FingerMatchError::ImageNotFound {
                    path: path.display().to_string(),
                    reason: "file name is not valid UTF-8".to_string(),
                });
                continue;
            };
            match self.process(&path) {
                Ok((features, grayscale)) => {
                    store.put(&name, &features, &grayscale)?;
                    summary.enrolled.push(name);
                }
                Err(err @ FingerMatchError::ImageNotFound { .. }) => {
                    trace_warn!("enroll_skipped", file = name.as_str());
                    summary.skipped.push(err);
                }
                Err(err) => return Err(err),
            }
        }
        trace_event!(
            "enrolled",
            count = summary.enrolled.len(),
            skipped = summary.skipped.len()
        );
        Ok(summary)
    }

    fn process(&self, path: &std::path::Path) -> FingerMatchResult<(FeatureSet, FingerprintImage)> {
        let images = normalize(path, &self.config.normalize)?;
        let features = extract(&images.binary, &self.config.extract)?;
        Ok((features, images.grayscale))
    }
}

/// Lazy sequence of comparisons against the reference.
///
/// Records stored under the reference's own name are skipped. A record that
/// fails to decode is yielded as `Err(Decode)` and the scan moves on.
pub struct Scan {
    reference_name: String,
    reference: FeatureSet,
    matcher: Matcher,
    rows: std::vec::IntoIter<StoredRow>,
    stage: Stage,
}

impl Scan {
    /// Features extracted from the reference image.
    pub fn reference(&self) -> &FeatureSet {
        &self.reference
    }

    pub fn reference_name(&self) -> &str {
        &self.reference_name
    }

    pub fn threshold(&self) -> u64 {
        self.matcher.threshold()
    }

    /// `Scored` while records remain, `Done` once the scan is exhausted.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Drains the scan into `reporter` and returns the counts.
    pub fn report_to<R: Reporter>(self, mut reporter: R) -> ScanSummary {
        let mut summary = ScanSummary::default();
        for result in self {
            match result {
                Ok(comparison) => {
                    summary.record(&comparison);
                    reporter.comparison(&comparison);
                }
                Err(err) => {
                    summary.skipped += 1;
                    reporter.skipped(&err);
                }
            }
        }
        reporter.finish(&summary);
        summary
    }
}

impl Iterator for Scan {
    type Item = FingerMatchResult<Comparison>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(row) = self.rows.next() else {
                if self.stage != Stage::Done {
                    self.stage = Stage::Done;
                    trace_event!("stage", stage = self.stage.as_str());
                }
                return None;
            };
            if row.name == self.reference_name {
                continue;
            }
            let record = match row.decode() {
                Ok(record) => record,
                Err(err) => {
                    trace_warn!("record_skipped", reason = err.to_string().as_str());
                    return Some(Err(err));
                }
            };
            let verdict = self.matcher.compare(&self.reference, &record.features);
            trace_event!(
                "compared",
                id = record.id,
                score = verdict.score,
                is_match = verdict.is_match
            );
            return Some(Ok(Comparison {
                id: record.id,
                name: record.name,
                score: verdict.score,
                is_match: verdict.is_match,
                minutiae: record.features.len(),
                image: record.image,
            }));
        }
    }
}
