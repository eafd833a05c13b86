//! Reporters that turn scan results into terminal lines, JSON, or PNG files.

use fingermatch::image::io::save_gray_image;
use fingermatch::{Comparison, EnrollSummary, FingerMatchError, Reporter, ScanSummary};
use serde::Serialize;
use std::path::PathBuf;

const GREEN: &str = "\x1b[92m";
const WHITE: &str = "\x1b[97m";
const RESET: &str = "\x1b[0m";

/// Plain classification line for one comparison.
pub fn format_line(comparison: &Comparison) -> String {
    let verdict = if comparison.is_match {
        "match"
    } else {
        "no match"
    };
    format!(
        "{} — {}: {}, score {}",
        comparison.id, comparison.name, verdict, comparison.score
    )
}

/// Summary line plus one line per skipped dataset file.
pub fn enrollment_lines(summary: &EnrollSummary) -> Vec<String> {
    let mut lines = vec![format!(
        "enrolled {} images, skipped {}",
        summary.enrolled.len(),
        summary.skipped.len()
    )];
    lines.extend(summary.skipped.iter().map(|err| format!("skipped: {err}")));
    lines
}

/// Prints one line per comparison; matches in green, the rest in white.
pub struct TerminalReporter {
    styled: bool,
}

impl TerminalReporter {
    pub fn new(styled: bool) -> Self {
        Self { styled }
    }
}

impl Reporter for TerminalReporter {
    fn comparison(&mut self, comparison: &Comparison) {
        let line = format_line(comparison);
        if !self.styled {
            println!("{line}");
        } else if comparison.is_match {
            println!("{GREEN}{line}{RESET}");
        } else {
            println!("{WHITE}{line}{RESET}");
        }
    }

    fn skipped(&mut self, error: &FingerMatchError) {
        eprintln!("skipped: {error}");
    }

    fn finish(&mut self, summary: &ScanSummary) {
        println!(
            "\n{} compared, {} matched, {} skipped",
            summary.compared(),
            summary.matches,
            summary.skipped
        );
    }
}

#[derive(Debug, Serialize)]
struct ComparisonRecord {
    id: i64,
    name: String,
    score: u64,
    is_match: bool,
    minutiae: usize,
}

impl From<&Comparison> for ComparisonRecord {
    fn from(value: &Comparison) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            score: value.score,
            is_match: value.is_match,
            minutiae: value.minutiae,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    reference: String,
    reference_minutiae: usize,
    threshold: u64,
    comparisons: Vec<ComparisonRecord>,
    skipped: Vec<String>,
    matches: usize,
}

/// Collects the scan and prints a single JSON document when it finishes.
pub struct JsonReporter {
    output: Output,
}

impl JsonReporter {
    pub fn new(reference: &str, reference_minutiae: usize, threshold: u64) -> Self {
        Self {
            output: Output {
                reference: reference.to_string(),
                reference_minutiae,
                threshold,
                comparisons: Vec::new(),
                skipped: Vec::new(),
                matches: 0,
            },
        }
    }

    fn render(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.output)
    }
}

impl Reporter for JsonReporter {
    fn comparison(&mut self, comparison: &Comparison) {
        self.output.comparisons.push(comparison.into());
    }

    fn skipped(&mut self, error: &FingerMatchError) {
        self.output.skipped.push(error.to_string());
    }

    fn finish(&mut self, summary: &ScanSummary) {
        self.output.matches = summary.matches;
        match self.render() {
            Ok(json) => println!("{json}"),
            Err(err) => tracing::error!("cannot render JSON report: {err}"),
        }
    }
}

/// Writes the stored image of every match to `<dir>/<id>_<name>.png`.
pub struct ImageExportReporter {
    dir: PathBuf,
}

impl ImageExportReporter {
    pub fn new(dir: PathBuf) -> std::io::Result<Self> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn target(&self, comparison: &Comparison) -> PathBuf {
        let stem = std::path::Path::new(&comparison.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("image");
        self.dir.join(format!("{}_{}.png", comparison.id, stem))
    }
}

impl Reporter for ImageExportReporter {
    fn comparison(&mut self, comparison: &Comparison) {
        if !comparison.is_match {
            return;
        }
        let path = self.target(comparison);
        match save_gray_image(&comparison.image, &path) {
            Ok(()) => tracing::info!("exported {}", path.display()),
            Err(err) => tracing::warn!("cannot export {}: {err}", path.display()),
        }
    }
}
