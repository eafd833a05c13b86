mod report;

use clap::Parser;
use fingermatch::{
    ExtractConfig, NormalizeConfig, Pipeline, PipelineConfig, Reporter, StoreConfig,
};
use report::{enrollment_lines, ImageExportReporter, JsonReporter, TerminalReporter};
use serde::Deserialize;
use std::fs;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Contour-minutiae fingerprint store and matcher")]
struct Cli {
    /// Path to a JSON configuration file; flags below override its values.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Directory holding the fingerprint images.
    #[arg(long, value_name = "DIR")]
    dataset_dir: Option<PathBuf>,
    /// File name of the reference image inside the dataset directory.
    #[arg(short, long, value_name = "NAME")]
    reference: Option<String>,
    /// Scores strictly below this value are matches.
    #[arg(short, long)]
    threshold: Option<u64>,
    /// SQLite database file.
    #[arg(long, value_name = "FILE")]
    database: Option<PathBuf>,
    /// Store every image in the dataset directory before scanning.
    #[arg(long)]
    enroll: bool,
    /// Write the stored image of every match into this directory.
    #[arg(long, value_name = "DIR")]
    export_matches: Option<PathBuf>,
    /// Print the report as JSON instead of colored lines.
    #[arg(long)]
    json: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct NormalizeConfigJson {
    blur_ksize: usize,
    blur_sigma: f32,
}

impl Default for NormalizeConfigJson {
    fn default() -> Self {
        let cfg = NormalizeConfig::default();
        Self {
            blur_ksize: cfg.blur_ksize,
            blur_sigma: cfg.blur_sigma,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ExtractConfigJson {
    min_area: f64,
}

impl Default for ExtractConfigJson {
    fn default() -> Self {
        Self {
            min_area: ExtractConfig::default().min_area,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    dataset_dir: PathBuf,
    reference_name: String,
    threshold: u64,
    database_path: PathBuf,
    normalize: NormalizeConfigJson,
    extract: ExtractConfigJson,
    enroll: bool,
    export_matches: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg = PipelineConfig::default();
        Self {
            dataset_dir: cfg.dataset_dir,
            reference_name: cfg.reference_name,
            threshold: cfg.threshold,
            database_path: cfg.store.database_path,
            normalize: NormalizeConfigJson::default(),
            extract: ExtractConfigJson::default(),
            enroll: false,
            export_matches: None,
        }
    }
}

impl Config {
    fn apply(&mut self, cli: &Cli) {
        if let Some(dir) = &cli.dataset_dir {
            self.dataset_dir = dir.clone();
        }
        if let Some(name) = &cli.reference {
            self.reference_name = name.clone();
        }
        if let Some(threshold) = cli.threshold {
            self.threshold = threshold;
        }
        if let Some(path) = &cli.database {
            self.database_path = path.clone();
        }
        if cli.enroll {
            self.enroll = true;
        }
        if let Some(dir) = &cli.export_matches {
            self.export_matches = Some(dir.clone());
        }
    }

    fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            dataset_dir: self.dataset_dir.clone(),
            reference_name: self.reference_name.clone(),
            threshold: self.threshold,
            store: StoreConfig {
                database_path: self.database_path.clone(),
            },
            normalize: NormalizeConfig {
                blur_ksize: self.normalize.blur_ksize,
                blur_sigma: self.normalize.blur_sigma,
            },
            extract: ExtractConfig {
                min_area: self.extract.min_area,
            },
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|err| format!("cannot read {}: {err}", path.display()))?;
            serde_json::from_str(&text)?
        }
        None => Config::default(),
    };
    config.apply(cli);
    if config.reference_name.is_empty() {
        return Err("reference_name must be set".into());
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&cli)?;
    let pipeline = Pipeline::new(config.pipeline_config());

    if config.enroll {
        let summary = pipeline.enroll_dataset()?;
        tracing::info!(
            enrolled = summary.enrolled.len(),
            skipped = summary.skipped.len(),
            "enrollment finished"
        );
        for line in enrollment_lines(&summary) {
            eprintln!("{line}");
        }
    }

    if !cli.json {
        println!("\nProcessing reference image {} ...\n", config.reference_name);
    }
    let scan = pipeline.run()?;
    if !cli.json {
        println!(
            "Comparing reference ({} minutiae) against stored fingerprints ...\n",
            scan.reference().len()
        );
    }

    let mut reporters: Vec<Box<dyn Reporter>> = Vec::new();
    if cli.json {
        reporters.push(Box::new(JsonReporter::new(
            scan.reference_name(),
            scan.reference().len(),
            scan.threshold(),
        )));
    } else {
        reporters.push(Box::new(TerminalReporter::new(
            std::io::stdout().is_terminal(),
        )));
    }
    if let Some(dir) = &config.export_matches {
        reporters.push(Box::new(ImageExportReporter::new(dir.clone())?));
    }

    let summary = scan.report_to(reporters);
    tracing::info!(
        matches = summary.matches,
        non_matches = summary.non_matches,
        skipped = summary.skipped,
        "scan finished"
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.trace {
        let filter = match "fingermatch=info".parse() {
            Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
            Err(_) => EnvFilter::from_default_env(),
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return ExitCode::SUCCESS;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
