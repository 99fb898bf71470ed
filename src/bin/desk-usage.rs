//! desk-usage CLI - Visualize standing desk usage from a height log
//!
//! Loads a CSV of desk heights, prints a standing/sitting summary and writes
//! `<input-stem>_visualization.png` into the current directory.

use clap::Parser;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use desk_usage::chart;
use desk_usage::config::{default_input_path, output_path_for};
use desk_usage::{DeskConfig, DeskError, DeskPipeline, UsageSummary, VERSION};

/// Visualize standing desk usage data
#[derive(Parser)]
#[command(name = "desk-usage")]
#[command(version = VERSION)]
#[command(about = "Visualize standing desk usage data", long_about = None)]
struct Cli {
    /// Path to the CSV file (default: ~/desk.csv)
    #[arg(value_name = "CSV_FILE")]
    csv_file: Option<PathBuf>,

    /// Load analysis settings from a JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Height (mm) at or above which the desk counts as standing
    #[arg(long)]
    threshold_mm: Option<i32>,

    /// Cap (minutes) on the time between two measurements
    #[arg(long)]
    max_gap_minutes: Option<f64>,

    /// Image path (default: <input-stem>_visualization.png)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Never open the image in a viewer
    #[arg(long)]
    no_show: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let json = cli.json;

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let err = CliError::from(e);
            if json {
                eprintln!(
                    "{}",
                    serde_json::to_string(&err).unwrap_or_else(|_| err.message.clone())
                );
            } else {
                eprintln!("Error: {}", err.message);
                if let Some(hint) = &err.hint {
                    eprintln!("Hint: {hint}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), DeskCliError> {
    let config = resolve_config(&cli)?;
    let input = cli.csv_file.clone().unwrap_or_else(default_input_path);

    if !input.exists() {
        return Err(DeskError::InputNotFound(input).into());
    }

    if !cli.json {
        println!("Loading data from {}...", input.display());
    }

    let analysis = DeskPipeline::new(config)?.process_file(&input)?;

    if !cli.json {
        println!("Loaded {} records", analysis.samples.len());
    }

    // Summary first: an empty dataset must fail before any image is written,
    // and a rendering failure must not swallow the banner.
    let summary = analysis.summary()?;
    if !cli.json {
        println!("{summary}");
    }

    let output = cli.output.clone().unwrap_or_else(|| output_path_for(&input));
    chart::render_png(&analysis.report(), &output)?;

    if cli.json {
        let report = RunReport {
            input: input.display().to_string(),
            output: output.display().to_string(),
            records: analysis.samples.len(),
            intervals: analysis.intervals.len(),
            config,
            summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("\nVisualization saved to {}", output.display());
    }

    if !cli.no_show && atty::is(atty::Stream::Stdout) {
        show_image(&output);
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<DeskConfig, DeskCliError> {
    let mut config = match &cli.config {
        Some(path) => DeskConfig::from_json(&read_config(path)?)?,
        None => DeskConfig::default(),
    };

    if let Some(threshold) = cli.threshold_mm {
        config.standing_threshold_mm = threshold;
    }
    if let Some(max_gap) = cli.max_gap_minutes {
        config.max_gap_minutes = max_gap;
    }

    config.validate()?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<String, DeskCliError> {
    fs::read_to_string(path).map_err(|e| DeskCliError::Config(path.to_path_buf(), e))
}

fn show_image(path: &Path) {
    if let Err(e) = open::that(path) {
        log::warn!("could not open {} in a viewer: {}", path.display(), e);
    }
}

#[derive(Debug)]
enum DeskCliError {
    Desk(DeskError),
    Config(PathBuf, io::Error),
    Json(serde_json::Error),
}

impl From<DeskError> for DeskCliError {
    fn from(e: DeskError) -> Self {
        DeskCliError::Desk(e)
    }
}

impl From<serde_json::Error> for DeskCliError {
    fn from(e: serde_json::Error) -> Self {
        DeskCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<DeskCliError> for CliError {
    fn from(e: DeskCliError) -> Self {
        match e {
            DeskCliError::Desk(e) => {
                let (code, hint) = match &e {
                    DeskError::InputNotFound(_) => (
                        "INPUT_NOT_FOUND",
                        Some("Pass the CSV path as the first argument"),
                    ),
                    DeskError::Io(_) => ("IO_ERROR", Some("Check file paths and permissions")),
                    DeskError::MissingColumn(_) => (
                        "MISSING_COLUMN",
                        Some("The CSV header must contain 'timestamp' and 'height_mm'"),
                    ),
                    DeskError::MalformedRecord { .. } => (
                        "MALFORMED_RECORD",
                        Some("Timestamps must be ISO-8601 and heights whole millimeters"),
                    ),
                    DeskError::EmptyDataset => (
                        "EMPTY_DATASET",
                        Some("At least two measurements on the same day are needed"),
                    ),
                    DeskError::NoStandingData => ("NO_STANDING_DATA", None),
                    DeskError::InvalidConfig(_) => ("INVALID_CONFIG", None),
                    DeskError::Json(_) => ("JSON_ERROR", Some("Check JSON syntax")),
                    DeskError::Chart(_) => ("CHART_ERROR", None),
                };
                CliError {
                    code: code.to_string(),
                    message: e.to_string(),
                    hint: hint.map(str::to_string),
                }
            }
            DeskCliError::Config(path, e) => CliError {
                code: "CONFIG_ERROR".to_string(),
                message: format!("Cannot read config {}: {}", path.display(), e),
                hint: Some("Check the --config path".to_string()),
            },
            DeskCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
        }
    }
}

#[derive(serde::Serialize)]
struct RunReport {
    input: String,
    output: String,
    records: usize,
    intervals: usize,
    config: DeskConfig,
    summary: UsageSummary,
}
