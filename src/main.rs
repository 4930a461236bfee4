// StartupLens - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading (platform config dir or --config)
// 3. Logging initialisation (debug mode support)
// 4. Ingestion, filtering and aggregation of the given inputs
// 5. Report / JSON / CSV output to stdout or a file

use clap::{Parser, ValueEnum};
use startuplens::app::ingest::{self, IngestOptions};
use startuplens::app::state::DashboardState;
use startuplens::core::envelope::InputFormat;
use startuplens::core::export::{self, AnalysisReport};
use startuplens::core::filter::{self, FilterCriteria, ValuationBucket};
use startuplens::core::score::{NoScores, PlaceholderScorer, ScoreProvider};
use startuplens::platform::config::{self, AppConfig, PlatformPaths};
use startuplens::platform::fs::InputSource;
use startuplens::ui;
use startuplens::util::{self, constants, error::StartupLensError};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Output format for the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Plain-text dashboard report.
    Report,
    /// Full analysis report as JSON (criteria, summary, records).
    Json,
    /// Filtered records as CSV.
    Csv,
}

/// StartupLens - Startup record extraction and analysis.
///
/// Reads free-text startup descriptions (or the analysis API's JSON results
/// envelope), extracts structured records, filters them, and prints summary
/// statistics.
#[derive(Parser, Debug)]
#[command(name = "StartupLens", version, about)]
struct Cli {
    /// Input files. Use `-` or omit to read stdin.
    inputs: Vec<PathBuf>,

    /// Only include this industry ("All" for every industry).
    #[arg(short = 'i', long = "industry")]
    industry: Option<String>,

    /// Valuation bucket: All, <100M, 100M-500M, 500M-1B, >1B.
    #[arg(short = 'v', long = "valuation")]
    valuation: Option<String>,

    /// Only include records whose tech stack mentions this (case-sensitive).
    #[arg(short = 't', long = "tech")]
    tech: Option<String>,

    /// Case-insensitive search over name and description.
    #[arg(short = 's', long = "search")]
    search: Option<String>,

    /// Only include unicorns (valuation of $1B or more).
    #[arg(long = "unicorns", conflicts_with = "valuation")]
    unicorns: bool,

    /// Input format: auto, text, envelope.
    #[arg(short = 'F', long = "input-format", value_parser = parse_input_format)]
    input_format: Option<InputFormat>,

    /// Output format.
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Report)]
    format: OutputFormat,

    /// Write output to this file instead of stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Do not attach placeholder analysis scores.
    #[arg(long = "no-scores")]
    no_scores: bool,

    /// Explicit config file (default: config.toml in the platform config dir).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn parse_input_format(label: &str) -> Result<InputFormat, String> {
    InputFormat::from_label(label)
        .ok_or_else(|| format!("unknown input format '{label}' (expected auto, text or envelope)"))
}

fn main() {
    let cli = Cli::parse();

    // Config comes first so its [logging] section can shape the subscriber.
    let (config, config_warnings) = match load_app_config(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        inputs = cli.inputs.len(),
        "StartupLens starting"
    );

    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    if let Err(e) = run(&cli, config) {
        tracing::error!(error = %e, "StartupLens failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn load_app_config(explicit: Option<&Path>) -> util::error::Result<(AppConfig, Vec<String>)> {
    match explicit {
        Some(path) => Ok(config::load_config_file(path)?),
        None => {
            let paths = PlatformPaths::resolve();
            Ok(config::load_config(&paths.config_dir))
        }
    }
}

fn run(cli: &Cli, config: AppConfig) -> util::error::Result<()> {
    let criteria = build_criteria(cli, &config.filter)?;

    let sources: Vec<InputSource> = if cli.inputs.is_empty() {
        vec![InputSource::Stdin]
    } else {
        cli.inputs.iter().cloned().map(InputSource::from_arg).collect()
    };

    let options = IngestOptions {
        format: cli.input_format.unwrap_or(config.input_format),
        max_input_bytes: config.max_input_bytes,
        max_records: constants::MAX_RECORDS,
    };

    let scorer: Box<dyn ScoreProvider> = if cli.no_scores || !config.placeholder_scores {
        Box::new(NoScores)
    } else {
        Box::new(PlaceholderScorer)
    };

    let outcome = ingest::load_inputs(&sources, &options, scorer.as_ref())?;
    for input in outcome.inputs.iter().filter(|i| i.synthetic) {
        tracing::info!(input = %input.source, "Input contains synthetic data");
    }

    let mut state = DashboardState::new(config.aggregate);
    state.replace_records(outcome.records, outcome.warnings);
    state.set_criteria(criteria);

    tracing::info!(
        loaded = state.records.len(),
        matched = state.filtered_indices.len(),
        "Analysis complete"
    );

    write_output(cli, &state)
}

/// CLI flags override the config file's default filter, field by field.
fn build_criteria(cli: &Cli, defaults: &FilterCriteria) -> util::error::Result<FilterCriteria> {
    let mut criteria = defaults.clone();

    if let Some(ref industry) = cli.industry {
        criteria.industry = filter::label_to_option(industry);
    }
    if let Some(ref label) = cli.valuation {
        criteria.valuation_bucket = label.parse::<ValuationBucket>()?;
    }
    if cli.unicorns {
        criteria.valuation_bucket = FilterCriteria::unicorns().valuation_bucket;
    }
    if let Some(ref tech) = cli.tech {
        criteria.tech_stack_term = filter::label_to_option(tech);
    }
    if let Some(ref search) = cli.search {
        criteria.text_search = search.trim().to_string();
    }

    Ok(criteria)
}

fn write_output(cli: &Cli, state: &DashboardState) -> util::error::Result<()> {
    let export_path = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from("<stdout>"));

    let io_err = |operation: &'static str| {
        let path = export_path.clone();
        move |source: std::io::Error| StartupLensError::Io {
            path,
            operation,
            source,
        }
    };

    let mut writer: Box<dyn Write> = match cli.output {
        Some(ref path) => Box::new(BufWriter::new(
            std::fs::File::create(path).map_err(io_err("create output file"))?,
        )),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };

    match cli.format {
        OutputFormat::Report => {
            ui::report::render(state, &mut writer).map_err(io_err("write report"))?;
        }
        OutputFormat::Json => {
            let report = AnalysisReport::new(
                state.criteria.clone(),
                state.summary.clone(),
                state.filtered_records(),
            );
            export::export_report(&report, &mut writer, &export_path)?;
            writeln!(writer).map_err(io_err("write report"))?;
        }
        OutputFormat::Csv => {
            export::export_csv(&state.filtered_records(), &mut writer, &export_path)?;
        }
    }

    writer.flush().map_err(io_err("flush output"))?;

    if let Some(ref path) = cli.output {
        tracing::info!(path = %path.display(), format = ?cli.format, "Output written");
    }
    Ok(())
}
