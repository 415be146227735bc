//! feedback-triage - batch runner for the triage pipeline
//!
//! Reads a JSON array of feedback records, classifies and tickets them, and
//! writes a JSON report of tickets, skipped records and run metrics.
//!
//! # Usage
//!
//! ```bash
//! # Triage a batch, report to stdout
//! feedback-triage --input records.json
//!
//! # Evaluate against labels and write the report to a file
//! feedback-triage --input records.json --ground-truth labels.json --output report.json
//! ```
//!
//! # Environment Variables
//!
//! - `FEEDBACK_TRIAGE_CONFIG`: Path to a triage_config.toml
//! - `RUST_LOG`: Logging level (default: info)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use feedback_triage::{parse_records, BatchReport, GroundTruth, Orchestrator, PipelineConfig, RuleSet};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "feedback-triage")]
#[command(about = "Classify user feedback and synthesize prioritized tickets")]
#[command(version)]
struct CliArgs {
    /// JSON array of feedback records
    #[arg(long, short)]
    input: PathBuf,

    /// JSON object mapping record id to expected category
    #[arg(long)]
    ground_truth: Option<PathBuf>,

    /// Triage config TOML (overrides FEEDBACK_TRIAGE_CONFIG and ./triage_config.toml)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Write the JSON report here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Score records on the current thread only
    #[arg(long)]
    sequential: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.json_logs);

    let mut config = match &args.config {
        Some(path) => PipelineConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::load().context("loading triage config")?,
    };
    if args.sequential {
        config.pipeline.parallel_scoring = false;
    }

    let rules = RuleSet::new(config).context("compiling triage rules")?;
    // Decode entries one by one so a malformed record is skipped, not fatal
    let entries: Vec<serde_json::Value> = read_json(&args.input)?;
    let (records, rejected) = parse_records(entries);
    let ground_truth: Option<GroundTruth> = args
        .ground_truth
        .as_deref()
        .map(read_json::<GroundTruth>)
        .transpose()?;

    info!(
        records = records.len(),
        malformed = rejected.len(),
        labelled = ground_truth.as_ref().map_or(0, |gt| gt.len()),
        "Starting triage run"
    );

    let mut orchestrator = Orchestrator::with_rules(rules);
    let report = orchestrator.run_with_skipped(&records, rejected, ground_truth.as_ref());

    write_report(&report, args.output.as_deref())?;
    info!(
        tickets = report.metrics.tickets_created,
        flagged = report.metrics.flagged,
        skipped = report.metrics.skipped,
        "Triage run finished"
    );
    Ok(())
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
}

fn write_report(report: &BatchReport, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serializing report")?;
    match output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "Report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
