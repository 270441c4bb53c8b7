//! CLI entry point for the agricultural report generator.

use agri_report::{AgriculturalAnalyzer, ReportConfig, DEFAULT_INPUT_PATH};
use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::{error, info};

/// Agricultural report generator.
///
/// Prints summary, grouped and correlation tables for a farm dataset and
/// writes the charts to the `outputs/` directory.
#[derive(Parser, Debug)]
#[command(name = "agri-report")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input CSV file path
    #[arg(default_value = DEFAULT_INPUT_PATH)]
    input: PathBuf,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// Logs go to stderr so stdout carries only the report.
fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    info!("Agricultural report generator v{}", env!("CARGO_PKG_VERSION"));

    let config = ReportConfig::builder()
        .input_path(&args.input)
        .build()
        .context("Invalid configuration")?;

    let analyzer = match AgriculturalAnalyzer::load(config) {
        Ok(analyzer) => analyzer,
        Err(e) if e.is_load_error() => {
            error!("Could not read input: {}", e);
            return Err(e).with_context(|| format!("Failed to load '{}'", args.input.display()));
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!("Dataset '{}' failed validation", args.input.display())
            });
        }
    };

    let mut stdout = io::stdout().lock();
    analyzer.run_full_analysis(&mut stdout)?;

    Ok(())
}
