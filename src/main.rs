use anyhow::Result;
use clap::Parser;
use imgmeta::config::AppConfig;
use imgmeta::{BatchRunner, LogReporter};
use log::info;
use std::path::PathBuf;

/// Extracts file and image metadata from a provided list of image files
#[derive(Parser, Debug)]
#[command(name = "imgmeta", version, about, long_about = None)]
struct Cli {
    /// Image files to process
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Write a per-file success/failure report to this path
    #[arg(short = 'r', long = "results-file", value_name = "FILE")]
    results_file: Option<PathBuf>,

    /// Log level (overrides configuration)
    #[arg(long)]
    log_level: Option<String>,

    /// Pretty-print the sidecar JSON
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::new()?;

    let log_level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    env_logger::Builder::new()
        .filter_level(log_level.parse().unwrap_or(log::LevelFilter::Info))
        .init();

    info!("Starting imgmeta");

    let results_file = cli
        .results_file
        .or_else(|| config.results_file.as_ref().map(PathBuf::from));
    let reporter = LogReporter;
    let summary = BatchRunner::new(&reporter)
        .pretty_json(cli.pretty || config.pretty_json)
        .run(&cli.files, results_file.as_deref())?;

    if let Some(path) = &results_file {
        info!("Results written to {:?}", path);
    }
    info!(
        "imgmeta finished: {} succeeded, {} failed",
        summary.succeeded(),
        summary.failed()
    );

    Ok(())
}
