//! Command-line front end for the training table merge.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use weight_merge::{MergeConfig, MergeSummary};

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Merge per-user activity exports and weight logs into one training table.
#[derive(Parser, Debug)]
#[command(name = "weight-merge", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding very_active_minutes_<id>.json and reporting_<id>.csv
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Where to write the merged table
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Log filter from `WEIGHT_MERGE_LOG_LEVEL`, falling back to `RUST_LOG`,
/// then `info`.
pub fn log_filter_from_env_with<F>(mut get: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    get("WEIGHT_MERGE_LOG_LEVEL")
        .or_else(|| get("RUST_LOG"))
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

pub fn env_filter(log_env: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_new(log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the stderr subscriber; stdout is left for the summary line.
pub fn init_tracing() {
    let log_env = log_filter_from_env_with(|k| std::env::var(k).ok());
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter(&log_env))
        .init();
    tracing::debug!("weight-merge: log filter: {}", log_env);
}

/// Environment config with command-line flags layered on top.
pub fn resolve_config(cli: &Cli) -> anyhow::Result<MergeConfig> {
    let config = MergeConfig::from_env().context("reading configuration")?;
    Ok(config.with_overrides(cli.input_dir.clone(), cli.output.clone()))
}

pub fn execute(cli: &Cli) -> anyhow::Result<MergeSummary> {
    let config = resolve_config(cli)?;
    weight_merge::run(&config).with_context(|| {
        format!(
            "merging inputs from {} into {}",
            config.input_dir.display(),
            config.output_path.display()
        )
    })
}

pub fn summary_line(summary: &MergeSummary) -> String {
    format!(
        "Saved {} rows to '{}'.",
        summary.rows,
        summary.output_path.display()
    )
}
