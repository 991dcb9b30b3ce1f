//! Acquisitions Timeline - command line entry point.

use acquisitions_timeline::config::{Cli, PipelineConfig};
use acquisitions_timeline::pipeline;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .init();

    let config = PipelineConfig::from(Cli::parse());
    let summary = pipeline::run(&config)
        .with_context(|| format!("processing {}", config.input.display()))?;

    info!(
        html = %summary.artifacts.html.display(),
        companies_years = summary.aggregate.len(),
        "done"
    );
    Ok(())
}
