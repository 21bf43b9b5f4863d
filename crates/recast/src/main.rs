//! Recast - Declarative record pipelines
//!
//! # Usage
//!
//! ```bash
//! # Validate a pipeline and list its steps
//! recast --config pipeline.toml check
//!
//! # Transform newline-delimited JSON records
//! recast --config pipeline.toml run --input records.ndjson
//! cat records.ndjson | recast -c pipeline.json run
//! ```

mod cmd;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use recast_config::{LogConfig, LogFormat, LogOutput, PipelineConfig};
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Recast - Declarative record pipelines
#[derive(Parser, Debug)]
#[command(name = "recast")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to the pipeline file (TOML, or JSON with a .json extension)
    #[arg(short, long, default_value = "pipeline.toml", global = true)]
    config: std::path::PathBuf,

    /// Log level (trace, debug, info, warn, error), overrides [log] level
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the pipeline and print its steps
    Check,

    /// Process newline-delimited JSON records
    Run(cmd::run::RunArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = PipelineConfig::from_file(&cli.config)
        .with_context(|| format!("failed to load pipeline from {}", cli.config.display()))?;

    init_logging(&config.log, cli.log_level.as_deref())?;

    match cli.command {
        Command::Check => cmd::check::run(&config),
        Command::Run(args) => cmd::run::run(&config, args),
    }
}

/// Initialize the tracing subscriber for logging
fn init_logging(log: &LogConfig, level: Option<&str>) -> Result<()> {
    let level = level.unwrap_or(log.level.as_str());
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    let writer = match &log.output {
        LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
        LogOutput::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path))?;
            BoxMakeWriter::new(Arc::new(file))
        }
    };

    let registry = tracing_subscriber::registry();
    match log.format {
        LogFormat::Console => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(writer),
            )
            .with(filter)
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(writer))
            .with(filter)
            .init(),
    }

    Ok(())
}
