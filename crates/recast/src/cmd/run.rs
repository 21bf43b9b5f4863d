//! `recast run` - transform newline-delimited JSON records
//!
//! Each input line is one JSON document:
//!
//! ```json
//! {"key": {...}, "value": {...}, "topic": "orders", "properties": {"region": "eu"}}
//! ```
//!
//! Output lines use the same shape. Dropped records print nothing. A line
//! that cannot be parsed or processed is logged and counted; the run goes on.

use anyhow::{Context, Result};
use clap::Args;
use recast_config::{LogOutput, PipelineConfig};
use recast_record::json::{record_from_json, record_to_json};
use recast_transform::Pipeline;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::{info, warn};

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;

/// Arguments for `recast run`
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Input file with one JSON record per line (default: stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

/// Counters for one run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// Non-blank input lines
    pub read: u64,
    /// Records written to the output
    pub emitted: u64,
    /// Records dropped by the pipeline
    pub dropped: u64,
    /// Lines that failed to parse or process
    pub failed: u64,
}

/// Run the pipeline over the input and print results to stdout
pub fn run(config: &PipelineConfig, args: RunArgs) -> Result<()> {
    let pipeline = Pipeline::initialize(config).context("invalid pipeline")?;
    if config.log.output == LogOutput::Stdout {
        warn!("logs are written to stdout and will interleave with records");
    }

    let stdout = io::stdout();
    let mut output = BufWriter::new(stdout.lock());

    let stats = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open input {}", path.display()))?;
            process_lines(&pipeline, BufReader::new(file), &mut output)?
        }
        None => process_lines(&pipeline, io::stdin().lock(), &mut output)?,
    };
    output.flush().context("failed to flush output")?;

    info!(
        read = stats.read,
        emitted = stats.emitted,
        dropped = stats.dropped,
        failed = stats.failed,
        "run complete"
    );
    Ok(())
}

/// Process every line of `input`, writing surviving records to `output`
///
/// Only I/O errors abort; bad records are counted in `failed`.
pub fn process_lines<R: BufRead, W: Write>(
    pipeline: &Pipeline,
    input: R,
    output: &mut W,
) -> Result<RunStats> {
    let mut stats = RunStats::default();

    for (index, line) in input.lines().enumerate() {
        let line = line.context("failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }
        stats.read += 1;
        let line_number = index + 1;

        let document: serde_json::Value = match serde_json::from_str(&line) {
            Ok(document) => document,
            Err(e) => {
                warn!(line = line_number, error = %e, "invalid JSON, skipping record");
                stats.failed += 1;
                continue;
            }
        };

        let record = match record_from_json(&document) {
            Ok(record) => record,
            Err(e) => {
                warn!(line = line_number, error = %e, "unsupported record, skipping");
                stats.failed += 1;
                continue;
            }
        };

        match pipeline.process(record) {
            Ok(Some(out)) => {
                serde_json::to_writer(&mut *output, &record_to_json(&out))
                    .context("failed to write output")?;
                output.write_all(b"\n").context("failed to write output")?;
                stats.emitted += 1;
            }
            Ok(None) => stats.dropped += 1,
            Err(e) => {
                warn!(line = line_number, error = %e, "record failed");
                stats.failed += 1;
            }
        }
    }

    Ok(stats)
}
