//! `recast check` - validate a pipeline

use anyhow::{Context, Result};
use recast_config::PipelineConfig;
use recast_transform::Pipeline;

/// Build the pipeline and print one line per step
pub fn run(config: &PipelineConfig) -> Result<()> {
    let pipeline = Pipeline::initialize(config).context("invalid pipeline")?;

    println!("pipeline ok: {} step(s)", pipeline.len());
    for (index, step) in config.steps.iter().enumerate() {
        match &step.when {
            Some(when) => println!("  {}: {} when {}", index, step.step_type, when),
            None => println!("  {}: {}", index, step.step_type),
        }
    }
    Ok(())
}
