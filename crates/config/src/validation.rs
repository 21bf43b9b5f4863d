//! Pipeline validation
//!
//! Structural checks across the ordered step list that no single step can
//! make on its own:
//! - The pipeline has at least one step
//! - No step reads or writes a key part that an earlier unconditional
//!   `merge-key-value` or `unwrap-key-value` has already removed
//!
//! Per-step parameters are validated by the step factories.

use crate::error::{ConfigError, Result};
use crate::steps::StepInstanceConfig;

/// Validate the ordered step list
pub fn validate_steps(steps: &[StepInstanceConfig]) -> Result<()> {
    if steps.is_empty() {
        return Err(ConfigError::invalid_value(
            "pipeline",
            "config",
            "steps",
            "at least one step is required",
        ));
    }

    // Index of the unconditional step that removed the key part, if any
    let mut key_removed_by: Option<(usize, &str)> = None;

    for (index, step) in steps.iter().enumerate() {
        if let Some((at, removed_by)) = key_removed_by
            && targets_key(step)
        {
            return Err(ConfigError::invalid_step(
                index,
                &step.step_type,
                format!(
                    "targets the key part, but step {} ({}) leaves the record without one",
                    at, removed_by
                ),
            ));
        }

        let removes_key = matches!(step.step_type.as_str(), "merge-key-value" | "unwrap-key-value");
        if removes_key && step.when.is_none() && key_removed_by.is_none() {
            key_removed_by = Some((index, step.step_type.as_str()));
        }
    }

    Ok(())
}

/// Whether a step explicitly selects the key part
fn targets_key(step: &StepInstanceConfig) -> bool {
    if step.get_str("part") == Some("key") {
        return true;
    }
    if step.step_type == "compute"
        && let Some(fields) = step.get_table_array("fields")
    {
        return fields.iter().any(|field| {
            field
                .get("name")
                .and_then(|name| name.as_str())
                .is_some_and(|name| name == "key" || name.starts_with("key."))
        });
    }
    false
}
