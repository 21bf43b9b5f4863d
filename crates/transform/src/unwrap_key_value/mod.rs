//! Unwrap-key-value Step - Keep one part of a key/value record
//!
//! # Configuration
//!
//! | Option | Type | Default | Description |
//! |--------|------|---------|-------------|
//! | `unwrap-key` | bool | `false` | Keep the key as the new value instead of the value |
//!
//! The other part is discarded and the record is no longer a key/value
//! record. Records without a key part pass unchanged.

mod config;

pub use config::UnwrapKeyValueConfig;

use crate::registry::StepFactory;
use crate::{Step, TransformResult};
use recast_config::StepInstanceConfig;
use recast_record::Record;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

/// Replaces a key/value record by one of its parts
#[derive(Debug, Clone, Copy, Default)]
pub struct UnwrapKeyValueStep {
    config: UnwrapKeyValueConfig,
}

impl UnwrapKeyValueStep {
    /// Create a new unwrap step
    pub fn new(config: UnwrapKeyValueConfig) -> Self {
        Self { config }
    }
}

impl Step for UnwrapKeyValueStep {
    fn apply(&self, mut record: Record) -> TransformResult<Option<Record>> {
        let Some(key) = record.take_key() else {
            return Ok(Some(record));
        };
        if self.config.unwrap_key {
            record.set_value(Some(key));
        }
        Ok(Some(record))
    }

    fn name(&self) -> &'static str {
        "unwrap-key-value"
    }
}

/// Factory for unwrap-key-value steps
#[derive(Debug, Clone, Copy)]
pub struct UnwrapKeyValueFactory;

impl StepFactory for UnwrapKeyValueFactory {
    fn create(&self, config: &StepInstanceConfig) -> Result<Box<dyn Step>, String> {
        let config = UnwrapKeyValueConfig::try_from(config)?;
        Ok(Box::new(UnwrapKeyValueStep::new(config)))
    }

    fn name(&self) -> &'static str {
        "unwrap-key-value"
    }
}
