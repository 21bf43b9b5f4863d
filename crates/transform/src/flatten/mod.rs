//! Flatten Step - Replace nested structs by leaf fields
//!
//! # Configuration
//!
//! | Option | Type | Default | Description |
//! |--------|------|---------|-------------|
//! | `delimiter` | string | `"."` | Joins the path segments of a leaf |
//! | `part` | string | both | `key` or `value` |
//!
//! `{address: {city, zip}}` becomes `{address.city, address.zip}`. Arrays of
//! structs flatten per element (`items.0.sku`); other arrays are kept.

mod config;

pub use config::{DEFAULT_DELIMITER, FlattenConfig};

use crate::registry::StepFactory;
use crate::schema_edit::flatten_struct;
use crate::{Step, TransformResult};
use recast_config::StepInstanceConfig;
use recast_record::{Payload, Record};

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

/// Flattens the structs of the selected parts
#[derive(Debug, Clone, Default)]
pub struct FlattenStep {
    config: FlattenConfig,
}

impl FlattenStep {
    /// Create a new flatten step
    pub fn new(config: FlattenConfig) -> Self {
        Self { config }
    }
}

impl Step for FlattenStep {
    fn apply(&self, mut record: Record) -> TransformResult<Option<Record>> {
        for payload in record.parts_mut(self.config.part) {
            if let Payload::Struct(s) = payload {
                *s = flatten_struct(s, &self.config.delimiter)?;
            }
        }
        Ok(Some(record))
    }

    fn name(&self) -> &'static str {
        "flatten"
    }
}

/// Factory for flatten steps
#[derive(Debug, Clone, Copy)]
pub struct FlattenFactory;

impl StepFactory for FlattenFactory {
    fn create(&self, config: &StepInstanceConfig) -> Result<Box<dyn Step>, String> {
        let config = FlattenConfig::try_from(config)?;
        Ok(Box::new(FlattenStep::new(config)))
    }

    fn name(&self) -> &'static str {
        "flatten"
    }
}
