//! Drop-fields Step - Remove named fields
//!
//! # Configuration
//!
//! | Option | Type | Default | Description |
//! |--------|------|---------|-------------|
//! | `fields` | array | required | Field names to remove; `a.b` reaches nested fields |
//! | `part` | string | both | `key` or `value` |
//!
//! Fields that do not exist are ignored, so running the step twice is the
//! same as running it once. Scalar parts have no fields and pass unchanged.
//!
//! ```toml
//! [[steps]]
//! type = "drop-fields"
//! fields = ["password", "address.zip"]
//! part = "value"
//! ```

mod config;

pub use config::DropFieldsConfig;

use crate::registry::StepFactory;
use crate::schema_edit::drop_fields;
use crate::{Step, TransformResult};
use recast_config::StepInstanceConfig;
use recast_record::Record;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

/// Removes fields from the selected parts
#[derive(Debug, Clone)]
pub struct DropFieldsStep {
    config: DropFieldsConfig,
}

impl DropFieldsStep {
    /// Create a new drop-fields step
    pub fn new(config: DropFieldsConfig) -> Self {
        Self { config }
    }

    /// Step configuration
    pub fn config(&self) -> &DropFieldsConfig {
        &self.config
    }
}

impl Step for DropFieldsStep {
    fn apply(&self, mut record: Record) -> TransformResult<Option<Record>> {
        for payload in record.parts_mut(self.config.part) {
            if let Some(s) = payload.as_struct_mut() {
                drop_fields(s, &self.config.fields)?;
            }
        }
        Ok(Some(record))
    }

    fn name(&self) -> &'static str {
        "drop-fields"
    }
}

/// Factory for drop-fields steps
#[derive(Debug, Clone, Copy)]
pub struct DropFieldsFactory;

impl StepFactory for DropFieldsFactory {
    fn create(&self, config: &StepInstanceConfig) -> Result<Box<dyn Step>, String> {
        let config = DropFieldsConfig::try_from(config)?;
        Ok(Box::new(DropFieldsStep::new(config)))
    }

    fn name(&self) -> &'static str {
        "drop-fields"
    }
}
