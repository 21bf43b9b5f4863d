//! Cast Step - Convert parts to a single scalar
//!
//! # Configuration
//!
//! | Option | Type | Default | Description |
//! |--------|------|---------|-------------|
//! | `schema-type` | string | required | Target scalar type (`STRING`, `INT64`, ...) |
//! | `part` | string | both | `key` or `value` |
//!
//! A struct part cast to `STRING` becomes its canonical text,
//! `{"name": value, ...}` in schema order. Scalars follow the shared
//! coercion rules. Anything else fails the record.
//!
//! ```toml
//! [[steps]]
//! type = "cast"
//! schema-type = "STRING"
//! part = "key"
//! ```

mod config;

pub use config::CastConfig;

use crate::registry::StepFactory;
use crate::schema_edit::cast_payload;
use crate::{Step, TransformResult};
use recast_config::StepInstanceConfig;
use recast_record::Record;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

/// Casts the selected parts to one scalar type
#[derive(Debug, Clone)]
pub struct CastStep {
    config: CastConfig,
}

impl CastStep {
    /// Create a new cast step
    pub fn new(config: CastConfig) -> Self {
        Self { config }
    }
}

impl Step for CastStep {
    fn apply(&self, mut record: Record) -> TransformResult<Option<Record>> {
        for payload in record.parts_mut(self.config.part) {
            *payload = cast_payload(payload, &self.config.schema_type)?;
        }
        Ok(Some(record))
    }

    fn name(&self) -> &'static str {
        "cast"
    }
}

/// Factory for cast steps
#[derive(Debug, Clone, Copy)]
pub struct CastFactory;

impl StepFactory for CastFactory {
    fn create(&self, config: &StepInstanceConfig) -> Result<Box<dyn Step>, String> {
        let config = CastConfig::try_from(config)?;
        Ok(Box::new(CastStep::new(config)))
    }

    fn name(&self) -> &'static str {
        "cast"
    }
}
