//! Drop Step - Discard the record
//!
//! Usually guarded by a `when` predicate. Once it runs, no later step sees
//! the record.
//!
//! ```toml
//! [[steps]]
//! type = "drop"
//! when = "value.status == 'deleted'"
//! ```

use crate::registry::StepFactory;
use crate::{Step, TransformResult};
use recast_config::StepInstanceConfig;
use recast_record::Record;

#[cfg(test)]
#[path = "drop_test.rs"]
mod tests;

/// Discards every record it is applied to
#[derive(Debug, Clone, Copy, Default)]
pub struct DropStep;

impl DropStep {
    /// Create a new drop step
    #[inline]
    pub const fn new() -> Self {
        Self
    }
}

impl Step for DropStep {
    fn apply(&self, _record: Record) -> TransformResult<Option<Record>> {
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "drop"
    }
}

/// Factory for drop steps
#[derive(Debug, Clone, Copy)]
pub struct DropFactory;

impl StepFactory for DropFactory {
    fn create(&self, _config: &StepInstanceConfig) -> Result<Box<dyn Step>, String> {
        Ok(Box::new(DropStep::new()))
    }

    fn name(&self) -> &'static str {
        "drop"
    }
}
