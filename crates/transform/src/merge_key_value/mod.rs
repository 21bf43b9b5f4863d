//! Merge-key-value Step - Fold the key fields into the value
//!
//! When both parts of a key/value record are structs, the value becomes the
//! union of key and value fields (value side wins on a name clash) and the
//! key part is removed. Any other record passes unchanged.
//!
//! ```toml
//! [[steps]]
//! type = "merge-key-value"
//! ```

use crate::registry::StepFactory;
use crate::schema_edit::merge_structs;
use crate::{Step, TransformResult};
use recast_config::StepInstanceConfig;
use recast_record::{Payload, Record};

#[cfg(test)]
#[path = "merge_key_value_test.rs"]
mod tests;

/// Merges a structured key into a structured value
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeKeyValueStep;

impl MergeKeyValueStep {
    /// Create a new merge step
    #[inline]
    pub const fn new() -> Self {
        Self
    }
}

impl Step for MergeKeyValueStep {
    fn apply(&self, mut record: Record) -> TransformResult<Option<Record>> {
        let both_structs = matches!(
            (record.key(), record.value()),
            (Some(Payload::Struct(_)), Some(Payload::Struct(_)))
        );
        if !both_structs {
            return Ok(Some(record));
        }

        if let (Some(Payload::Struct(key)), Some(Payload::Struct(value))) =
            (record.take_key(), record.take_value())
        {
            record.set_value(Some(Payload::Struct(merge_structs(key, value)?)));
        }
        Ok(Some(record))
    }

    fn name(&self) -> &'static str {
        "merge-key-value"
    }
}

/// Factory for merge-key-value steps
#[derive(Debug, Clone, Copy)]
pub struct MergeKeyValueFactory;

impl StepFactory for MergeKeyValueFactory {
    fn create(&self, _config: &StepInstanceConfig) -> Result<Box<dyn Step>, String> {
        Ok(Box::new(MergeKeyValueStep::new()))
    }

    fn name(&self) -> &'static str {
        "merge-key-value"
    }
}
