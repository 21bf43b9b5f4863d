//! Compute Step - Derive fields from expressions
//!
//! # Configuration
//!
//! `fields` is a required, non-empty list of:
//!
//! | Option | Type | Default | Description |
//! |--------|------|---------|-------------|
//! | `name` | string | required | Target: `key.<path>`, `value.<path>`, `key`, `value`, `destinationTopic`, `messageKey`, `properties.<name>` |
//! | `expression` | string | required | Expression evaluated against the record |
//! | `type` | string | required | Declared scalar type of the result |
//! | `optional` | bool | `false` | Whether the result may be null |
//!
//! ```toml
//! [[steps]]
//! type = "compute"
//! fields = [
//!   { name = "value.total", expression = "value.price * value.quantity", type = "DOUBLE" },
//!   { name = "destinationTopic", expression = "'orders-' + value.region", type = "STRING" },
//! ]
//! ```
//!
//! Every field of one step is evaluated against the record as it was before
//! the step, then all results are written in order. Nested targets create
//! missing parent structs as optional fields. Attribute targets store the
//! text form of the result; null clears the attribute.

mod config;

pub use config::{ComputeConfig, ComputeField, ComputeTarget};

use crate::registry::StepFactory;
use crate::schema_edit::set_field;
use crate::{Step, TransformError, TransformResult};
use recast_config::StepInstanceConfig;
use recast_record::{Payload, Record, RecordError, Struct, Value, coerce};
use tracing::warn;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

/// Adds or overwrites fields with computed values
#[derive(Debug, Clone)]
pub struct ComputeStep {
    config: ComputeConfig,
}

impl ComputeStep {
    /// Create a new compute step
    pub fn new(config: ComputeConfig) -> Self {
        Self { config }
    }

    /// Step configuration
    pub fn config(&self) -> &ComputeConfig {
        &self.config
    }
}

impl Step for ComputeStep {
    fn apply(&self, mut record: Record) -> TransformResult<Option<Record>> {
        let mut computed = Vec::with_capacity(self.config.fields.len());
        for field in &self.config.fields {
            let value = field.expression.evaluate(&record)?;
            let value = coerce(&value, &field.field_type)?;
            if value.is_null() && !field.optional {
                return Err(RecordError::NullNotAllowed(field.name.clone()).into());
            }
            computed.push(value);
        }

        for (field, value) in self.config.fields.iter().zip(computed) {
            write_field(&mut record, field, value)?;
        }
        Ok(Some(record))
    }

    fn name(&self) -> &'static str {
        "compute"
    }
}

fn write_field(record: &mut Record, field: &ComputeField, value: Value) -> TransformResult<()> {
    match &field.target {
        ComputeTarget::Key(path) if path.is_empty() => {
            record.set_key(Some(scalar_part(field, value)));
        }
        ComputeTarget::Value(path) if path.is_empty() => {
            record.set_value(Some(scalar_part(field, value)));
        }
        ComputeTarget::Key(path) => {
            let key = struct_part(record.key_mut(), "key")?;
            set_field(key, path, field.field_type.clone(), field.optional, value)?;
        }
        ComputeTarget::Value(path) => {
            let target = struct_part(record.value_mut(), "value")?;
            set_field(target, path, field.field_type.clone(), field.optional, value)?;
        }
        ComputeTarget::DestinationTopic => {
            record.attributes_mut().destination_topic = attribute_text(&value);
        }
        ComputeTarget::MessageKey => {
            record.attributes_mut().message_key = attribute_text(&value);
        }
        ComputeTarget::Property(name) => {
            let properties = &mut record.attributes_mut().properties;
            match attribute_text(&value) {
                Some(text) => {
                    properties.insert(name.clone(), text);
                }
                None => {
                    properties.remove(name);
                }
            }
        }
    }
    Ok(())
}

fn scalar_part(field: &ComputeField, value: Value) -> Payload {
    Payload::Scalar {
        field_type: field.field_type.clone(),
        value,
    }
}

fn struct_part<'a>(
    payload: Option<&'a mut Payload>,
    part: &str,
) -> TransformResult<&'a mut Struct> {
    match payload {
        Some(Payload::Struct(s)) => Ok(s),
        Some(Payload::Scalar { field_type, .. }) => Err(TransformError::schema(format!(
            "cannot add a field to the {} part, it is a {} scalar",
            part, field_type
        ))),
        None => Err(TransformError::schema(format!("record has no {} part", part))),
    }
}

fn attribute_text(value: &Value) -> Option<String> {
    if value.is_null() {
        None
    } else {
        Some(value.to_text())
    }
}

/// Factory for compute steps
#[derive(Debug, Clone, Copy)]
pub struct ComputeFactory;

impl StepFactory for ComputeFactory {
    fn create(&self, config: &StepInstanceConfig) -> Result<Box<dyn Step>, String> {
        let config = ComputeConfig::try_from(config)?;
        for field in &config.fields {
            let unknown = field.expression.unknown_roots();
            if !unknown.is_empty() {
                warn!(
                    field = %field.name,
                    expression = field.expression.source(),
                    roots = ?unknown,
                    "computed field references unknown roots, evaluating them always fails"
                );
            }
        }
        Ok(Box::new(ComputeStep::new(config)))
    }

    fn name(&self) -> &'static str {
        "compute"
    }
}
