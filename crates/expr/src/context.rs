//! Evaluation context
//!
//! Paths are resolved through [`EvalContext`]; [`Record`] is the context used
//! by pipelines.
//!
//! | root | resolves to |
//! |------|-------------|
//! | `key`, `key.a.b` | the key part or a field inside it |
//! | `value`, `value.a.b` | the value part or a field inside it |
//! | `topicName` | topic the record was read from |
//! | `destinationTopic` | topic the record will be written to |
//! | `messageKey` | message key of the record |
//! | `eventTime` | event time in epoch millis (INT64) |
//! | `properties.<name>` | a record property (STRING) |
//!
//! A field that is not declared in an existing part resolves to null. A
//! missing part, an unknown root, or a path that descends into a scalar is
//! an error.

use crate::{EvalError, Path};
use recast_record::{Payload, Record, StructuredValue, Value};
use std::borrow::Cow;

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;

/// Attribute roots readable from expressions
pub const ATTRIBUTE_ROOTS: &[&str] = &[
    "topicName",
    "destinationTopic",
    "messageKey",
    "eventTime",
    "properties",
];

/// Whether a path root can resolve against a record
///
/// `key`, `value` and the [`ATTRIBUTE_ROOTS`] are known; anything else fails
/// every evaluation that reaches it.
pub fn is_known_root(root: &str) -> bool {
    matches!(root, "key" | "value") || ATTRIBUTE_ROOTS.contains(&root)
}

/// Something paths can be resolved against
pub trait EvalContext {
    /// Resolve a path to a value
    fn resolve(&self, path: &Path) -> Result<Cow<'_, Value>, EvalError>;
}

impl EvalContext for Record {
    fn resolve(&self, path: &Path) -> Result<Cow<'_, Value>, EvalError> {
        let attributes = self.attributes();
        let attribute = |value: Option<Value>| {
            if path.rest().is_empty() {
                Ok(Cow::Owned(value.unwrap_or(Value::Null)))
            } else {
                Err(EvalError::NotStructured {
                    path: path.to_string(),
                    type_name: "STRING",
                })
            }
        };

        match path.root() {
            "key" => {
                let part = self.key().ok_or(EvalError::MissingPart("key"))?;
                resolve_in_payload(part, path)
            }
            "value" => {
                let part = self.value().ok_or(EvalError::MissingPart("value"))?;
                resolve_in_payload(part, path)
            }
            "topicName" => attribute(attributes.topic.clone().map(Value::String)),
            "destinationTopic" => {
                attribute(attributes.destination_topic.clone().map(Value::String))
            }
            "messageKey" => attribute(attributes.message_key.clone().map(Value::String)),
            "eventTime" => attribute(attributes.event_time.map(Value::Int64)),
            "properties" => {
                if path.rest().is_empty() {
                    return Err(EvalError::IncompletePath(path.to_string()));
                }
                // Property names may themselves contain dots
                let name = path.rest().join(".");
                Ok(Cow::Owned(
                    attributes
                        .properties
                        .get(&name)
                        .map_or(Value::Null, |v| Value::String(v.clone())),
                ))
            }
            other => Err(EvalError::UnknownRoot(other.to_string())),
        }
    }
}

fn resolve_in_payload<'a>(part: &'a Payload, path: &Path) -> Result<Cow<'a, Value>, EvalError> {
    let fields = path.rest();
    if fields.is_empty() {
        return Ok(Cow::Owned(part.to_value()));
    }

    let Some(mut current) = part.as_struct() else {
        return Err(EvalError::NotStructured {
            path: path.to_string(),
            type_name: part.field_type().name(),
        });
    };

    for (i, name) in fields.iter().enumerate() {
        let Some(value) = current.get(name) else {
            return Ok(Cow::Owned(Value::Null));
        };
        if i + 1 == fields.len() {
            return Ok(Cow::Borrowed(value));
        }
        current = match value {
            Value::Struct(nested) => nested,
            Value::Null => return Ok(Cow::Owned(Value::Null)),
            other => {
                return Err(EvalError::NotStructured {
                    path: path.to_string(),
                    type_name: other.type_name(),
                });
            }
        };
    }

    Ok(Cow::Owned(Value::Null))
}
