//! Step configuration
//!
//! Each entry of the `steps` list has a type, an optional `when` predicate,
//! and type-specific options that are handed to the step factory untouched.
//!
//! # Example
//!
//! ```toml
//! [[steps]]
//! type = "drop-fields"
//! fields = ["password"]
//! part = "value"
//!
//! [[steps]]
//! type = "drop"
//! when = "value.status == 'deleted'"
//! ```

use crate::error::{ConfigError, Result};
use std::collections::HashMap;

/// Configuration for a single pipeline step
///
/// Holds the generic mapping of one step; typed parameters are parsed from
/// `options` by the step factory.
#[derive(Debug, Clone, PartialEq)]
pub struct StepInstanceConfig {
    /// Step type (e.g., "drop-fields", "compute")
    pub step_type: String,

    /// Predicate source text; `None` means unconditional
    pub when: Option<String>,

    /// Type-specific configuration options
    pub options: HashMap<String, toml::Value>,
}

impl StepInstanceConfig {
    /// Create a step config with no options
    pub fn new(step_type: impl Into<String>) -> Self {
        Self {
            step_type: step_type.into(),
            when: None,
            options: HashMap::new(),
        }
    }

    /// Set the `when` predicate
    pub fn with_when(mut self, when: impl Into<String>) -> Self {
        self.when = Some(when.into());
        self
    }

    /// Set an option
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Parse one entry of the `steps` list
    pub fn from_value(index: usize, value: &toml::Value) -> Result<Self> {
        let name = format!("steps[{}]", index);
        let table = value
            .as_table()
            .ok_or_else(|| ConfigError::invalid_value("step", &name, "entry", "must be a mapping"))?;

        let step_type = match table.get("type") {
            None => return Err(ConfigError::missing_field("step", &name, "type")),
            Some(toml::Value::String(s)) => s.clone(),
            Some(_) => {
                return Err(ConfigError::invalid_value("step", &name, "type", "must be a string"));
            }
        };
        if !is_known_step_type(&step_type) {
            return Err(ConfigError::UnknownStepType {
                index,
                step_type,
                expected: KNOWN_STEP_TYPES.join(", "),
            });
        }

        let when = match table.get("when") {
            None => None,
            Some(toml::Value::String(s)) if s.trim().is_empty() => {
                return Err(ConfigError::invalid_value("step", &name, "when", "must not be empty"));
            }
            Some(toml::Value::String(s)) => Some(s.clone()),
            Some(_) => {
                return Err(ConfigError::invalid_value("step", &name, "when", "must be a string"));
            }
        };

        let options = table
            .iter()
            .filter(|(k, _)| !matches!(k.as_str(), "type" | "when"))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Self {
            step_type,
            when,
            options,
        })
    }

    /// Whether an option is set
    pub fn has(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    /// Get an array option as Vec<String>, skipping non-string entries
    pub fn get_string_array(&self, key: &str) -> Option<Vec<String>> {
        self.options.get(key).and_then(|v| {
            v.as_array().map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(|s| s.to_string()))
                    .collect()
            })
        })
    }

    /// Get an option as bool
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.options.get(key).and_then(|v| v.as_bool())
    }

    /// Get an option as string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(|v| v.as_str())
    }

    /// Get an option as an array of mappings
    pub fn get_table_array(&self, key: &str) -> Option<Vec<&toml::Table>> {
        self.options
            .get(key)
            .and_then(|v| v.as_array())
            .map(|arr| arr.iter().filter_map(|v| v.as_table()).collect())
    }

    /// Get a string option, failing if it is present with another type
    pub fn try_get_str(&self, key: &str) -> std::result::Result<Option<&str>, String> {
        match self.options.get(key) {
            None => Ok(None),
            Some(toml::Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(format!("'{}' must be a string, got {}", key, other.type_str())),
        }
    }

    /// Get a boolean option, failing if it is present with another type
    pub fn try_get_bool(&self, key: &str) -> std::result::Result<Option<bool>, String> {
        match self.options.get(key) {
            None => Ok(None),
            Some(toml::Value::Boolean(b)) => Ok(Some(*b)),
            Some(other) => Err(format!("'{}' must be a boolean, got {}", key, other.type_str())),
        }
    }

    /// Get a list of non-empty strings, failing on any other shape
    pub fn try_get_string_array(&self, key: &str) -> std::result::Result<Option<Vec<String>>, String> {
        let Some(value) = self.options.get(key) else {
            return Ok(None);
        };
        let arr = value
            .as_array()
            .ok_or_else(|| format!("'{}' must be a list of strings, got {}", key, value.type_str()))?;

        arr.iter()
            .map(|v| match v {
                toml::Value::String(s) if s.is_empty() => {
                    Err(format!("'{}' must not contain empty strings", key))
                }
                toml::Value::String(s) => Ok(s.clone()),
                other => Err(format!(
                    "'{}' must only contain strings, got {}",
                    key,
                    other.type_str()
                )),
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Get a list of mappings, failing on any other shape
    pub fn try_get_table_array(
        &self,
        key: &str,
    ) -> std::result::Result<Option<Vec<&toml::Table>>, String> {
        let Some(value) = self.options.get(key) else {
            return Ok(None);
        };
        let arr = value
            .as_array()
            .ok_or_else(|| format!("'{}' must be a list of mappings, got {}", key, value.type_str()))?;

        arr.iter()
            .map(|v| {
                v.as_table()
                    .ok_or_else(|| format!("'{}' entries must be mappings, got {}", key, v.type_str()))
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Some)
    }
}

/// Known step types for validation
pub const KNOWN_STEP_TYPES: &[&str] = &[
    "drop-fields",
    "merge-key-value",
    "unwrap-key-value",
    "cast",
    "flatten",
    "compute",
    "drop",
];

/// Check if a step type is known
pub fn is_known_step_type(step_type: &str) -> bool {
    KNOWN_STEP_TYPES.contains(&step_type)
}
