//! Drop-fields step configuration

use crate::registry::parse_part;
use recast_config::StepInstanceConfig;
use recast_record::Part;

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

/// Configuration for the drop-fields step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropFieldsConfig {
    /// Field names to remove (dotted names reach nested fields)
    pub fields: Vec<String>,
    /// Parts the step applies to
    pub part: Part,
}

impl DropFieldsConfig {
    /// Create a config dropping `fields` from both parts
    pub fn new(fields: Vec<String>) -> Self {
        Self {
            fields,
            part: Part::Both,
        }
    }

    /// Restrict the step to one part
    pub fn with_part(mut self, part: Part) -> Self {
        self.part = part;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.fields.is_empty() {
            return Err("'fields' must not be empty".to_string());
        }
        if self.fields.iter().any(|f| f.is_empty()) {
            return Err("'fields' must not contain empty strings".to_string());
        }
        Ok(())
    }
}

impl TryFrom<&StepInstanceConfig> for DropFieldsConfig {
    type Error = String;

    fn try_from(config: &StepInstanceConfig) -> Result<Self, Self::Error> {
        let fields = config
            .try_get_string_array("fields")?
            .ok_or_else(|| "'fields' is required".to_string())?;

        let drop_config = DropFieldsConfig::new(fields).with_part(parse_part(config)?);
        drop_config.validate()?;
        Ok(drop_config)
    }
}
