//! Flatten step configuration

use crate::registry::parse_part;
use recast_config::StepInstanceConfig;
use recast_record::Part;

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

/// Default delimiter joining nested field names
pub const DEFAULT_DELIMITER: &str = ".";

/// Configuration for the flatten step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenConfig {
    /// Text placed between path segments
    pub delimiter: String,
    /// Parts the step applies to
    pub part: Part,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            part: Part::Both,
        }
    }
}

impl FlattenConfig {
    /// Create a config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delimiter
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Restrict the step to one part
    pub fn with_part(mut self, part: Part) -> Self {
        self.part = part;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.delimiter.is_empty() {
            return Err("'delimiter' must not be empty".to_string());
        }
        Ok(())
    }
}

impl TryFrom<&StepInstanceConfig> for FlattenConfig {
    type Error = String;

    fn try_from(config: &StepInstanceConfig) -> Result<Self, Self::Error> {
        let mut flatten_config = FlattenConfig::new().with_part(parse_part(config)?);

        if let Some(delimiter) = config.try_get_str("delimiter")? {
            flatten_config.delimiter = delimiter.to_string();
        }

        flatten_config.validate()?;
        Ok(flatten_config)
    }
}
