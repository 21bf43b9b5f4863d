//! Cast step configuration

use crate::registry::parse_part;
use recast_config::StepInstanceConfig;
use recast_record::{FieldType, Part};

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

/// Configuration for the cast step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastConfig {
    /// Scalar type every selected part is converted to
    pub schema_type: FieldType,
    /// Parts the step applies to
    pub part: Part,
}

impl CastConfig {
    /// Create a config casting both parts to `schema_type`
    pub fn new(schema_type: FieldType) -> Self {
        Self {
            schema_type,
            part: Part::Both,
        }
    }

    /// Restrict the step to one part
    pub fn with_part(mut self, part: Part) -> Self {
        self.part = part;
        self
    }
}

impl TryFrom<&StepInstanceConfig> for CastConfig {
    type Error = String;

    fn try_from(config: &StepInstanceConfig) -> Result<Self, Self::Error> {
        let name = config
            .try_get_str("schema-type")?
            .ok_or_else(|| "'schema-type' is required".to_string())?;

        let schema_type = FieldType::parse_scalar(name).ok_or_else(|| {
            format!(
                "'schema-type' must be one of: {}, got '{}'",
                FieldType::SCALAR_NAMES.join(", "),
                name
            )
        })?;

        Ok(CastConfig::new(schema_type).with_part(parse_part(config)?))
    }
}
