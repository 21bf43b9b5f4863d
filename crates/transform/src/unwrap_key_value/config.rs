//! Unwrap-key-value step configuration

use recast_config::StepInstanceConfig;

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

/// Configuration for the unwrap-key-value step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnwrapKeyValueConfig {
    /// Keep the key part instead of the value part
    pub unwrap_key: bool,
}

impl UnwrapKeyValueConfig {
    /// Create a config keeping the value part
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the key part instead
    pub fn with_unwrap_key(mut self, unwrap_key: bool) -> Self {
        self.unwrap_key = unwrap_key;
        self
    }
}

impl TryFrom<&StepInstanceConfig> for UnwrapKeyValueConfig {
    type Error = String;

    fn try_from(config: &StepInstanceConfig) -> Result<Self, Self::Error> {
        let unwrap_key = config.try_get_bool("unwrap-key")?.unwrap_or(false);
        Ok(Self::new().with_unwrap_key(unwrap_key))
    }
}
