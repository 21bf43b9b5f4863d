//! Step Registry - Step creation from configuration
//!
//! The registry maps step type names to factories, so a pipeline can be
//! assembled from an untyped configuration list.
//!
//! # Design
//!
//! - **Compile-time extensibility**: Users implement the `StepFactory` trait
//! - **Typed after this point**: Factories parse the generic option map once
//!   and return a `Box<dyn Step>`; nothing downstream sees the raw mapping
//! - **Positional errors**: Failures are reported with the step's index
//!
//! # Example
//!
//! ```ignore
//! let mut registry = StepRegistry::new();
//! registry.register("drop", DropFactory);
//!
//! let step = registry.create(0, &StepInstanceConfig::new("drop"))?;
//! ```

use crate::Step;
use recast_config::{ConfigError, StepInstanceConfig};
use recast_record::Part;
use std::collections::HashMap;

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;

/// Factory trait for creating steps
///
/// Implement this trait to register custom steps with the registry.
pub trait StepFactory: Send + Sync {
    /// Create a step instance from its configuration
    ///
    /// # Errors
    /// Returns a message describing the first invalid parameter
    fn create(&self, config: &StepInstanceConfig) -> Result<Box<dyn Step>, String>;

    /// Step type name (for error messages)
    fn name(&self) -> &'static str;
}

/// Registry for step factories
///
/// Maps step type names (e.g. `"drop-fields"`) to their factories.
pub struct StepRegistry {
    factories: HashMap<String, Box<dyn StepFactory>>,
}

impl StepRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a step factory
    ///
    /// # Panics
    /// Panics if a factory is already registered with this name.
    /// Use `try_register` for fallible registration.
    pub fn register<F: StepFactory + 'static>(&mut self, type_name: &str, factory: F) {
        if self.factories.contains_key(type_name) {
            panic!("Step factory '{}' already registered", type_name);
        }
        self.factories.insert(type_name.to_string(), Box::new(factory));
    }

    /// Try to register a step factory
    ///
    /// Returns `false` if a factory is already registered with this name.
    pub fn try_register<F: StepFactory + 'static>(&mut self, type_name: &str, factory: F) -> bool {
        if self.factories.contains_key(type_name) {
            return false;
        }
        self.factories.insert(type_name.to_string(), Box::new(factory));
        true
    }

    /// Create the step at position `index` from its configuration
    ///
    /// # Errors
    /// - `ConfigError::UnknownStepType` if the type is not registered
    /// - `ConfigError::InvalidStep` if the factory rejects the parameters
    pub fn create(
        &self,
        index: usize,
        config: &StepInstanceConfig,
    ) -> Result<Box<dyn Step>, ConfigError> {
        let factory = self.factories.get(&config.step_type).ok_or_else(|| {
            ConfigError::UnknownStepType {
                index,
                step_type: config.step_type.clone(),
                expected: self.available_types().join(", "),
            }
        })?;

        factory
            .create(config)
            .map_err(|message| ConfigError::invalid_step(index, &config.step_type, message))
    }

    /// Check if a step type is registered
    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    /// Registered step types, sorted
    pub fn available_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.factories.keys().map(|s| s.as_str()).collect();
        types.sort_unstable();
        types
    }

    /// Get the number of registered factories
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for StepRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the optional `part` parameter shared by several steps
///
/// Absent means both parts.
pub(crate) fn parse_part(config: &StepInstanceConfig) -> Result<Part, String> {
    match config.try_get_str("part")? {
        None => Ok(Part::Both),
        Some(name) => Part::parse(name)
            .ok_or_else(|| format!("'part' must be 'key' or 'value', got '{}'", name)),
    }
}
