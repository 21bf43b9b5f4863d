//! Configuration error types

use std::io;
use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when loading or validating a pipeline configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("failed to read config file '{path}': {source}")]
    IoError {
        /// Path to the file
        path: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to parse JSON
    #[error("failed to parse JSON config: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Validation error - required field missing
    #[error("{component} '{name}' is missing required field '{field}'")]
    MissingField {
        /// Component type (e.g., "pipeline", "step")
        component: &'static str,
        /// Name of the component
        name: String,
        /// Missing field name
        field: &'static str,
    },

    /// Validation error - invalid value
    #[error("{component} '{name}' has invalid {field}: {message}")]
    InvalidValue {
        /// Component type
        component: &'static str,
        /// Name of the component
        name: String,
        /// Field name
        field: &'static str,
        /// Error message
        message: String,
    },

    /// Step type is not recognized
    #[error("step {index} has unknown type '{step_type}', expected one of: {expected}")]
    UnknownStepType {
        /// Position of the step
        index: usize,
        /// The unrecognized type
        step_type: String,
        /// Comma-separated list of known types
        expected: String,
    },

    /// Step parameters are invalid
    #[error("step {index} ({step_type}): {message}")]
    InvalidStep {
        /// Position of the step
        index: usize,
        /// Step type
        step_type: String,
        /// What is wrong with the step
        message: String,
    },

    /// Expression text does not compile
    #[error("step {index} ({step_type}): invalid expression '{expression}': {message}")]
    InvalidExpression {
        /// Position of the step
        index: usize,
        /// Step type
        step_type: String,
        /// Expression source text
        expression: String,
        /// Parser message
        message: String,
    },
}

impl ConfigError {
    /// Create a MissingField error
    pub fn missing_field(
        component: &'static str,
        name: impl Into<String>,
        field: &'static str,
    ) -> Self {
        Self::MissingField {
            component,
            name: name.into(),
            field,
        }
    }

    /// Create an InvalidValue error
    pub fn invalid_value(
        component: &'static str,
        name: impl Into<String>,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            component,
            name: name.into(),
            field,
            message: message.into(),
        }
    }

    /// Create an InvalidStep error
    pub fn invalid_step(index: usize, step_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidStep {
            index,
            step_type: step_type.into(),
            message: message.into(),
        }
    }

    /// Create an InvalidExpression error
    pub fn invalid_expression(
        index: usize,
        step_type: impl Into<String>,
        expression: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidExpression {
            index,
            step_type: step_type.into(),
            expression: expression.into(),
            message: message.into(),
        }
    }
}
