//! Record error types
//!
//! Errors raised when building, mutating or coercing schema-typed values.

use thiserror::Error;

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

/// Errors that can occur when working with records
#[derive(Debug, Error)]
pub enum RecordError {
    /// A value cannot be converted to the requested type
    #[error("cannot coerce {from} value '{value}' to {to}")]
    Coercion {
        /// Type name of the source value
        from: &'static str,
        /// Target type
        to: String,
        /// Canonical text of the source value
        value: String,
    },

    /// Two fields of one schema share a name
    #[error("duplicate field name '{0}'")]
    DuplicateField(String),

    /// A field was declared with an empty name
    #[error("field name must not be empty")]
    EmptyFieldName,

    /// A non-optional field was given a null value
    #[error("field '{0}' is not optional and cannot be null")]
    NullNotAllowed(String),

    /// A value does not conform to the declared field type
    #[error("field '{field}' expects {expected}, got {actual}")]
    TypeMismatch {
        /// Field name
        field: String,
        /// Declared type
        expected: String,
        /// Type name of the offending value
        actual: &'static str,
    },

    /// Schema and value list lengths differ
    #[error("schema declares {expected} fields but {actual} values were supplied")]
    ArityMismatch {
        /// Number of schema fields
        expected: usize,
        /// Number of supplied values
        actual: usize,
    },

    /// Field is not declared in the schema
    #[error("unknown field '{0}'")]
    UnknownField(String),

    /// JSON document cannot be mapped onto a record
    #[error("invalid JSON record: {0}")]
    Json(String),
}

impl RecordError {
    /// Create a coercion error
    pub fn coercion(value: &crate::Value, to: impl std::fmt::Display) -> Self {
        Self::Coercion {
            from: value.type_name(),
            to: to.to_string(),
            value: value.to_text(),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl std::fmt::Display,
        actual: &crate::Value,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected: expected.to_string(),
            actual: actual.type_name(),
        }
    }

    /// Create a JSON mapping error
    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }
}
