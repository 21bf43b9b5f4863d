//! Transform error types
//!
//! Errors that fail a single record. Configuration problems are reported as
//! `recast_config::ConfigError` when the pipeline is built.

use recast_expr::EvalError;
use recast_record::RecordError;
use thiserror::Error;

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

/// Errors that can occur while transforming a record
#[derive(Debug, Error)]
pub enum TransformError {
    /// A compute expression could not be evaluated
    #[error("evaluation failed: {0}")]
    Evaluation(#[from] EvalError),

    /// A record edit violated the schema (coercion, nullability, types)
    #[error("schema transform failed: {0}")]
    Record(#[from] RecordError),

    /// An edit cannot be applied to this record's shape
    #[error("schema transform failed: {0}")]
    Schema(String),
}

impl TransformError {
    /// Create a schema transform error
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }
}
