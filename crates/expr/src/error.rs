//! Expression error types
//!
//! `ParseError` is raised once, when source text is compiled; `EvalError` is
//! raised per evaluation against a record.

use recast_record::RecordError;
use thiserror::Error;

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

/// Expression source text could not be compiled
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at offset {offset}")]
pub struct ParseError {
    /// What went wrong
    pub message: String,
    /// Byte offset into the source text
    pub offset: usize,
}

impl ParseError {
    /// Create a parse error at a byte offset
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

/// Errors that can occur while evaluating an expression
#[derive(Debug, Error)]
pub enum EvalError {
    /// Path root is neither a record part nor a known attribute
    #[error("unknown path root '{0}'")]
    UnknownRoot(String),

    /// Path refers to a record part that is not present
    #[error("record has no {0} part")]
    MissingPart(&'static str),

    /// Path descends into a value that has no fields
    #[error("cannot read '{path}': {type_name} value has no fields")]
    NotStructured {
        /// Full path text
        path: String,
        /// Type name of the value in the way
        type_name: &'static str,
    },

    /// Path is well-formed but incomplete (e.g. bare `properties`)
    #[error("incomplete path '{0}'")]
    IncompletePath(String),

    /// Operator does not accept these operand types
    #[error("operator '{op}' cannot be applied to {left} and {right}")]
    InvalidOperands {
        /// Operator symbol
        op: &'static str,
        /// Type name of the left operand
        left: &'static str,
        /// Type name of the right operand
        right: &'static str,
    },

    /// Operator does not accept this operand type
    #[error("operator '{op}' cannot be applied to {operand}")]
    InvalidOperand {
        /// Operator symbol
        op: &'static str,
        /// Type name of the operand
        operand: &'static str,
    },

    /// Values cannot be compared with each other
    #[error("cannot compare {left} with {right}")]
    Incomparable {
        /// Type name of the left value
        left: &'static str,
        /// Type name of the right value
        right: &'static str,
    },

    /// A boolean was required
    #[error("expected BOOLEAN, got {0}")]
    NotBoolean(&'static str),

    /// Integer arithmetic overflowed
    #[error("integer overflow in '{0}'")]
    Overflow(&'static str),

    /// Division or remainder by zero
    #[error("division by zero")]
    DivisionByZero,

    /// Coercion failed
    #[error(transparent)]
    Record(#[from] RecordError),
}

impl EvalError {
    /// Create an invalid-operands error
    pub fn invalid_operands(
        op: &'static str,
        left: &recast_record::Value,
        right: &recast_record::Value,
    ) -> Self {
        Self::InvalidOperands {
            op,
            left: left.type_name(),
            right: right.type_name(),
        }
    }

    /// Create an incomparable-values error
    pub fn incomparable(left: &recast_record::Value, right: &recast_record::Value) -> Self {
        Self::Incomparable {
            left: left.type_name(),
            right: right.type_name(),
        }
    }
}
