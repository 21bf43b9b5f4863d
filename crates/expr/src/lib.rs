//! Recast - Expressions
//!
//! The small expression language used by `when` predicates and computed
//! fields.
//!
//! # Overview
//!
//! Source text is compiled once into an [`Expression`]: a `pest` grammar
//! parses it and the parse tree is folded into an [`Expr`] tree. Evaluation
//! walks the tree against an [`EvalContext`], normally a
//! [`recast_record::Record`], and never re-parses text or mutates the
//! context.
//!
//! ```
//! use recast_expr::Expression;
//! use recast_record::{FieldType, Record, Struct, Value};
//!
//! let value = Struct::builder()
//!     .field("firstName", FieldType::String, "Jane")
//!     .build()
//!     .unwrap();
//! let record = Record::new(value);
//!
//! let when: Expression = "value.firstName == 'Jane'".parse().unwrap();
//! assert!(when.evaluate_predicate(&record).unwrap());
//!
//! let total: Expression = "5 * 3".parse().unwrap();
//! assert_eq!(total.evaluate(&record).unwrap(), Value::Int64(15));
//! ```
//!
//! # Syntax
//!
//! - Literals: `true`, `false`, `null`, integers, floats, `'single'` or
//!   `"double"` quoted strings
//! - Paths: `key`, `value.a.b`, `destinationTopic`, `properties.name`, ...
//! - Operators: `||`/`or`, `&&`/`and`, `==`, `!=`, `<`, `<=`, `>`, `>=`,
//!   `+`, `-`, `*`, `/`, `%`, `!`/`not`, unary `-`, parentheses

mod ast;
mod context;
mod error;
mod eval;
mod parser;

pub use ast::{BinaryOp, Expr, Path, UnaryOp};
pub use context::{ATTRIBUTE_ROOTS, EvalContext, is_known_root};
pub use error::{EvalError, ParseError};
pub use eval::{compare_values, evaluate, evaluate_predicate, values_equal};
pub use parser::parse;

use recast_record::Value;
use std::fmt;
use std::str::FromStr;

/// A compiled expression together with its source text
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    ast: Expr,
}

impl Expression {
    /// Compile source text
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        Ok(Self {
            source: source.to_string(),
            ast: parser::parse(source)?,
        })
    }

    /// Source text as written
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Syntax tree
    #[inline]
    pub fn ast(&self) -> &Expr {
        &self.ast
    }

    /// Path roots no record can resolve, in source order without repeats
    ///
    /// `firstName == 'Jane'` yields `["firstName"]`; such an expression
    /// parses but fails whenever evaluation reaches that path.
    pub fn unknown_roots(&self) -> Vec<&str> {
        let mut roots: Vec<&str> = Vec::new();
        for path in self.ast.paths() {
            let root = path.root();
            if !is_known_root(root) && !roots.contains(&root) {
                roots.push(root);
            }
        }
        roots
    }

    /// Evaluate to a value
    pub fn evaluate<C: EvalContext + ?Sized>(&self, ctx: &C) -> Result<Value, EvalError> {
        evaluate(&self.ast, ctx)
    }

    /// Evaluate in boolean context (null is false)
    pub fn evaluate_predicate<C: EvalContext + ?Sized>(&self, ctx: &C) -> Result<bool, EvalError> {
        evaluate_predicate(&self.ast, ctx)
    }
}

impl FromStr for Expression {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
