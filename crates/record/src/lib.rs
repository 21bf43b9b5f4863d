//! Recast - Record
//!
//! The schema-typed record model that flows through a recast pipeline.
//!
//! # Overview
//!
//! A [`Record`] has an optional key part, an optional value part and a set of
//! routing attributes. Each present part is a [`Payload`]: either a single
//! scalar with its declared [`FieldType`], or a [`Struct`] that owns its
//! [`Schema`] together with one value slot per declared field.
//!
//! ```text
//! Record
//! ├── key:   Option<Payload>      Scalar { field_type, value } | Struct
//! ├── value: Option<Payload>
//! └── attributes                  topic, destinationTopic, messageKey, properties
//! ```
//!
//! # Invariants
//!
//! - Field names are unique within a schema
//! - A struct always has exactly one value per schema field, in schema order
//! - Non-optional fields never hold `Value::Null`
//! - Every non-null value conforms to its declared field type
//!
//! All mutation goes through [`Struct`] methods that check these invariants,
//! so schema and data cannot drift apart.
//!
//! # Modules
//!
//! - `types` - `FieldType`, `FieldSchema`, `Schema`
//! - `value` - `Value`, `Struct`, the `StructuredValue` capability
//! - `record` - `Record`, `Payload`, `Part`, `RecordAttributes`
//! - `coerce` - the fixed coercion rules shared by casts, computes and comparisons
//! - `json` - schema inference from JSON documents and JSON rendering

mod coerce;
mod error;
mod record;
mod types;
mod value;
pub mod json;

pub use coerce::coerce;
pub use error::RecordError;
pub use record::{Part, Payload, Record, RecordAttributes};
pub use types::{FieldSchema, FieldType, Schema};
pub use value::{Struct, StructBuilder, StructuredValue, Value};

/// Result type for record operations
pub type Result<T> = std::result::Result<T, RecordError>;
