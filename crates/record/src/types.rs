//! Schema types
//!
//! `FieldType` is the closed set of types a field (or a scalar part) can
//! declare. A `Schema` is an ordered list of uniquely named `FieldSchema`s.

use crate::{RecordError, Result};
use std::fmt;

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

/// Declared type of a field or scalar part
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// true / false
    Boolean,
    /// UTF-8 text
    String,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 32-bit float
    Float,
    /// 64-bit float
    Double,
    /// Calendar date without time zone
    Date,
    /// Time of day without date
    Time,
    /// Instant in UTC
    DateTime,
    /// Nested structured record
    Struct(Schema),
    /// Homogeneous list
    Array(Box<FieldType>),
}

impl FieldType {
    /// Names accepted by [`FieldType::parse_scalar`]
    pub const SCALAR_NAMES: &'static [&'static str] = &[
        "BOOLEAN", "STRING", "INT32", "INT64", "FLOAT", "DOUBLE", "DATE", "TIME", "DATETIME",
    ];

    /// Parse a scalar type name (case-insensitive)
    ///
    /// Structured types have no textual name and are never returned.
    pub fn parse_scalar(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "BOOLEAN" => Some(Self::Boolean),
            "STRING" => Some(Self::String),
            "INT32" => Some(Self::Int32),
            "INT64" => Some(Self::Int64),
            "FLOAT" => Some(Self::Float),
            "DOUBLE" => Some(Self::Double),
            "DATE" => Some(Self::Date),
            "TIME" => Some(Self::Time),
            "DATETIME" => Some(Self::DateTime),
            _ => None,
        }
    }

    /// Whether this is a scalar (non-struct, non-array) type
    #[inline]
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::Struct(_) | Self::Array(_))
    }

    /// Whether this is one of the numeric types
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int32 | Self::Int64 | Self::Float | Self::Double)
    }

    /// Upper-case type name used in configuration and error messages
    pub fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "BOOLEAN",
            Self::String => "STRING",
            Self::Int32 => "INT32",
            Self::Int64 => "INT64",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::DateTime => "DATETIME",
            Self::Struct(_) => "STRUCT",
            Self::Array(_) => "ARRAY",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Array(items) => write!(f, "ARRAY<{}>", items),
            other => f.write_str(other.name()),
        }
    }
}

/// A named, typed field declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    /// Field name, unique within its schema
    pub name: String,
    /// Declared type
    pub field_type: FieldType,
    /// Whether the field may hold null
    pub optional: bool,
}

impl FieldSchema {
    /// Create a field declaration
    pub fn new(name: impl Into<String>, field_type: FieldType, optional: bool) -> Self {
        Self {
            name: name.into(),
            field_type,
            optional,
        }
    }

    /// Create a non-optional field declaration
    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        Self::new(name, field_type, false)
    }

    /// Create an optional field declaration
    pub fn optional(name: impl Into<String>, field_type: FieldType) -> Self {
        Self::new(name, field_type, true)
    }
}

/// Ordered list of uniquely named fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldSchema>,
}

impl Schema {
    /// Create a schema, rejecting empty or duplicate field names
    pub fn new(fields: Vec<FieldSchema>) -> Result<Self> {
        for (i, field) in fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(RecordError::EmptyFieldName);
            }
            if fields[..i].iter().any(|f| f.name == field.name) {
                return Err(RecordError::DuplicateField(field.name.clone()));
            }
        }
        Ok(Self { fields })
    }

    /// Schema with no fields
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fields in declaration order
    #[inline]
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Position of a field by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Field names in declaration order
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Number of fields
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no fields
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn push(&mut self, field: FieldSchema) {
        self.fields.push(field);
    }

    pub(crate) fn replace(&mut self, index: usize, field: FieldSchema) {
        self.fields[index] = field;
    }

    pub(crate) fn remove(&mut self, index: usize) -> FieldSchema {
        self.fields.remove(index)
    }
}
