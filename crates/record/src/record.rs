//! Records, payloads and parts
//!
//! A `Record` is the unit of work: an optional key payload, an optional value
//! payload and the routing attributes that travel with the message. A record
//! with a key payload is a key/value record; the two parts are transformed
//! independently unless a step explicitly merges them.

use crate::{FieldType, RecordError, Result, Struct, Value};
use std::collections::BTreeMap;
use std::fmt;

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;

/// Which part(s) of a record a step applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Part {
    /// Key part only
    Key,
    /// Value part only
    Value,
    /// Key and value parts (default when no part is configured)
    #[default]
    Both,
}

impl Part {
    /// Parse a configured part name (`key` or `value`)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "key" => Some(Self::Key),
            "value" => Some(Self::Value),
            _ => None,
        }
    }

    /// Whether the key part is selected
    #[inline]
    pub fn includes_key(self) -> bool {
        matches!(self, Self::Key | Self::Both)
    }

    /// Whether the value part is selected
    #[inline]
    pub fn includes_value(self) -> bool {
        matches!(self, Self::Value | Self::Both)
    }

    /// Name of this part selection
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Key => "key",
            Self::Value => "value",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content of one record part, together with its schema
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A single scalar value of a declared type (may be null)
    Scalar {
        /// Declared scalar type
        field_type: FieldType,
        /// The value, conforming to `field_type` or null
        value: Value,
    },
    /// A structured value owning its schema
    Struct(Struct),
}

impl Payload {
    /// Create a scalar payload, checking the value against its type
    pub fn scalar(field_type: FieldType, value: Value) -> Result<Self> {
        if !field_type.is_scalar() {
            return Err(RecordError::type_mismatch("<scalar>", "a scalar type", &value));
        }
        if !value.conforms_to(&field_type) {
            return Err(RecordError::type_mismatch("<scalar>", &field_type, &value));
        }
        Ok(Self::Scalar { field_type, value })
    }

    /// Create a STRING scalar payload
    pub fn string(s: impl Into<String>) -> Self {
        Self::Scalar {
            field_type: FieldType::String,
            value: Value::String(s.into()),
        }
    }

    /// Declared type of this payload
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Scalar { field_type, .. } => field_type.clone(),
            Self::Struct(s) => FieldType::Struct(s.schema().clone()),
        }
    }

    /// Structured content, if this payload is a struct
    pub fn as_struct(&self) -> Option<&Struct> {
        match self {
            Self::Struct(s) => Some(s),
            Self::Scalar { .. } => None,
        }
    }

    /// Mutable structured content, if this payload is a struct
    pub fn as_struct_mut(&mut self) -> Option<&mut Struct> {
        match self {
            Self::Struct(s) => Some(s),
            Self::Scalar { .. } => None,
        }
    }

    /// Content as a value (structs become `Value::Struct`)
    pub fn to_value(&self) -> Value {
        match self {
            Self::Scalar { value, .. } => value.clone(),
            Self::Struct(s) => Value::Struct(s.clone()),
        }
    }
}

impl From<Struct> for Payload {
    fn from(s: Struct) -> Self {
        Self::Struct(s)
    }
}

/// Routing attributes carried alongside the key and value parts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordAttributes {
    /// Topic the record was read from (read-only for expressions)
    pub topic: Option<String>,
    /// Topic the record should be written to
    pub destination_topic: Option<String>,
    /// Message key of a record without a key part
    pub message_key: Option<String>,
    /// Event time in milliseconds since the Unix epoch
    pub event_time: Option<i64>,
    /// Free-form string properties
    pub properties: BTreeMap<String, String>,
}

/// A schema-typed record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    key: Option<Payload>,
    value: Option<Payload>,
    attributes: RecordAttributes,
}

impl Record {
    /// Create a record with only a value part
    pub fn new(value: impl Into<Payload>) -> Self {
        Self {
            key: None,
            value: Some(value.into()),
            attributes: RecordAttributes::default(),
        }
    }

    /// Create a key/value record
    pub fn key_value(key: impl Into<Payload>, value: impl Into<Payload>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
            attributes: RecordAttributes::default(),
        }
    }

    /// Set routing attributes
    pub fn with_attributes(mut self, attributes: RecordAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Key part, if present
    #[inline]
    pub fn key(&self) -> Option<&Payload> {
        self.key.as_ref()
    }

    /// Value part, if present
    #[inline]
    pub fn value(&self) -> Option<&Payload> {
        self.value.as_ref()
    }

    /// Mutable key part, if present
    pub fn key_mut(&mut self) -> Option<&mut Payload> {
        self.key.as_mut()
    }

    /// Mutable value part, if present
    pub fn value_mut(&mut self) -> Option<&mut Payload> {
        self.value.as_mut()
    }

    /// Replace the key part
    pub fn set_key(&mut self, key: Option<Payload>) {
        self.key = key;
    }

    /// Replace the value part
    pub fn set_value(&mut self, value: Option<Payload>) {
        self.value = value;
    }

    /// Remove and return the key part
    pub fn take_key(&mut self) -> Option<Payload> {
        self.key.take()
    }

    /// Remove and return the value part
    pub fn take_value(&mut self) -> Option<Payload> {
        self.value.take()
    }

    /// Routing attributes
    #[inline]
    pub fn attributes(&self) -> &RecordAttributes {
        &self.attributes
    }

    /// Mutable routing attributes
    pub fn attributes_mut(&mut self) -> &mut RecordAttributes {
        &mut self.attributes
    }

    /// Whether this record has a separate key part
    #[inline]
    pub fn is_key_value(&self) -> bool {
        self.key.is_some()
    }

    /// Present payloads selected by `part`, key first
    pub fn parts_mut(&mut self, part: Part) -> impl Iterator<Item = &mut Payload> {
        let key = if part.includes_key() { self.key.as_mut() } else { None };
        let value = if part.includes_value() { self.value.as_mut() } else { None };
        key.into_iter().chain(value)
    }
}
