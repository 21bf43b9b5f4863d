//! Values and structured values
//!
//! `Value` is the runtime representation of any field content. `Struct` pairs
//! a `Schema` with one value slot per field and is the only way to build or
//! mutate structured data, which keeps schema and data in lock-step.

use crate::{FieldSchema, FieldType, RecordError, Result, Schema};
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use std::fmt::{self, Write};

#[cfg(test)]
#[path = "value_test.rs"]
mod tests;

/// A schema-typed value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value (only valid in optional slots)
    Null,
    /// Boolean value
    Boolean(bool),
    /// Text value
    String(String),
    /// 32-bit integer
    Int32(i32),
    /// 64-bit integer
    Int64(i64),
    /// 32-bit float
    Float(f32),
    /// 64-bit float
    Double(f64),
    /// Calendar date
    Date(NaiveDate),
    /// Time of day
    Time(NaiveTime),
    /// Instant in UTC
    DateTime(DateTime<Utc>),
    /// Nested structured value
    Struct(Struct),
    /// List of values of one type
    Array(Vec<Value>),
}

impl Value {
    /// Whether this is `Value::Null`
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Upper-case name of the runtime type
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Boolean(_) => "BOOLEAN",
            Self::String(_) => "STRING",
            Self::Int32(_) => "INT32",
            Self::Int64(_) => "INT64",
            Self::Float(_) => "FLOAT",
            Self::Double(_) => "DOUBLE",
            Self::Date(_) => "DATE",
            Self::Time(_) => "TIME",
            Self::DateTime(_) => "DATETIME",
            Self::Struct(_) => "STRUCT",
            Self::Array(_) => "ARRAY",
        }
    }

    /// The field type this value naturally has, `None` for null
    ///
    /// Arrays take the type of their first non-null element, falling back to
    /// `ARRAY<STRING>` when there is none.
    pub fn field_type(&self) -> Option<FieldType> {
        let field_type = match self {
            Self::Null => return None,
            Self::Boolean(_) => FieldType::Boolean,
            Self::String(_) => FieldType::String,
            Self::Int32(_) => FieldType::Int32,
            Self::Int64(_) => FieldType::Int64,
            Self::Float(_) => FieldType::Float,
            Self::Double(_) => FieldType::Double,
            Self::Date(_) => FieldType::Date,
            Self::Time(_) => FieldType::Time,
            Self::DateTime(_) => FieldType::DateTime,
            Self::Struct(s) => FieldType::Struct(s.schema().clone()),
            Self::Array(items) => FieldType::Array(Box::new(
                items
                    .iter()
                    .find_map(Value::field_type)
                    .unwrap_or(FieldType::String),
            )),
        };
        Some(field_type)
    }

    /// Whether this value may be stored in a slot of the given type
    ///
    /// Null conforms to every type; optionality is checked by the slot.
    pub fn conforms_to(&self, field_type: &FieldType) -> bool {
        match (self, field_type) {
            (Self::Null, _) => true,
            (Self::Boolean(_), FieldType::Boolean)
            | (Self::String(_), FieldType::String)
            | (Self::Int32(_), FieldType::Int32)
            | (Self::Int64(_), FieldType::Int64)
            | (Self::Float(_), FieldType::Float)
            | (Self::Double(_), FieldType::Double)
            | (Self::Date(_), FieldType::Date)
            | (Self::Time(_), FieldType::Time)
            | (Self::DateTime(_), FieldType::DateTime) => true,
            (Self::Struct(s), FieldType::Struct(schema)) => s.schema() == schema,
            (Self::Array(items), FieldType::Array(item_type)) => {
                items.iter().all(|v| v.conforms_to(item_type))
            }
            _ => false,
        }
    }

    /// Boolean content, if this is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Text content, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer content, if this is an INT32 or INT64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int32(i) => Some(i64::from(*i)),
            Self::Int64(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric content widened to f64, if this is any numeric type
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int32(i) => Some(f64::from(*i)),
            Self::Int64(i) => Some(*i as f64),
            Self::Float(f) => Some(f64::from(*f)),
            Self::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Structured content, if this is a struct
    pub fn as_struct(&self) -> Option<&Struct> {
        match self {
            Self::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this is one of the numeric variants
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Int32(_) | Self::Int64(_) | Self::Float(_) | Self::Double(_)
        )
    }

    /// Canonical text form
    ///
    /// Strings render as-is, temporal values in ISO-8601 / RFC 3339, and
    /// structs as `{"name": value, ...}` in schema order with nested strings
    /// quoted.
    pub fn to_text(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            other => {
                let mut out = String::new();
                other.write_text(&mut out, false);
                out
            }
        }
    }

    fn write_text(&self, out: &mut String, quoted: bool) {
        let quote = |out: &mut String, s: &str| {
            if quoted {
                out.push_str(&serde_json::Value::from(s).to_string());
            } else {
                out.push_str(s);
            }
        };

        match self {
            Self::Null => out.push_str("null"),
            Self::Boolean(b) => {
                let _ = write!(out, "{}", b);
            }
            Self::String(s) => quote(out, s),
            Self::Int32(i) => {
                let _ = write!(out, "{}", i);
            }
            Self::Int64(i) => {
                let _ = write!(out, "{}", i);
            }
            Self::Float(f) => {
                let _ = write!(out, "{:?}", f);
            }
            Self::Double(d) => {
                let _ = write!(out, "{:?}", d);
            }
            Self::Date(d) => quote(out, &d.format("%Y-%m-%d").to_string()),
            Self::Time(t) => quote(out, &t.to_string()),
            Self::DateTime(dt) => quote(out, &dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Struct(s) => {
                out.push('{');
                for (i, (field, value)) in s.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(&serde_json::Value::from(field.name.as_str()).to_string());
                    out.push_str(": ");
                    value.write_text(out, true);
                }
                out.push('}');
            }
            Self::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.write_text(out, true);
                }
                out.push(']');
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<Struct> for Value {
    fn from(v: Struct) -> Self {
        Self::Struct(v)
    }
}

/// Generic by-name access to structured data
///
/// Transform steps and the expression evaluator only depend on this
/// capability, never on how a struct is encoded.
pub trait StructuredValue {
    /// Value of a declared field
    fn get(&self, name: &str) -> Option<&Value>;

    /// Replace the value of a declared field, checking type and optionality
    fn set(&mut self, name: &str, value: Value) -> Result<()>;

    /// Field declarations in order
    fn fields(&self) -> &[FieldSchema];
}

/// A structured value: a schema and one value per schema field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Struct {
    schema: Schema,
    values: Vec<Value>,
}

impl Struct {
    /// Create a struct, validating every slot against the schema
    pub fn new(schema: Schema, values: Vec<Value>) -> Result<Self> {
        if schema.len() != values.len() {
            return Err(RecordError::ArityMismatch {
                expected: schema.len(),
                actual: values.len(),
            });
        }
        for (field, value) in schema.fields().iter().zip(&values) {
            check_slot(field, value)?;
        }
        Ok(Self { schema, values })
    }

    /// Struct with no fields
    pub fn empty() -> Self {
        Self::default()
    }

    /// Start building a struct field by field
    pub fn builder() -> StructBuilder {
        StructBuilder::default()
    }

    /// The struct's schema
    #[inline]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Values in schema order
    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Number of fields
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the struct has no fields
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(field, value)` pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&FieldSchema, &Value)> {
        self.schema.fields().iter().zip(self.values.iter())
    }

    /// Add a field, or overwrite it in place if the name already exists
    pub fn insert(&mut self, field: FieldSchema, value: Value) -> Result<()> {
        if field.name.is_empty() {
            return Err(RecordError::EmptyFieldName);
        }
        check_slot(&field, &value)?;

        match self.schema.index_of(&field.name) {
            Some(i) => {
                self.schema.replace(i, field);
                self.values[i] = value;
            }
            None => {
                self.schema.push(field);
                self.values.push(value);
            }
        }
        Ok(())
    }

    /// Remove a field and its value; `None` if it is not declared
    pub fn remove(&mut self, name: &str) -> Option<(FieldSchema, Value)> {
        let i = self.schema.index_of(name)?;
        Some((self.schema.remove(i), self.values.remove(i)))
    }

    /// Edit a nested struct field in place
    ///
    /// The parent's declaration of the field is refreshed with the nested
    /// struct's new schema afterwards. Returns `Ok(None)` when the field is
    /// not declared or holds null.
    pub fn update_struct<T, F>(&mut self, name: &str, edit: F) -> Result<Option<T>>
    where
        F: FnOnce(&mut Struct) -> Result<T>,
    {
        let Some(i) = self.schema.index_of(name) else {
            return Ok(None);
        };

        let nested = match &mut self.values[i] {
            Value::Null => return Ok(None),
            Value::Struct(nested) => nested,
            other => {
                return Err(RecordError::type_mismatch(name, "STRUCT", other));
            }
        };

        let out = edit(nested)?;
        let field_type = FieldType::Struct(nested.schema().clone());
        let optional = self.schema.fields()[i].optional;
        self.schema.replace(i, FieldSchema::new(name, field_type, optional));
        Ok(Some(out))
    }

    /// Split into schema and values
    pub fn into_parts(self) -> (Schema, Vec<Value>) {
        (self.schema, self.values)
    }
}

impl StructuredValue for Struct {
    fn get(&self, name: &str) -> Option<&Value> {
        self.schema.index_of(name).map(|i| &self.values[i])
    }

    fn set(&mut self, name: &str, value: Value) -> Result<()> {
        let i = self
            .schema
            .index_of(name)
            .ok_or_else(|| RecordError::UnknownField(name.to_string()))?;
        check_slot(&self.schema.fields()[i], &value)?;
        self.values[i] = value;
        Ok(())
    }

    fn fields(&self) -> &[FieldSchema] {
        self.schema.fields()
    }
}

/// Check that a value may occupy a field's slot
fn check_slot(field: &FieldSchema, value: &Value) -> Result<()> {
    if value.is_null() {
        if field.optional {
            return Ok(());
        }
        return Err(RecordError::NullNotAllowed(field.name.clone()));
    }
    if !value.conforms_to(&field.field_type) {
        return Err(RecordError::type_mismatch(&field.name, &field.field_type, value));
    }
    Ok(())
}

/// Builder for [`Struct`]
///
/// ```
/// use recast_record::{FieldType, Struct};
///
/// let s = Struct::builder()
///     .field("name", FieldType::String, "Jane")
///     .optional_field("age", FieldType::Int32, 42)
///     .build()
///     .unwrap();
/// assert_eq!(s.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct StructBuilder {
    fields: Vec<FieldSchema>,
    values: Vec<Value>,
}

impl StructBuilder {
    /// Add a non-optional field
    pub fn field(mut self, name: &str, field_type: FieldType, value: impl Into<Value>) -> Self {
        self.fields.push(FieldSchema::required(name, field_type));
        self.values.push(value.into());
        self
    }

    /// Add an optional field
    pub fn optional_field(
        mut self,
        name: &str,
        field_type: FieldType,
        value: impl Into<Value>,
    ) -> Self {
        self.fields.push(FieldSchema::optional(name, field_type));
        self.values.push(value.into());
        self
    }

    /// Validate and build the struct
    pub fn build(self) -> Result<Struct> {
        Struct::new(Schema::new(self.fields)?, self.values)
    }
}
