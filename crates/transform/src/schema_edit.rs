//! Schema edits
//!
//! Pure edits on structured values. Every edit goes through [`Struct`]
//! constructors and mutators, so the schema and the value slots stay in
//! lock-step after each one.

use crate::{TransformError, TransformResult};
use recast_record::{
    FieldSchema, FieldType, Payload, RecordError, Schema, Struct, StructuredValue, Value, coerce,
};

#[cfg(test)]
#[path = "schema_edit_test.rs"]
mod tests;

/// Remove fields by name
///
/// A name that is declared as-is is removed directly; otherwise a dotted
/// name (`address.city`) removes a nested field. Names that match nothing
/// are ignored.
pub fn drop_fields(target: &mut Struct, names: &[String]) -> TransformResult<()> {
    for name in names {
        drop_field(target, name)?;
    }
    Ok(())
}

fn drop_field(target: &mut Struct, name: &str) -> recast_record::Result<()> {
    if target.remove(name).is_some() {
        return Ok(());
    }
    if let Some((head, rest)) = name.split_once('.')
        && matches!(target.get(head), Some(Value::Struct(_)))
    {
        target.update_struct(head, |nested| drop_field(nested, rest))?;
    }
    Ok(())
}

/// Union of key and value fields
///
/// Key fields come first in their order, followed by value-only fields. On a
/// name collision the value-side declaration and value win.
pub fn merge_structs(key: Struct, value: Struct) -> TransformResult<Struct> {
    let mut merged = key;
    let (schema, values) = value.into_parts();
    for (field, v) in schema.fields().iter().zip(values) {
        merged.insert(field.clone(), v)?;
    }
    Ok(merged)
}

/// Convert a payload to a single scalar of the target type
///
/// Scalars are coerced; structured payloads only cast to STRING, using the
/// canonical text form.
pub fn cast_payload(payload: &Payload, target: &FieldType) -> TransformResult<Payload> {
    if !target.is_scalar() {
        return Err(TransformError::schema(format!("cannot cast to {}", target)));
    }

    match payload {
        Payload::Scalar { value, .. } => Ok(Payload::Scalar {
            field_type: target.clone(),
            value: coerce(value, target)?,
        }),
        Payload::Struct(s) if *target == FieldType::String => Ok(Payload::Scalar {
            field_type: FieldType::String,
            value: Value::String(Value::Struct(s.clone()).to_text()),
        }),
        Payload::Struct(_) => Err(TransformError::schema(format!(
            "cannot cast STRUCT to {}",
            target
        ))),
    }
}

/// Replace nested structured fields with one flat field per leaf
///
/// Leaf names join the path with `delimiter`. Arrays of structures are
/// flattened per element, with the element index as a path segment; other
/// arrays are kept as they are. Leaves under an optional (or null) parent
/// become optional.
pub fn flatten_struct(source: &Struct, delimiter: &str) -> TransformResult<Struct> {
    let mut fields = Vec::new();
    let mut values = Vec::new();
    for (field, value) in source.iter() {
        flatten_field(
            field.name.clone(),
            &field.field_type,
            field.optional,
            value,
            delimiter,
            &mut fields,
            &mut values,
        );
    }
    Ok(Struct::new(Schema::new(fields)?, values)?)
}

fn flatten_field(
    name: String,
    field_type: &FieldType,
    optional: bool,
    value: &Value,
    delimiter: &str,
    fields: &mut Vec<FieldSchema>,
    values: &mut Vec<Value>,
) {
    match field_type {
        FieldType::Struct(schema) => {
            let nested = value.as_struct();
            for (i, child) in schema.fields().iter().enumerate() {
                let child_value = nested.map_or(Value::Null, |s| s.values()[i].clone());
                flatten_field(
                    format!("{}{}{}", name, delimiter, child.name),
                    &child.field_type,
                    optional || child.optional || nested.is_none(),
                    &child_value,
                    delimiter,
                    fields,
                    values,
                );
            }
        }
        FieldType::Array(item_type) if matches!(**item_type, FieldType::Struct(_)) => {
            if let Value::Array(items) = value {
                for (i, item) in items.iter().enumerate() {
                    flatten_field(
                        format!("{}{}{}", name, delimiter, i),
                        item_type,
                        optional || item.is_null(),
                        item,
                        delimiter,
                        fields,
                        values,
                    );
                }
            }
        }
        _ => {
            fields.push(FieldSchema::new(name, field_type.clone(), optional));
            values.push(value.clone());
        }
    }
}

/// Add or overwrite a field at a nested path
///
/// Missing (or null) intermediate structs are created as optional fields.
/// Descending through a non-struct field fails.
pub fn set_field(
    target: &mut Struct,
    path: &[String],
    field_type: FieldType,
    optional: bool,
    value: Value,
) -> TransformResult<()> {
    Ok(set_nested(target, path, field_type, optional, value)?)
}

fn set_nested(
    target: &mut Struct,
    path: &[String],
    field_type: FieldType,
    optional: bool,
    value: Value,
) -> recast_record::Result<()> {
    let Some((head, rest)) = path.split_first() else {
        return Err(RecordError::EmptyFieldName);
    };

    if rest.is_empty() {
        return target.insert(FieldSchema::new(head.as_str(), field_type, optional), value);
    }

    match target.get(head) {
        Some(Value::Struct(_)) => {
            target.update_struct(head, |nested| {
                set_nested(nested, rest, field_type, optional, value)
            })?;
            Ok(())
        }
        None | Some(Value::Null) => {
            let mut nested = Struct::empty();
            set_nested(&mut nested, rest, field_type, optional, value)?;
            let nested_type = FieldType::Struct(nested.schema().clone());
            target.insert(
                FieldSchema::optional(head.as_str(), nested_type),
                Value::Struct(nested),
            )
        }
        Some(other) => Err(RecordError::type_mismatch(head.as_str(), "STRUCT", other)),
    }
}
