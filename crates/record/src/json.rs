//! JSON mapping
//!
//! Records are read from and written as JSON documents of the form
//!
//! ```json
//! {
//!   "key": {"id": 1},
//!   "value": {"name": "Jane", "tags": ["a", "b"]},
//!   "topic": "input",
//!   "destinationTopic": "output",
//!   "messageKey": "k1",
//!   "eventTime": 1700000000000,
//!   "properties": {"origin": "web"}
//! }
//! ```
//!
//! Every member is optional. Schemas are inferred from the JSON shape:
//! integers that fit 32 bits become INT32, larger ones INT64, other numbers
//! DOUBLE, `null` an optional STRING. Array elements share one type: numbers
//! widen to the widest element, objects are unified by member name (a member
//! some objects lack becomes optional), and any other mix is rejected.

use crate::{
    FieldSchema, FieldType, Payload, Record, RecordAttributes, RecordError, Result, Schema,
    Struct, Value,
};
use serde_json::{Map, Number, Value as Json};

#[cfg(test)]
#[path = "json_test.rs"]
mod tests;

/// Build a record from a JSON document
pub fn record_from_json(doc: &Json) -> Result<Record> {
    let Json::Object(members) = doc else {
        return Err(RecordError::json("record must be a JSON object"));
    };

    let mut record = Record::default();
    if let Some(key) = members.get("key") {
        record.set_key(Some(payload_from_json(key)?));
    }
    if let Some(value) = members.get("value") {
        record.set_value(Some(payload_from_json(value)?));
    }

    let attributes = record.attributes_mut();
    attributes.topic = optional_string(members, "topic")?;
    attributes.destination_topic = optional_string(members, "destinationTopic")?;
    attributes.message_key = optional_string(members, "messageKey")?;
    attributes.event_time = match members.get("eventTime") {
        None | Some(Json::Null) => None,
        Some(Json::Number(n)) => Some(
            n.as_i64()
                .ok_or_else(|| RecordError::json("eventTime must be an integer"))?,
        ),
        Some(_) => return Err(RecordError::json("eventTime must be an integer")),
    };
    match members.get("properties") {
        None | Some(Json::Null) => {}
        Some(Json::Object(props)) => {
            for (name, value) in props {
                let text = match value {
                    Json::String(s) => s.clone(),
                    other => other.to_string(),
                };
                attributes.properties.insert(name.clone(), text);
            }
        }
        Some(_) => return Err(RecordError::json("properties must be an object")),
    }

    Ok(record)
}

fn optional_string(members: &Map<String, Json>, name: &str) -> Result<Option<String>> {
    match members.get(name) {
        None | Some(Json::Null) => Ok(None),
        Some(Json::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(RecordError::json(format!("{} must be a string", name))),
    }
}

/// Infer a payload from a JSON value
///
/// Objects become struct payloads, everything else a scalar payload.
/// Top-level arrays are rejected.
pub fn payload_from_json(json: &Json) -> Result<Payload> {
    match json {
        Json::Object(members) => Ok(Payload::Struct(struct_from_json(members)?)),
        Json::Array(_) => Err(RecordError::json("a record part cannot be an array")),
        other => {
            let field_type = common_type(&[other])?.unwrap_or(FieldType::String);
            let value = to_value(other, &field_type)?;
            Ok(Payload::Scalar { field_type, value })
        }
    }
}

/// Infer a struct from a JSON object, keeping member order
pub fn struct_from_json(members: &Map<String, Json>) -> Result<Struct> {
    let schema = object_schema(&[members])?;
    struct_value(members, &schema)
}

/// The type every non-null value fits in, or `None` if all are null
///
/// Numbers widen INT32 → INT64 → DOUBLE. Objects are unified by member
/// name, arrays by their elements. Any other mix is an error.
fn common_type(values: &[&Json]) -> Result<Option<FieldType>> {
    let mut common: Option<FieldType> = None;
    let mut objects = Vec::new();
    let mut items = Vec::new();
    let mut has_array = false;

    for json in values {
        let field_type = match json {
            Json::Null => continue,
            Json::Object(members) => {
                objects.push(members);
                continue;
            }
            Json::Array(elements) => {
                has_array = true;
                items.extend(elements);
                continue;
            }
            Json::Bool(_) => FieldType::Boolean,
            Json::String(_) => FieldType::String,
            Json::Number(n) => number_type(n)?,
        };
        common = widen(common, field_type)?;
    }

    if !objects.is_empty() {
        common = widen(common, FieldType::Struct(object_schema(&objects)?))?;
    }
    if has_array {
        let item_type = common_type(&items)?.unwrap_or(FieldType::String);
        common = widen(common, FieldType::Array(Box::new(item_type)))?;
    }
    Ok(common)
}

fn widen(current: Option<FieldType>, next: FieldType) -> Result<Option<FieldType>> {
    let Some(current) = current else {
        return Ok(Some(next));
    };
    if current == next {
        return Ok(Some(current));
    }
    let widened = match (&current, &next) {
        (FieldType::Int32, FieldType::Int64) | (FieldType::Int64, FieldType::Int32) => {
            FieldType::Int64
        }
        (a, b) if is_json_number(a) && is_json_number(b) => FieldType::Double,
        _ => {
            return Err(RecordError::json(format!(
                "array mixes {} and {} elements",
                current, next
            )));
        }
    };
    Ok(Some(widened))
}

fn is_json_number(field_type: &FieldType) -> bool {
    matches!(
        field_type,
        FieldType::Int32 | FieldType::Int64 | FieldType::Double
    )
}

/// Schema covering every object, members in first-seen order
///
/// A member missing from some object, or null in one, is optional.
fn object_schema(objects: &[&Map<String, Json>]) -> Result<Schema> {
    let mut names: Vec<&str> = Vec::new();
    for members in objects {
        for name in members.keys() {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
    }

    let mut fields = Vec::with_capacity(names.len());
    for name in names {
        let present: Vec<&Json> = objects.iter().filter_map(|m| m.get(name)).collect();
        let optional = present.len() < objects.len() || present.iter().any(|j| j.is_null());
        let field_type = common_type(&present)?.unwrap_or(FieldType::String);
        fields.push(FieldSchema::new(name, field_type, optional));
    }
    Schema::new(fields)
}

fn struct_value(members: &Map<String, Json>, schema: &Schema) -> Result<Struct> {
    let values = schema
        .fields()
        .iter()
        .map(|field| match members.get(&field.name) {
            Some(json) => to_value(json, &field.field_type),
            None => Ok(Value::Null),
        })
        .collect::<Result<Vec<_>>>()?;
    Struct::new(schema.clone(), values)
}

/// Convert a JSON value to an already inferred type
fn to_value(json: &Json, field_type: &FieldType) -> Result<Value> {
    let mismatch = || {
        RecordError::json(format!("cannot read JSON value {} as {}", json, field_type))
    };
    let value = match (json, field_type) {
        (Json::Null, _) => Value::Null,
        (Json::Bool(b), FieldType::Boolean) => Value::Boolean(*b),
        (Json::String(s), FieldType::String) => Value::String(s.clone()),
        (Json::Number(n), FieldType::Int32) => n
            .as_i64()
            .and_then(|i| i32::try_from(i).ok())
            .map(Value::Int32)
            .ok_or_else(mismatch)?,
        (Json::Number(n), FieldType::Int64) => n.as_i64().map(Value::Int64).ok_or_else(mismatch)?,
        (Json::Number(n), FieldType::Double) => {
            n.as_f64().map(Value::Double).ok_or_else(mismatch)?
        }
        (Json::Object(members), FieldType::Struct(schema)) => {
            Value::Struct(struct_value(members, schema)?)
        }
        (Json::Array(items), FieldType::Array(item_type)) => Value::Array(
            items
                .iter()
                .map(|item| to_value(item, item_type))
                .collect::<Result<Vec<_>>>()?,
        ),
        _ => return Err(mismatch()),
    };
    Ok(value)
}

fn number_type(n: &Number) -> Result<FieldType> {
    if let Some(i) = n.as_i64() {
        return Ok(if i32::try_from(i).is_ok() {
            FieldType::Int32
        } else {
            FieldType::Int64
        });
    }
    match n.as_f64() {
        Some(_) => Ok(FieldType::Double),
        None => Err(RecordError::json(format!("number {} is out of range", n))),
    }
}

/// Render a record as a JSON document
///
/// Absent parts and unset attributes are omitted.
pub fn record_to_json(record: &Record) -> Json {
    let mut out = Map::new();
    if let Some(key) = record.key() {
        out.insert("key".into(), value_to_json(&key.to_value()));
    }
    if let Some(value) = record.value() {
        out.insert("value".into(), value_to_json(&value.to_value()));
    }

    let RecordAttributes {
        topic,
        destination_topic,
        message_key,
        event_time,
        properties,
    } = record.attributes();
    if let Some(topic) = topic {
        out.insert("topic".into(), Json::from(topic.as_str()));
    }
    if let Some(destination) = destination_topic {
        out.insert("destinationTopic".into(), Json::from(destination.as_str()));
    }
    if let Some(message_key) = message_key {
        out.insert("messageKey".into(), Json::from(message_key.as_str()));
    }
    if let Some(event_time) = event_time {
        out.insert("eventTime".into(), Json::from(*event_time));
    }
    if !properties.is_empty() {
        let props = properties
            .iter()
            .map(|(k, v)| (k.clone(), Json::from(v.as_str())))
            .collect();
        out.insert("properties".into(), Json::Object(props));
    }

    Json::Object(out)
}

/// Render a value as JSON
///
/// Temporal values become their ISO-8601 text; non-finite floats become null.
pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Boolean(b) => Json::Bool(*b),
        Value::String(s) => Json::String(s.clone()),
        Value::Int32(i) => Json::from(*i),
        Value::Int64(i) => Json::from(*i),
        // Go through the shortest decimal form so 0.1f32 stays 0.1
        Value::Float(f) => f
            .to_string()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map_or(Json::Null, Json::Number),
        Value::Double(d) => Number::from_f64(*d).map_or(Json::Null, Json::Number),
        Value::Date(_) | Value::Time(_) | Value::DateTime(_) => Json::String(value.to_text()),
        Value::Struct(s) => Json::Object(
            s.iter()
                .map(|(field, v)| (field.name.clone(), value_to_json(v)))
                .collect(),
        ),
        Value::Array(items) => Json::Array(items.iter().map(value_to_json).collect()),
    }
}
