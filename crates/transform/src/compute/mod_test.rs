//! Tests for compute step

use super::*;
use recast_expr::EvalError;
use recast_record::{FieldType, RecordAttributes, StructuredValue};

fn key_value_record() -> Record {
    let key = Struct::builder()
        .field("keyField1", FieldType::String, "key1")
        .build()
        .unwrap();
    let value = Struct::builder()
        .field("valueField1", FieldType::String, "value1")
        .field("price", FieldType::Double, 2.5)
        .field("quantity", FieldType::Int32, 4)
        .build()
        .unwrap();
    Record::key_value(key, value)
}

fn field(name: &str, expression: &str, field_type: FieldType) -> ComputeField {
    ComputeField::new(name, expression, field_type).unwrap()
}

fn step(fields: Vec<ComputeField>) -> ComputeStep {
    ComputeStep::new(ComputeConfig::new(fields))
}

fn value_struct(record: &Record) -> &Struct {
    record.value().and_then(Payload::as_struct).unwrap()
}

#[test]
fn test_compute_arithmetic_with_declared_type() {
    let out = step(vec![
        field("key.newField1", "5*3", FieldType::Int32),
        field("value.total", "value.price * value.quantity", FieldType::Double),
    ])
    .apply(key_value_record())
    .unwrap()
    .unwrap();

    let key = out.key().and_then(Payload::as_struct).unwrap();
    assert_eq!(key.get("newField1"), Some(&Value::Int32(15)));
    assert_eq!(
        key.schema().field("newField1").unwrap().field_type,
        FieldType::Int32
    );
    assert_eq!(value_struct(&out).get("total"), Some(&Value::Double(10.0)));
}

#[test]
fn test_fields_see_the_record_before_the_step() {
    let out = step(vec![
        field("value.valueField1", "'changed'", FieldType::String),
        field("value.copy", "value.valueField1", FieldType::String),
    ])
    .apply(key_value_record())
    .unwrap()
    .unwrap();

    let value = value_struct(&out);
    assert_eq!(value.get("valueField1"), Some(&Value::from("changed")));
    assert_eq!(value.get("copy"), Some(&Value::from("value1")));
}

#[test]
fn test_overwrite_keeps_position() {
    let out = step(vec![field("value.quantity", "value.quantity + 1", FieldType::Int64)])
        .apply(key_value_record())
        .unwrap()
        .unwrap();

    let value = value_struct(&out);
    assert_eq!(value.schema().names(), vec!["valueField1", "price", "quantity"]);
    assert_eq!(value.get("quantity"), Some(&Value::Int64(5)));
}

#[test]
fn test_nested_target_creates_parent() {
    let out = step(vec![field("value.meta.source", "'web'", FieldType::String)])
        .apply(key_value_record())
        .unwrap()
        .unwrap();

    let meta = value_struct(&out).get("meta").and_then(Value::as_struct).unwrap();
    assert_eq!(meta.get("source"), Some(&Value::from("web")));
}

#[test]
fn test_null_result() {
    let required = step(vec![field("value.missing", "value.nope", FieldType::String)]);
    let err = required.apply(key_value_record()).unwrap_err();
    assert!(matches!(
        err,
        TransformError::Record(RecordError::NullNotAllowed(_))
    ));

    let optional = step(vec![
        field("value.missing", "value.nope", FieldType::String).with_optional(true),
    ]);
    let out = optional.apply(key_value_record()).unwrap().unwrap();
    let value = value_struct(&out);
    assert_eq!(value.get("missing"), Some(&Value::Null));
    assert!(value.schema().field("missing").unwrap().optional);
}

#[test]
fn test_unknown_root_fails_record() {
    let err = step(vec![field("value.a", "string", FieldType::String)])
        .apply(key_value_record())
        .unwrap_err();
    assert!(matches!(err, TransformError::Evaluation(EvalError::UnknownRoot(_))));
}

#[test]
fn test_coercion_failure_fails_record() {
    let err = step(vec![field("value.d", "'not a date'", FieldType::Date)])
        .apply(key_value_record())
        .unwrap_err();
    assert!(matches!(err, TransformError::Record(_)));
}

#[test]
fn test_attribute_targets() {
    let mut record = key_value_record();
    record.attributes_mut().message_key = Some("old".to_string());
    record
        .attributes_mut()
        .properties
        .insert("stale".to_string(), "x".to_string());

    let out = step(vec![
        field("destinationTopic", "'orders-' + value.quantity", FieldType::String),
        field("messageKey", "null", FieldType::String).with_optional(true),
        field("properties.count", "value.quantity * 2", FieldType::Int32),
        field("properties.stale", "null", FieldType::String).with_optional(true),
    ])
    .apply(record)
    .unwrap()
    .unwrap();

    let attributes = out.attributes();
    assert_eq!(attributes.destination_topic.as_deref(), Some("orders-4"));
    assert_eq!(attributes.message_key, None);
    assert_eq!(attributes.properties.get("count").map(String::as_str), Some("8"));
    assert!(!attributes.properties.contains_key("stale"));
}

#[test]
fn test_whole_part_replacement() {
    let out = step(vec![field("key", "key.keyField1", FieldType::String)])
        .apply(key_value_record())
        .unwrap()
        .unwrap();
    assert_eq!(out.key(), Some(&Payload::string("key1")));
}

#[test]
fn test_missing_or_scalar_part_fails() {
    let value_only = Record::new(Payload::string("v"));
    let err = step(vec![field("key.a", "1", FieldType::Int32)])
        .apply(value_only.clone())
        .unwrap_err();
    assert_eq!(err.to_string(), "schema transform failed: record has no key part");

    let err = step(vec![field("value.a", "1", FieldType::Int32)])
        .apply(value_only)
        .unwrap_err();
    assert!(err.to_string().contains("STRING scalar"));
}

#[test]
fn test_failed_record_leaves_no_partial_write() {
    let record = key_value_record().with_attributes(RecordAttributes::default());
    let result = step(vec![
        field("destinationTopic", "'first'", FieldType::String),
        field("value.bad", "value.price / 0", FieldType::Double),
    ])
    .apply(record);
    assert!(matches!(
        result,
        Err(TransformError::Evaluation(EvalError::DivisionByZero))
    ));
}
