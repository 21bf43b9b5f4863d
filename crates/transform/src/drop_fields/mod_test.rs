//! Tests for drop-fields step

use super::*;
use recast_record::{FieldType, Part, Payload, Struct, StructuredValue};

fn key_value_record() -> Record {
    let key = Struct::builder()
        .field("keyField1", FieldType::String, "key1")
        .field("keyField2", FieldType::String, "key2")
        .build()
        .unwrap();
    let value = Struct::builder()
        .field("keyField1", FieldType::String, "value-side")
        .field("valueField1", FieldType::String, "value1")
        .build()
        .unwrap();
    Record::key_value(key, value)
}

fn names(payload: Option<&Payload>) -> Vec<String> {
    payload
        .and_then(Payload::as_struct)
        .map(|s| s.schema().names().iter().map(|n| n.to_string()).collect())
        .unwrap_or_default()
}

fn step(fields: &[&str], part: Part) -> DropFieldsStep {
    let fields = fields.iter().map(|f| f.to_string()).collect();
    DropFieldsStep::new(DropFieldsConfig::new(fields).with_part(part))
}

#[test]
fn test_drop_from_both_parts() {
    let out = step(&["keyField1"], Part::Both)
        .apply(key_value_record())
        .unwrap()
        .unwrap();

    assert_eq!(names(out.key()), vec!["keyField2"]);
    assert_eq!(names(out.value()), vec!["valueField1"]);
}

#[test]
fn test_drop_from_key_only() {
    let out = step(&["keyField1"], Part::Key)
        .apply(key_value_record())
        .unwrap()
        .unwrap();

    assert_eq!(names(out.key()), vec!["keyField2"]);
    assert_eq!(names(out.value()), vec!["keyField1", "valueField1"]);
}

#[test]
fn test_drop_from_value_only() {
    let out = step(&["keyField1"], Part::Value)
        .apply(key_value_record())
        .unwrap()
        .unwrap();

    assert_eq!(names(out.key()), vec!["keyField1", "keyField2"]);
    assert_eq!(names(out.value()), vec!["valueField1"]);
}

#[test]
fn test_missing_field_is_noop() {
    let out = step(&["nope"], Part::Both)
        .apply(key_value_record())
        .unwrap()
        .unwrap();
    assert_eq!(out, key_value_record());
}

#[test]
fn test_scalar_part_unchanged() {
    let record = Record::new(Payload::string("plain"));
    let out = step(&["a"], Part::Both).apply(record.clone()).unwrap().unwrap();
    assert_eq!(out, record);
}

#[test]
fn test_values_follow_schema() {
    let out = step(&["keyField1"], Part::Key)
        .apply(key_value_record())
        .unwrap()
        .unwrap();
    let key = out.key().and_then(Payload::as_struct).unwrap();
    assert_eq!(key.len(), 1);
    assert_eq!(key.get("keyField2").and_then(|v| v.as_str()), Some("key2"));
}

#[test]
fn test_factory() {
    let config = StepInstanceConfig::new("drop-fields").with_option("fields", vec!["a"]);
    let step = DropFieldsFactory.create(&config).unwrap();
    assert_eq!(step.name(), "drop-fields");

    assert!(DropFieldsFactory.create(&StepInstanceConfig::new("drop-fields")).is_err());
}
