//! Tests for cast step

use super::*;
use crate::TransformError;
use recast_record::{FieldType, Part, Payload, Struct, Value};

fn key_value_record() -> Record {
    let key = Struct::builder()
        .field("keyField1", FieldType::String, "key1")
        .field("keyField2", FieldType::Int32, 2)
        .build()
        .unwrap();
    let value = Struct::builder()
        .field("valueField1", FieldType::String, "value1")
        .build()
        .unwrap();
    Record::key_value(key, value)
}

#[test]
fn test_cast_key_to_string() {
    let step = CastStep::new(CastConfig::new(FieldType::String).with_part(Part::Key));
    let out = step.apply(key_value_record()).unwrap().unwrap();

    assert_eq!(
        out.key(),
        Some(&Payload::string(r#"{"keyField1": "key1", "keyField2": 2}"#))
    );
    assert!(out.value().and_then(Payload::as_struct).is_some());
}

#[test]
fn test_cast_both_parts() {
    let step = CastStep::new(CastConfig::new(FieldType::String));
    let out = step.apply(key_value_record()).unwrap().unwrap();

    assert_eq!(out.value(), Some(&Payload::string(r#"{"valueField1": "value1"}"#)));
    assert!(matches!(out.key(), Some(Payload::Scalar { .. })));
}

#[test]
fn test_cast_scalar_value() {
    let record = Record::new(Payload::string("123"));
    let step = CastStep::new(CastConfig::new(FieldType::Int32));
    let out = step.apply(record).unwrap().unwrap();

    assert_eq!(
        out.value(),
        Some(&Payload::Scalar {
            field_type: FieldType::Int32,
            value: Value::Int32(123),
        })
    );
}

#[test]
fn test_cast_struct_to_number_fails() {
    let step = CastStep::new(CastConfig::new(FieldType::Int64).with_part(Part::Value));
    let err = step.apply(key_value_record()).unwrap_err();
    assert!(matches!(err, TransformError::Schema(_)));
}

#[test]
fn test_cast_unparseable_scalar_fails() {
    let record = Record::new(Payload::string("not a date"));
    let step = CastStep::new(CastConfig::new(FieldType::Date));
    assert!(matches!(step.apply(record), Err(TransformError::Record(_))));
}
