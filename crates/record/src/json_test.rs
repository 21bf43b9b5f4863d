//! Tests for JSON mapping

use super::*;
use crate::StructuredValue;
use serde_json::json;

#[test]
fn test_record_from_json_full() {
    let doc = json!({
        "key": {"id": 7},
        "value": {"name": "Jane", "score": 4.5, "big": 5_000_000_000_i64},
        "topic": "input",
        "destinationTopic": "output",
        "messageKey": "k1",
        "eventTime": 1_700_000_000_000_i64,
        "properties": {"origin": "web", "retries": 3}
    });
    let record = record_from_json(&doc).unwrap();

    let key = record.key().unwrap().as_struct().unwrap();
    assert_eq!(key.get("id"), Some(&Value::Int32(7)));

    let value = record.value().unwrap().as_struct().unwrap();
    assert_eq!(value.schema().names(), vec!["name", "score", "big"]);
    assert_eq!(value.get("score"), Some(&Value::Double(4.5)));
    assert_eq!(value.get("big"), Some(&Value::Int64(5_000_000_000)));

    let attrs = record.attributes();
    assert_eq!(attrs.topic.as_deref(), Some("input"));
    assert_eq!(attrs.destination_topic.as_deref(), Some("output"));
    assert_eq!(attrs.message_key.as_deref(), Some("k1"));
    assert_eq!(attrs.event_time, Some(1_700_000_000_000));
    assert_eq!(attrs.properties.get("retries").map(String::as_str), Some("3"));
}

#[test]
fn test_scalar_value_part() {
    let record = record_from_json(&json!({"value": "hello"})).unwrap();
    assert!(record.key().is_none());
    assert_eq!(record.value(), Some(&Payload::string("hello")));
}

#[test]
fn test_null_member_is_optional_string() {
    let s = struct_from_json(json!({"a": null}).as_object().unwrap()).unwrap();
    let field = s.schema().field("a").unwrap();
    assert!(field.optional);
    assert_eq!(field.field_type, FieldType::String);
    assert_eq!(s.get("a"), Some(&Value::Null));
}

#[test]
fn test_array_numbers_widen() {
    let s = struct_from_json(json!({"xs": [1, 2.5, null]}).as_object().unwrap()).unwrap();
    assert_eq!(
        s.schema().field("xs").unwrap().field_type,
        FieldType::Array(Box::new(FieldType::Double))
    );
    assert_eq!(
        s.get("xs"),
        Some(&Value::Array(vec![Value::Double(1.0), Value::Double(2.5), Value::Null]))
    );

    let s = struct_from_json(json!({"xs": [1, 5_000_000_000_i64]}).as_object().unwrap()).unwrap();
    assert_eq!(
        s.get("xs"),
        Some(&Value::Array(vec![Value::Int64(1), Value::Int64(5_000_000_000)]))
    );
}

#[test]
fn test_mixed_number_array_round_trips() {
    let doc = json!({"value": {"xs": [1, 2.5]}});
    let record = record_from_json(&doc).unwrap();
    assert_eq!(record_to_json(&record), json!({"value": {"xs": [1.0, 2.5]}}));
}

#[test]
fn test_array_objects_unify_by_name() {
    let doc = json!({"value": {"xs": [{"a": 1, "b": 2}, {"b": 3, "a": 4}]}});
    let record = record_from_json(&doc).unwrap();

    let value = record.value().unwrap().as_struct().unwrap();
    let Some(FieldType::Array(item)) = value.schema().field("xs").map(|f| f.field_type.clone())
    else {
        panic!("xs is not an array");
    };
    let FieldType::Struct(schema) = *item else {
        panic!("items are not structs");
    };
    assert_eq!(schema.names(), vec!["a", "b"]);
    assert!(schema.fields().iter().all(|f| !f.optional));

    assert_eq!(
        record_to_json(&record),
        json!({"value": {"xs": [{"a": 1, "b": 2}, {"a": 4, "b": 3}]}})
    );
}

#[test]
fn test_array_objects_missing_members_are_optional() {
    let s = struct_from_json(
        json!({"xs": [{"a": 1}, {"b": "x"}, {"a": null, "b": "y"}]})
            .as_object()
            .unwrap(),
    )
    .unwrap();
    let Some(FieldType::Array(item)) = s.schema().field("xs").map(|f| f.field_type.clone()) else {
        panic!("xs is not an array");
    };
    let FieldType::Struct(schema) = *item else {
        panic!("items are not structs");
    };
    assert_eq!(schema.field("a").unwrap().field_type, FieldType::Int32);
    assert!(schema.field("a").unwrap().optional);
    assert_eq!(schema.field("b").unwrap().field_type, FieldType::String);
    assert!(schema.field("b").unwrap().optional);
}

#[test]
fn test_mixed_array_elements_fail() {
    let err = record_from_json(&json!({"value": {"xs": [1, "two"]}})).unwrap_err();
    assert_eq!(err.to_string(), record_error_text("array mixes INT32 and STRING elements"));
    assert!(record_from_json(&json!({"value": {"xs": [{"a": 1}, 2]}})).is_err());
    assert!(record_from_json(&json!({"value": {"xs": [{"a": 1}, {"a": "x"}]}})).is_err());
}

fn record_error_text(message: &str) -> String {
    RecordError::json(message).to_string()
}

#[test]
fn test_invalid_documents() {
    assert!(matches!(record_from_json(&json!([1, 2])), Err(RecordError::Json(_))));
    assert!(record_from_json(&json!({"value": [1]})).is_err());
    assert!(record_from_json(&json!({"topic": 1})).is_err());
    assert!(record_from_json(&json!({"eventTime": "now"})).is_err());
    assert!(record_from_json(&json!({"properties": "x"})).is_err());
}

#[test]
fn test_record_to_json() {
    let doc = json!({
        "key": "k",
        "value": {"name": "Jane", "nested": {"n": 1}, "xs": ["a"]},
        "destinationTopic": "out",
        "properties": {"p": "v"}
    });
    let record = record_from_json(&doc).unwrap();
    assert_eq!(record_to_json(&record), doc);
}

#[test]
fn test_value_to_json_special_values() {
    assert_eq!(value_to_json(&Value::Float(0.1)), json!(0.1));
    assert_eq!(value_to_json(&Value::Double(f64::NAN)), Json::Null);
    let date = Value::Date(chrono::NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    assert_eq!(value_to_json(&date), json!("2024-02-29"));
}
