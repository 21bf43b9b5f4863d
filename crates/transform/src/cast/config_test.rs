//! Tests for cast config

use super::*;

fn step(schema_type: &str) -> StepInstanceConfig {
    StepInstanceConfig::new("cast").with_option("schema-type", schema_type)
}

#[test]
fn test_parse_schema_type() {
    let config = CastConfig::try_from(&step("STRING")).unwrap();
    assert_eq!(config.schema_type, FieldType::String);
    assert_eq!(config.part, Part::Both);

    let config = CastConfig::try_from(&step("int64").with_option("part", "value")).unwrap();
    assert_eq!(config.schema_type, FieldType::Int64);
    assert_eq!(config.part, Part::Value);
}

#[test]
fn test_schema_type_required() {
    let err = CastConfig::try_from(&StepInstanceConfig::new("cast")).unwrap_err();
    assert!(err.contains("'schema-type' is required"));
}

#[test]
fn test_unsupported_schema_types() {
    for name in ["AVRO", "JSON", "STRUCT", ""] {
        let err = CastConfig::try_from(&step(name)).unwrap_err();
        assert!(err.contains("must be one of"), "{name}: {err}");
    }
}

#[test]
fn test_schema_type_wrong_type() {
    let config = StepInstanceConfig::new("cast").with_option("schema-type", true);
    let err = CastConfig::try_from(&config).unwrap_err();
    assert!(err.contains("must be a string"));
}
