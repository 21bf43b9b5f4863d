//! Tests for compute config

use super::*;

fn table(toml_text: &str) -> toml::Table {
    toml_text.parse::<toml::Table>().unwrap()
}

fn step(fields: toml::Value) -> StepInstanceConfig {
    StepInstanceConfig::new("compute").with_option("fields", fields)
}

fn fields(toml_text: &str) -> toml::Value {
    table(toml_text).remove("fields").unwrap()
}

#[test]
fn test_parse_targets() {
    assert_eq!(
        ComputeTarget::parse("value.total"),
        Ok(ComputeTarget::Value(vec!["total".into()]))
    );
    assert_eq!(
        ComputeTarget::parse("key.a.some-field"),
        Ok(ComputeTarget::Key(vec!["a".into(), "some-field".into()]))
    );
    assert_eq!(ComputeTarget::parse("key"), Ok(ComputeTarget::Key(Vec::new())));
    assert_eq!(
        ComputeTarget::parse("destinationTopic"),
        Ok(ComputeTarget::DestinationTopic)
    );
    assert_eq!(ComputeTarget::parse("messageKey"), Ok(ComputeTarget::MessageKey));
    assert_eq!(
        ComputeTarget::parse("properties.app.name"),
        Ok(ComputeTarget::Property("app.name".into()))
    );
}

#[test]
fn test_invalid_targets() {
    for name in ["some-field", "", "value.", "key..a", "properties", "properties.", "topicName"] {
        assert!(ComputeTarget::parse(name).is_err(), "{name}");
    }
}

#[test]
fn test_target_display() {
    for name in ["key", "value.a.b", "destinationTopic", "messageKey", "properties.x"] {
        assert_eq!(ComputeTarget::parse(name).unwrap().to_string(), name);
    }
}

#[test]
fn test_parse_fields() {
    let config = step(fields(
        r#"
        fields = [
          { name = "key.newField1", expression = "5*3", type = "INT32" },
          { name = "destinationTopic", expression = "date", type = "DATE", optional = true },
        ]
        "#,
    ));
    let parsed = ComputeConfig::try_from(&config).unwrap();

    assert_eq!(parsed.fields.len(), 2);
    let first = &parsed.fields[0];
    assert_eq!(first.target, ComputeTarget::Key(vec!["newField1".into()]));
    assert_eq!(first.field_type, FieldType::Int32);
    assert!(!first.optional);
    assert_eq!(first.expression.source(), "5*3");

    let second = &parsed.fields[1];
    assert_eq!(second.target, ComputeTarget::DestinationTopic);
    assert_eq!(second.field_type, FieldType::Date);
    assert!(second.optional);
}

#[test]
fn test_fields_required_and_non_empty() {
    let err = ComputeConfig::try_from(&StepInstanceConfig::new("compute")).unwrap_err();
    assert!(err.contains("'fields' is required"));

    let err = ComputeConfig::try_from(&step(toml::Value::Array(Vec::new()))).unwrap_err();
    assert!(err.contains("must not be empty"));
}

#[test]
fn test_invalid_entries() {
    let cases = [
        (r#"fields = [{ expression = "1", type = "INT64" }]"#, "'name' is required"),
        (r#"fields = [{ name = "value.a", type = "FLOAT" }]"#, "'expression' is required"),
        (r#"fields = [{ name = "value.a", expression = "1" }]"#, "'type' is required"),
        (r#"fields = [{ name = "", expression = "1", type = "DOUBLE" }]"#, "'name' must not be empty"),
        (r#"fields = [{ name = "value.a", expression = "", type = "DOUBLE" }]"#, "'expression' must not be empty"),
        (r#"fields = [{ name = "value.a", expression = "1", type = "AVRO" }]"#, "must be one of"),
        (r#"fields = [{ name = "value.a", expression = "1", type = "JSON" }]"#, "must be one of"),
        (r#"fields = [{ name = "some-field", expression = "1", type = "INT32" }]"#, "invalid target"),
        (
            r#"fields = [{ name = "value.a", expression = "1", type = "DOUBLE", optional = "true" }]"#,
            "'optional' must be a boolean",
        ),
        (r#"fields = [{ name = "value.a", expression = "1 +", type = "INT32" }]"#, "invalid expression"),
    ];

    for (text, expected) in cases {
        let err = ComputeConfig::try_from(&step(fields(text))).unwrap_err();
        assert!(err.starts_with("fields[0]: "), "{text}: {err}");
        assert!(err.contains(expected), "{text}: {err}");
    }
}

#[test]
fn test_entries_must_be_tables() {
    let err = ComputeConfig::try_from(&step(toml::Value::Array(vec!["x".into()]))).unwrap_err();
    assert!(err.contains("must be mappings"));
}

#[test]
fn test_bare_identifier_expressions_compile() {
    // Unknown roots are only rejected when a record is evaluated
    for expression in ["string", "int32", "datetime"] {
        assert!(ComputeField::new("value.a", expression, FieldType::String).is_ok());
    }
}
