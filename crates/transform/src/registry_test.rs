//! Tests for step registry

use super::*;
use crate::drop::DropFactory;
use crate::{TransformResult, create_default_registry};
use recast_record::Record;

struct RejectingFactory;

impl StepFactory for RejectingFactory {
    fn create(&self, _config: &StepInstanceConfig) -> Result<Box<dyn Step>, String> {
        Err("always invalid".to_string())
    }

    fn name(&self) -> &'static str {
        "rejecting"
    }
}

struct PassStep;

impl Step for PassStep {
    fn apply(&self, record: Record) -> TransformResult<Option<Record>> {
        Ok(Some(record))
    }

    fn name(&self) -> &'static str {
        "pass"
    }
}

struct PassFactory;

impl StepFactory for PassFactory {
    fn create(&self, _config: &StepInstanceConfig) -> Result<Box<dyn Step>, String> {
        Ok(Box::new(PassStep))
    }

    fn name(&self) -> &'static str {
        "pass"
    }
}

#[test]
fn test_empty_registry() {
    let registry = StepRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
    assert!(registry.available_types().is_empty());
}

#[test]
fn test_register_and_create() {
    let mut registry = StepRegistry::new();
    registry.register("pass", PassFactory);

    assert!(!registry.is_empty());
    assert_eq!(registry.len(), 1);
    assert!(registry.contains("pass"));
    assert!(!registry.contains("nonexistent"));

    let step = registry.create(0, &StepInstanceConfig::new("pass")).unwrap();
    assert_eq!(step.name(), "pass");
}

#[test]
fn test_create_unknown_type() {
    let mut registry = StepRegistry::new();
    registry.register("pass", PassFactory);

    let err = registry
        .create(3, &StepInstanceConfig::new("unknown"))
        .err()
        .unwrap();
    match err {
        ConfigError::UnknownStepType {
            index,
            step_type,
            expected,
        } => {
            assert_eq!(index, 3);
            assert_eq!(step_type, "unknown");
            assert_eq!(expected, "pass");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_factory_error_is_wrapped() {
    let mut registry = StepRegistry::new();
    registry.register("rejecting", RejectingFactory);

    let err = registry
        .create(1, &StepInstanceConfig::new("rejecting"))
        .err()
        .unwrap();
    assert_eq!(err.to_string(), "step 1 (rejecting): always invalid");
}

#[test]
#[should_panic(expected = "already registered")]
fn test_duplicate_registration_panics() {
    let mut registry = StepRegistry::new();
    registry.register("drop", DropFactory);
    registry.register("drop", DropFactory);
}

#[test]
fn test_try_register_returns_false_on_duplicate() {
    let mut registry = StepRegistry::new();

    assert!(registry.try_register("drop", DropFactory));
    assert!(!registry.try_register("drop", DropFactory));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_default_registry_matches_known_types() {
    let registry = create_default_registry();

    let mut known = recast_config::KNOWN_STEP_TYPES.to_vec();
    known.sort_unstable();
    assert_eq!(registry.available_types(), known);
}

#[test]
fn test_parse_part() {
    assert_eq!(parse_part(&StepInstanceConfig::new("cast")), Ok(Part::Both));
    assert_eq!(
        parse_part(&StepInstanceConfig::new("cast").with_option("part", "key")),
        Ok(Part::Key)
    );
    assert_eq!(
        parse_part(&StepInstanceConfig::new("cast").with_option("part", "value")),
        Ok(Part::Value)
    );

    let err = parse_part(&StepInstanceConfig::new("cast").with_option("part", "both")).unwrap_err();
    assert!(err.contains("'key' or 'value'"));

    let err = parse_part(&StepInstanceConfig::new("cast").with_option("part", 1_i64)).unwrap_err();
    assert!(err.contains("must be a string"));
}
