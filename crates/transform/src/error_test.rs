//! Tests for transform error types

use super::*;
use recast_record::Value;

#[test]
fn test_error_creation() {
    let err = TransformError::schema("record has no key part");
    assert!(matches!(err, TransformError::Schema(_)));

    let err = TransformError::from(EvalError::DivisionByZero);
    assert!(matches!(err, TransformError::Evaluation(_)));

    let err = TransformError::from(RecordError::NullNotAllowed("x".into()));
    assert!(matches!(err, TransformError::Record(_)));
}

#[test]
fn test_error_display() {
    let err = TransformError::schema("cannot cast STRUCT to INT32");
    assert_eq!(err.to_string(), "schema transform failed: cannot cast STRUCT to INT32");

    let err = TransformError::from(EvalError::UnknownRoot("firstName".into()));
    assert_eq!(err.to_string(), "evaluation failed: unknown path root 'firstName'");

    let err = TransformError::from(RecordError::coercion(&Value::from("abc"), "INT32"));
    assert_eq!(
        err.to_string(),
        "schema transform failed: cannot coerce STRING value 'abc' to INT32"
    );
}
