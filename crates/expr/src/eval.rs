//! Expression evaluation
//!
//! Evaluation walks the syntax tree against an [`EvalContext`] and never
//! mutates it.
//!
//! - Integer arithmetic stays INT64 and fails on overflow; any floating-point
//!   operand makes the result DOUBLE.
//! - `+` with a STRING operand concatenates canonical text.
//! - Arithmetic with a null operand yields null.
//! - `==` compares numbers by value (at FLOAT precision when either side is
//!   FLOAT) and otherwise coerces one side to the other's type with the same
//!   rules casts use; null equals only null.
//! - Ordering comparisons with a null operand are false.
//! - In boolean context null is false; any other non-boolean is an error.

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::{EvalContext, EvalError};
use recast_record::{FieldType, Value, coerce};
use std::cmp::Ordering;

#[cfg(test)]
#[path = "eval_test.rs"]
mod tests;

/// Evaluate an expression to a value
pub fn evaluate<C>(expr: &Expr, ctx: &C) -> Result<Value, EvalError>
where
    C: EvalContext + ?Sized,
{
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Path(path) => Ok(ctx.resolve(path)?.into_owned()),
        Expr::Unary { op, operand } => {
            let value = evaluate(operand, ctx)?;
            match op {
                UnaryOp::Not => Ok(Value::Boolean(!truthy(&value)?)),
                UnaryOp::Negate => negate(value),
            }
        }
        Expr::Binary { left, op, right } => match op {
            BinaryOp::And => {
                let result = evaluate_predicate(left, ctx)? && evaluate_predicate(right, ctx)?;
                Ok(Value::Boolean(result))
            }
            BinaryOp::Or => {
                let result = evaluate_predicate(left, ctx)? || evaluate_predicate(right, ctx)?;
                Ok(Value::Boolean(result))
            }
            op => {
                let left = evaluate(left, ctx)?;
                let right = evaluate(right, ctx)?;
                binary(*op, &left, &right)
            }
        },
    }
}

/// Evaluate an expression in boolean context
pub fn evaluate_predicate<C>(expr: &Expr, ctx: &C) -> Result<bool, EvalError>
where
    C: EvalContext + ?Sized,
{
    truthy(&evaluate(expr, ctx)?)
}

fn truthy(value: &Value) -> Result<bool, EvalError> {
    match value {
        Value::Boolean(b) => Ok(*b),
        Value::Null => Ok(false),
        other => Err(EvalError::NotBoolean(other.type_name())),
    }
}

fn negate(value: Value) -> Result<Value, EvalError> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::Int32(i) => Ok(Value::Int64(-i64::from(i))),
        Value::Int64(i) => i
            .checked_neg()
            .map(Value::Int64)
            .ok_or(EvalError::Overflow("-")),
        Value::Float(f) => Ok(Value::Float(-f)),
        Value::Double(d) => Ok(Value::Double(-d)),
        other => Err(EvalError::InvalidOperand {
            op: "-",
            operand: other.type_name(),
        }),
    }
}

fn binary(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let result = match op {
        BinaryOp::Eq => Value::Boolean(values_equal(left, right)?),
        BinaryOp::Ne => Value::Boolean(!values_equal(left, right)?),
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            let ordering = compare_values(left, right)?;
            Value::Boolean(ordering.is_some_and(|ord| match op {
                BinaryOp::Lt => ord == Ordering::Less,
                BinaryOp::Le => ord != Ordering::Greater,
                BinaryOp::Gt => ord == Ordering::Greater,
                _ => ord != Ordering::Less,
            }))
        }
        _ => arithmetic(op, left, right)?,
    };
    Ok(result)
}

/// Equality with coercion
///
/// Null equals only null. Numbers compare by value regardless of width.
/// Otherwise one side is coerced to the other's type; a string that does not
/// parse as the other type is compared by its text.
pub fn values_equal(left: &Value, right: &Value) -> Result<bool, EvalError> {
    match (left, right) {
        (Value::Null, Value::Null) => return Ok(true),
        (Value::Null, _) | (_, Value::Null) => return Ok(false),
        _ => {}
    }

    if left.is_numeric() && right.is_numeric() {
        return Ok(compare_numbers(left, right) == Some(Ordering::Equal));
    }
    if left.type_name() == right.type_name() {
        return Ok(left == right);
    }
    if is_structured(left) || is_structured(right) {
        return Err(EvalError::incomparable(left, right));
    }

    match unify(left, right) {
        Some((l, r)) => Ok(l == r),
        None => Err(EvalError::incomparable(left, right)),
    }
}

/// Ordering with coercion; `None` when either side is null or NaN
pub fn compare_values(left: &Value, right: &Value) -> Result<Option<Ordering>, EvalError> {
    if left.is_null() || right.is_null() {
        return Ok(None);
    }
    if left.is_numeric() && right.is_numeric() {
        return Ok(compare_numbers(left, right));
    }
    if is_structured(left) || is_structured(right) {
        return Err(EvalError::incomparable(left, right));
    }

    let (l, r) = if left.type_name() == right.type_name() {
        (left.clone(), right.clone())
    } else {
        unify(left, right).ok_or_else(|| EvalError::incomparable(left, right))?
    };

    let ordering = match (&l, &r) {
        (Value::String(a), Value::String(b)) => a.partial_cmp(b),
        (Value::Boolean(a), Value::Boolean(b)) => a.partial_cmp(b),
        (Value::Date(a), Value::Date(b)) => a.partial_cmp(b),
        (Value::Time(a), Value::Time(b)) => a.partial_cmp(b),
        (Value::DateTime(a), Value::DateTime(b)) => a.partial_cmp(b),
        _ if l.is_numeric() && r.is_numeric() => compare_numbers(&l, &r),
        _ => return Err(EvalError::incomparable(left, right)),
    };
    Ok(ordering)
}

/// Coerce one side to the other's type
///
/// A string side is converted first, so `'42' == 42` compares numbers; the
/// other direction (rendering the non-string as text) is the fallback.
fn unify(left: &Value, right: &Value) -> Option<(Value, Value)> {
    let convert_left = |target: &Value| {
        let field_type = target.field_type()?;
        coerce(left, &field_type).ok().map(|l| (l, target.clone()))
    };
    let convert_right = |target: &Value| {
        let field_type = target.field_type()?;
        coerce(right, &field_type).ok().map(|r| (target.clone(), r))
    };

    if matches!(left, Value::String(_)) {
        convert_left(right).or_else(|| convert_right(left))
    } else {
        convert_right(left).or_else(|| convert_left(right))
    }
}

fn is_structured(value: &Value) -> bool {
    matches!(value, Value::Struct(_) | Value::Array(_))
}

fn compare_numbers(left: &Value, right: &Value) -> Option<Ordering> {
    // A FLOAT side is compared at FLOAT precision, so 0.1f32 == 0.1
    if matches!(left, Value::Float(_)) || matches!(right, Value::Float(_)) {
        let as_float = |v: &Value| match coerce(v, &FieldType::Float) {
            Ok(Value::Float(f)) => Some(f),
            _ => None,
        };
        if let (Some(a), Some(b)) = (as_float(left), as_float(right)) {
            return a.partial_cmp(&b);
        }
    }

    match (left.as_i64(), right.as_i64()) {
        (Some(a), Some(b)) => Some(a.cmp(&b)),
        _ => left.as_f64()?.partial_cmp(&right.as_f64()?),
    }
}

fn arithmetic(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    if left.is_null() || right.is_null() {
        return Ok(Value::Null);
    }

    if op == BinaryOp::Add
        && (matches!(left, Value::String(_)) || matches!(right, Value::String(_)))
    {
        return Ok(Value::String(format!("{}{}", left.to_text(), right.to_text())));
    }

    if let (Some(a), Some(b)) = (left.as_i64(), right.as_i64()) {
        let result = match op {
            BinaryOp::Add => a.checked_add(b),
            BinaryOp::Sub => a.checked_sub(b),
            BinaryOp::Mul => a.checked_mul(b),
            BinaryOp::Div | BinaryOp::Rem if b == 0 => return Err(EvalError::DivisionByZero),
            BinaryOp::Div => a.checked_div(b),
            BinaryOp::Rem => a.checked_rem(b),
            _ => return Err(EvalError::invalid_operands(op.symbol(), left, right)),
        };
        return result
            .map(Value::Int64)
            .ok_or(EvalError::Overflow(op.symbol()));
    }

    if left.is_numeric() && right.is_numeric() {
        let (Some(a), Some(b)) = (left.as_f64(), right.as_f64()) else {
            return Err(EvalError::invalid_operands(op.symbol(), left, right));
        };
        let result = match op {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div | BinaryOp::Rem if b == 0.0 => return Err(EvalError::DivisionByZero),
            BinaryOp::Div => a / b,
            BinaryOp::Rem => a % b,
            _ => return Err(EvalError::invalid_operands(op.symbol(), left, right)),
        };
        return Ok(Value::Double(result));
    }

    Err(EvalError::invalid_operands(op.symbol(), left, right))
}
