//! Type coercion
//!
//! One fixed rule set converts a value to a target field type. Cast steps,
//! compute fields and `==` comparisons all go through [`coerce`], so a value
//! that compares equal to a literal also casts to it.
//!
//! | target | accepts |
//! |--------|---------|
//! | STRING | anything, via canonical text |
//! | BOOLEAN | booleans, `"true"`/`"false"`, integers (non-zero = true) |
//! | INT32/INT64 | numerics (range-checked, floats truncate), numeric strings |
//! | FLOAT/DOUBLE | numerics, numeric strings |
//! | DATE | dates, date-times, ISO dates, integers as epoch days |
//! | TIME | times, date-times, `HH:MM:SS[.fff]`, integers as millis of day |
//! | DATETIME | date-times, dates, RFC 3339 / naive strings, integers as epoch millis |
//! | STRUCT/ARRAY | values of the same shape only |
//!
//! Null coerces to null for every target.

use crate::{FieldType, RecordError, Result, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

#[cfg(test)]
#[path = "coerce_test.rs"]
mod tests;

/// Convert `value` to `target` following the fixed coercion rules
pub fn coerce(value: &Value, target: &FieldType) -> Result<Value> {
    if value.is_null() || value.conforms_to(target) {
        return Ok(value.clone());
    }

    let fail = || RecordError::coercion(value, target);

    match target {
        FieldType::String => Ok(Value::String(value.to_text())),
        FieldType::Boolean => to_bool(value).map(Value::Boolean).ok_or_else(fail),
        FieldType::Int32 => to_i64(value)
            .and_then(|i| i32::try_from(i).ok())
            .map(Value::Int32)
            .ok_or_else(fail),
        FieldType::Int64 => to_i64(value).map(Value::Int64).ok_or_else(fail),
        FieldType::Float => to_f64(value)
            .filter(|f| !f.is_finite() || f.abs() <= f64::from(f32::MAX))
            .map(|f| Value::Float(f as f32))
            .ok_or_else(fail),
        FieldType::Double => to_f64(value).map(Value::Double).ok_or_else(fail),
        FieldType::Date => to_date(value).map(Value::Date).ok_or_else(fail),
        FieldType::Time => to_time(value).map(Value::Time).ok_or_else(fail),
        FieldType::DateTime => to_datetime(value).map(Value::DateTime).ok_or_else(fail),
        FieldType::Struct(_) | FieldType::Array(_) => Err(fail()),
    }
}

fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Boolean(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        Value::Int32(_) | Value::Int64(_) => value.as_i64().map(|i| i != 0),
        _ => None,
    }
}

fn to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Int32(_) | Value::Int64(_) => value.as_i64(),
        Value::Float(_) | Value::Double(_) => value.as_f64().and_then(truncate),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    }
}

/// Truncate toward zero if the float fits in an i64
fn truncate(f: f64) -> Option<i64> {
    let t = f.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is out of range
    if t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64 {
        Some(t as i64)
    } else {
        None
    }
}

fn to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        other => other.as_f64(),
    }
}

fn to_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Date(d) => Some(*d),
        Value::DateTime(dt) => Some(dt.date_naive()),
        Value::String(s) => {
            let s = s.trim();
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .or_else(|| parse_datetime(s).map(|dt| dt.date_naive()))
        }
        Value::Int32(_) | Value::Int64(_) => {
            let days = value.as_i64()?;
            DateTime::<Utc>::UNIX_EPOCH
                .date_naive()
                .checked_add_signed(TimeDelta::try_days(days)?)
        }
        _ => None,
    }
}

fn to_time(value: &Value) -> Option<NaiveTime> {
    match value {
        Value::Time(t) => Some(*t),
        Value::DateTime(dt) => Some(dt.time()),
        Value::String(s) => {
            let s = s.trim();
            NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
                .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
                .ok()
        }
        Value::Int32(_) | Value::Int64(_) => {
            let millis = value.as_i64()?;
            if !(0..86_400_000).contains(&millis) {
                return None;
            }
            let secs = u32::try_from(millis / 1000).ok()?;
            let nanos = u32::try_from(millis % 1000).ok()? * 1_000_000;
            NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos)
        }
        _ => None,
    }
}

fn to_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::DateTime(dt) => Some(*dt),
        Value::Date(d) => d.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc()),
        Value::String(s) => parse_datetime(s.trim()),
        Value::Int32(_) | Value::Int64(_) => DateTime::from_timestamp_millis(value.as_i64()?),
        _ => None,
    }
}

/// Parse RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` (as UTC) or a bare date
fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
