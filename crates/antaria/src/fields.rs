//! Reading typed values out of status fragments.
//!
//! The server is loose with types: counts arrive as numbers or numeric
//! strings, flags as `0`/`1` or `"0"`/`"1"`. These helpers accept both.

use antaria_session::{EntityId, Fragment};
use serde_json::Value;

use crate::AntariaError;

/// Reads an integer from a number or numeric string. Floats truncate.
pub(crate) fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}

pub(crate) fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// The field itself, or `MissingField`.
pub(crate) fn required<'a>(
    status: &'a Fragment,
    module: &str,
    field: &str,
) -> Result<&'a Value, AntariaError> {
    status.get(field).ok_or_else(|| AntariaError::MissingField {
        module: module.to_string(),
        field: field.to_string(),
    })
}

fn invalid(module: &str, field: &str, value: &Value) -> AntariaError {
    AntariaError::InvalidField {
        module: module.to_string(),
        field: field.to_string(),
        value: value.clone(),
    }
}

pub(crate) fn string(
    status: &Fragment,
    module: &str,
    field: &str,
) -> Result<String, AntariaError> {
    match required(status, module, field)? {
        Value::String(s) => Ok(s.clone()),
        Value::Null => Ok(String::new()),
        other => Err(invalid(module, field, other)),
    }
}

pub(crate) fn int(
    status: &Fragment,
    module: &str,
    field: &str,
) -> Result<i64, AntariaError> {
    let value = required(status, module, field)?;
    as_int(value).ok_or_else(|| invalid(module, field, value))
}

/// An integer that reads as 0 when absent or unreadable.
pub(crate) fn int_or_zero(status: &Fragment, field: &str) -> i64 {
    status.get(field).and_then(as_int).unwrap_or(0)
}

pub(crate) fn float(
    status: &Fragment,
    module: &str,
    field: &str,
) -> Result<f64, AntariaError> {
    let value = required(status, module, field)?;
    as_float(value).ok_or_else(|| invalid(module, field, value))
}

/// A `0`/`1` flag; absent reads as `false`.
pub(crate) fn flag(status: &Fragment, field: &str) -> bool {
    match status.get(field) {
        Some(Value::Bool(b)) => *b,
        Some(v) => as_int(v).is_some_and(|n| n != 0),
        None => false,
    }
}

pub(crate) fn entity_id(
    status: &Fragment,
    module: &str,
    field: &str,
) -> Result<EntityId, AntariaError> {
    let value = required(status, module, field)?;
    EntityId::from_value(value).ok_or_else(|| invalid(module, field, value))
}
