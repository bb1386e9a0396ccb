//! Form payload normalization.
//!
//! Dialog forms hold empty strings for untouched inputs. The backend
//! distinguishes "absent" from "empty", so payloads are normalized to
//! explicit `null` before they are sent.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;

/// Replace top-level empty-string fields of a JSON object with `null`.
///
/// Non-object values are returned unchanged.
pub fn convert_empty_to_null(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| match v {
                    Value::String(s) if s.is_empty() => (k, Value::Null),
                    other => (k, other),
                })
                .collect(),
        ),
        other => other,
    }
}

/// Recursively replace empty strings with `null` in objects and arrays.
pub fn deep_convert_empty_to_null(value: Value) -> Value {
    match value {
        Value::String(s) if s.is_empty() => Value::Null,
        Value::Array(items) => {
            Value::Array(items.into_iter().map(deep_convert_empty_to_null).collect())
        }
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, deep_convert_empty_to_null(v)))
                .collect(),
        ),
        other => other,
    }
}

/// Typed normalization: round-trips `value` through JSON with every empty
/// string (at any depth) turned into `null`.
///
/// String fields that should be nullable must be `Option<String>` for the
/// round trip to succeed.
pub fn normalize<T>(value: &T) -> Result<T, CoreError>
where
    T: Serialize + DeserializeOwned,
{
    let json = serde_json::to_value(value)
        .map_err(|e| CoreError::Internal(format!("Failed to encode form: {e}")))?;
    serde_json::from_value(deep_convert_empty_to_null(json))
        .map_err(|e| CoreError::Validation(format!("Form cannot be normalized: {e}")))
}

/// `true` when an optional string is absent or whitespace-only.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |s| s.trim().is_empty())
}
