//! Typed field extraction from a JSON object.
//!
//! Every scalar type comes in two shapes: `parse_<type>` fails when the field
//! is missing or has the wrong JSON type, `parse_<type>_default` falls back to
//! the given default instead and never fails.

use serde_json::Value as JsonValue;

use crate::error::{Error, Result};

fn find<'a>(json: &'a JsonValue, field: &str) -> Result<&'a JsonValue> {
    json.get(field)
        .ok_or_else(|| Error::invalid_argument(format!("Could not find field '{field}'")))
}

fn as_integer(value: &JsonValue) -> Option<i64> {
    match value {
        JsonValue::Number(n) if n.is_i64() || n.is_u64() => n.as_i64(),
        _ => None,
    }
}

/// Required integer field.
pub fn parse_integer(json: &JsonValue, field: &str) -> Result<i64> {
    as_integer(find(json, field)?)
        .ok_or_else(|| Error::invalid_argument(format!("Field '{field}' was not an integer")))
}

/// Integer field or `default`.
pub fn parse_integer_default(json: &JsonValue, field: &str, default: i64) -> i64 {
    json.get(field).and_then(as_integer).unwrap_or(default)
}

/// Required float field. Integers are accepted and widened.
pub fn parse_float(json: &JsonValue, field: &str) -> Result<f64> {
    find(json, field)?
        .as_f64()
        .ok_or_else(|| Error::invalid_argument(format!("Field '{field}' was not a float")))
}

/// Float field or `default`.
pub fn parse_float_default(json: &JsonValue, field: &str, default: f64) -> f64 {
    json.get(field).and_then(JsonValue::as_f64).unwrap_or(default)
}

/// Required boolean field.
pub fn parse_boolean(json: &JsonValue, field: &str) -> Result<bool> {
    find(json, field)?
        .as_bool()
        .ok_or_else(|| Error::invalid_argument(format!("Field '{field}' was not a boolean")))
}

/// Boolean field or `default`.
pub fn parse_boolean_default(json: &JsonValue, field: &str, default: bool) -> bool {
    json.get(field).and_then(JsonValue::as_bool).unwrap_or(default)
}

/// Required string field.
pub fn parse_string(json: &JsonValue, field: &str) -> Result<String> {
    find(json, field)?
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| Error::invalid_argument(format!("Field '{field}' was not a string")))
}

/// String field or `default`.
pub fn parse_string_default(json: &JsonValue, field: &str, default: &str) -> String {
    json.get(field)
        .and_then(JsonValue::as_str)
        .unwrap_or(default)
        .to_owned()
}

/// Decodes every element of the array `field` with `f`, stopping at the
/// first failure.
pub fn parse_range<T, F>(json: &JsonValue, field: &str, f: F) -> Result<Vec<T>>
where
    F: FnMut(&JsonValue) -> Result<T>,
{
    match json.get(field) {
        Some(JsonValue::Array(elements)) => elements.iter().map(f).collect(),
        _ => Err(Error::invalid_argument(format!(
            "Expected '{field}' array field"
        ))),
    }
}
