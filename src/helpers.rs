//! Shared helpers for best-effort reads of loosely typed MAAS JSON.
//!
//! MAAS reports most measurements as strings (`"min_temp": "-70"`) and is not
//! consistent about it, so every read is an independent attempt:
//!
//! - `opt_value_to_f64`: number or numeric string → `f64`, anything else → `None`
//! - `opt_value_to_string`: JSON string → `String`, anything else → `None`
//! - `is_truthy`: emptiness test used for "no data" and error-marker checks
//!
//! None of these fail; a malformed field just becomes absent.

use serde_json::Value;

/// Coerce an optional JSON value to a finite f64.
///
/// Numbers are used as-is, strings are trimmed and parsed. Null, booleans,
/// arrays, objects, unparseable strings and non-finite results are `None`.
pub(crate) fn opt_value_to_f64(v: Option<&Value>) -> Option<f64> {
    let parsed = match v? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    if !parsed.is_finite() {
        tracing::debug!("Dropping non-finite numeric value {}", parsed);
        return None;
    }
    Some(parsed)
}

/// Return the value as an owned string when it is a JSON string.
pub(crate) fn opt_value_to_string(v: Option<&Value>) -> Option<String> {
    v.and_then(Value::as_str).map(str::to_string)
}

/// Pass a value through unchanged, treating JSON `null` as absent.
pub(crate) fn opt_passthrough(v: Option<&Value>) -> Option<Value> {
    v.filter(|v| !v.is_null()).cloned()
}

/// Whether a JSON value carries any content.
///
/// `null`, `false`, zero, `""`, `[]` and `{}` are empty; everything else is not.
pub(crate) fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Whether a document is an object with a truthy `"error"` member.
pub(crate) fn has_error_marker(v: &Value) -> bool {
    v.as_object()
        .and_then(|o| o.get("error"))
        .is_some_and(is_truthy)
}
