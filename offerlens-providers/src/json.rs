//! JSON access helpers shared by the schema projectors.

use serde_json::Value;

/// True when the value carries content: null, `false`, zero, and the empty
/// string all mark a field as unset in the upstream schemas.
pub(crate) fn present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(set) => *set,
        Value::Number(number) => number.as_f64().is_some_and(|number| number != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Non-empty string at a JSON pointer.
pub(crate) fn string_at(value: &Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(ToString::to_string)
}

/// String entries of the array at a JSON pointer; non-strings are dropped.
pub(crate) fn strings_at(value: &Value, pointer: &str) -> Option<Vec<String>> {
    value.pointer(pointer).and_then(Value::as_array).map(|entries| {
        entries
            .iter()
            .filter_map(Value::as_str)
            .map(ToString::to_string)
            .collect()
    })
}

/// Human-readable JSON type name for processing-error details.
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
