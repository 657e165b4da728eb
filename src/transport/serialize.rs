use crate::domain::{Value, format_number, iso_timestamp};

/// On-wire string form of a parameter value.
///
/// Falsy values (including `0` and `""`) become the literal `"null"`. Dates drop
/// their trailing `Z`; sequences and objects are rendered as compact JSON.
pub fn serialize(value: &Value) -> String {
    if value.is_falsy() {
        return "null".to_owned();
    }

    match value {
        Value::Date(date) => strip_zulu(iso_timestamp(date)),
        Value::Sequence(_) | Value::Object(_) => value.to_json().to_string(),
        Value::Number(number) => format_number(*number),
        Value::String(text) => text.clone(),
        Value::Bool(_) => "true".to_owned(),
        Value::Null => "null".to_owned(),
    }
}

fn strip_zulu(mut text: String) -> String {
    if text.ends_with('Z') {
        text.pop();
    }
    text
}
