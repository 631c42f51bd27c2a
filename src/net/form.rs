//! Form encoding for POST payloads.
//!
//! The backend reads request bodies as `application/x-www-form-urlencoded`,
//! so payload maps are flattened with the same bracket rules jQuery's
//! `$.param` uses: nested objects become `key[sub]`, scalar array items
//! become `key[]`, and nested array items keep their index (`key[0][sub]`).

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use serde_json::{Map, Number, Value};

/// Key/value data sent as the body of a POST request.
pub type Payload = Map<String, Value>;

/// Encode `payload` as a form body. An empty payload encodes to `""`.
#[must_use]
pub fn encode(payload: &Payload) -> String {
    let mut pairs = Vec::new();
    for (key, value) in payload {
        flatten(key, value, &mut pairs);
    }
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in &pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(members) => {
            for (key, member) in members {
                flatten(&format!("{prefix}[{key}]"), member, out);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                if matches!(item, Value::Object(_) | Value::Array(_)) {
                    flatten(&format!("{prefix}[{index}]"), item, out);
                } else {
                    flatten(&format!("{prefix}[]"), item, out);
                }
            }
        }
        scalar => out.push((prefix.to_owned(), scalar_text(scalar))),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number_text(number),
        Value::String(text) => text.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn number_text(number: &Number) -> String {
    if let Some(int) = number.as_i64() {
        return int.to_string();
    }
    if let Some(uint) = number.as_u64() {
        return uint.to_string();
    }
    // `f64`'s Display drops a trailing `.0`, matching how browsers stringify numbers.
    number.as_f64().map_or_else(|| number.to_string(), |float| float.to_string())
}
