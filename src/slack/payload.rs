//! Flattening of serializable payloads into form fields.
//!
//! Slack's Web API accepts `application/x-www-form-urlencoded` bodies where
//! every value is a string. Scalars are written as their text form, nested
//! arrays and objects as compact JSON, and `null` fields are dropped.

use serde::Serialize;
use serde::ser::Error as _;
use serde_json::Value;

/// Name of the authentication field merged into every call.
pub const TOKEN_FIELD: &str = "token";

/// Converts `payload` into ordered `(name, value)` form fields.
///
/// # Errors
///
/// Returns an error if `payload` fails to serialize or does not serialize
/// to a JSON object.
pub fn to_form_fields<P: Serialize + ?Sized>(
    payload: &P,
) -> Result<Vec<(String, String)>, serde_json::Error> {
    let Value::Object(map) = serde_json::to_value(payload)? else {
        return Err(serde_json::Error::custom(
            "payload must serialize to a JSON object",
        ));
    };

    Ok(map
        .into_iter()
        .filter_map(|(name, value)| field_text(value).map(|text| (name, text)))
        .collect())
}

/// Merges the token into `fields`, replacing any `token` field already present.
pub fn with_token(mut fields: Vec<(String, String)>, token: &str) -> Vec<(String, String)> {
    fields.retain(|(name, _)| name != TOKEN_FIELD);
    fields.push((TOKEN_FIELD.to_string(), token.to_string()));
    fields
}

fn field_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        nested @ (Value::Array(_) | Value::Object(_)) => Some(nested.to_string()),
    }
}
