//! Slack Web API response envelope.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::SlackError;

/// Response returned by every Web API method.
///
/// `ok` and `error` are common to all methods; anything else the method
/// returns (`channel`, `ts`, `message`, ...) is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlackApiResponse {
    /// Whether the call succeeded.
    pub ok: bool,

    /// Error code when `ok` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Method-specific fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SlackApiResponse {
    /// Parses a response body.
    ///
    /// # Errors
    ///
    /// Returns [`SlackError::Decode`] if the body is not a JSON object with
    /// a boolean `ok` field.
    pub fn from_slice(body: &[u8]) -> Result<Self, SlackError> {
        serde_json::from_slice(body).map_err(SlackError::Decode)
    }

    /// Turns an `ok: false` response into [`SlackError::Api`].
    ///
    /// # Errors
    ///
    /// Returns [`SlackError::Api`] carrying the `error` code, or
    /// [`SlackError::UNKNOWN_API_ERROR`] when Slack did not send one.
    pub fn into_result(self) -> Result<Self, SlackError> {
        if self.ok {
            return Ok(self);
        }

        Err(SlackError::Api {
            error: self
                .error
                .unwrap_or_else(|| SlackError::UNKNOWN_API_ERROR.to_string()),
        })
    }

    /// Returns a method-specific field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Returns a method-specific string field.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }
}

impl fmt::Display for SlackApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
