//! Error types for Slack API operations.

use thiserror::Error;

use crate::retry::RetryExhausted;

/// Error type for the HTTP transport.
///
/// Only transport-level failures land here. Non-2xx responses are not errors
/// at this layer; Slack reports failures in the response payload instead.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and errors while reading the response body.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The request URL could not be built or was rejected by the client.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// Error type for Slack Web API calls.
///
/// Transport failures are retried by [`SlackApi`](super::SlackApi); every
/// other variant is returned on first occurrence.
#[derive(Debug, Error)]
pub enum SlackError {
    /// The HTTP transport failed on the final attempt.
    #[error("HTTP request failed: {0}")]
    Http(#[from] HttpError),

    /// Slack answered with `"ok": false`.
    #[error("Slack API error: {error}")]
    Api {
        /// The `error` code from the response (e.g. `invalid_auth`)
        error: String,
    },

    /// The request payload could not be encoded as form fields.
    #[error("Failed to encode request payload: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response body was not a valid Slack API response.
    #[error("Invalid response from Slack: {0}")]
    Decode(#[source] serde_json::Error),

    /// The retry budget allowed no attempts.
    #[error(transparent)]
    RetryExhausted(#[from] RetryExhausted),
}

impl SlackError {
    /// Error code used when Slack omits `error` from a failed response.
    pub const UNKNOWN_API_ERROR: &'static str = "unknown_error";

    /// Returns the Slack error code for [`SlackError::Api`] failures.
    #[must_use]
    pub fn api_error(&self) -> Option<&str> {
        match self {
            Self::Api { error } => Some(error),
            _ => None,
        }
    }
}
