//! Slack token persistence.
//!
//! Tokens are stored per user under a named key so several workspaces can be
//! kept side by side. The key is [`CREDENTIAL_PREFIX`] followed by the name;
//! the default name is empty.

mod file;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use file::FileCredentialStore;

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix of every credential key.
pub const CREDENTIAL_PREFIX: &str = "SLACK_credential";

/// Returns the storage key for the credential called `name`.
///
/// ```
/// use slack_post::credential::credential_key;
///
/// assert_eq!(credential_key(""), "SLACK_credential");
/// assert_eq!(credential_key("work"), "SLACK_credentialwork");
/// ```
#[must_use]
pub fn credential_key(name: &str) -> String {
    format!("{CREDENTIAL_PREFIX}{name}")
}

/// A stored credential.
///
/// Serialized as `{"access_token": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackCredential {
    /// Bot or user OAuth token.
    pub access_token: String,
}

impl SlackCredential {
    /// Creates a credential for `token`.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            access_token: token.into(),
        }
    }
}

/// Errors that can occur while saving credentials.
///
/// Reads never fail: unreadable credentials are logged and reported as
/// missing. Saves refuse to replace a file they could not read.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Failed to write the credential file.
    #[error("Failed to write credential file: {0}")]
    Write(#[source] io::Error),

    /// Failed to serialize credentials to JSON.
    #[error("Failed to serialize credentials: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The existing file could not be read or has an unknown format, so it
    /// was not overwritten.
    #[error("Refusing to overwrite credential file '{}': {reason}", path.display())]
    Unusable {
        /// Path to the credential file
        path: PathBuf,
        /// Why the file could not be used
        reason: String,
    },
}

/// Abstraction over a user-scoped token store.
///
/// Implementations should:
/// - Return `None` for unknown names
/// - Log and return `None` for entries that cannot be parsed
/// - Replace any existing entry on save
pub trait CredentialStore: Send + Sync {
    /// Returns the access token saved under `name`, if any.
    fn get_token(&self, name: &str) -> Option<String>;

    /// Saves `token` under `name`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential cannot be persisted.
    fn save_token(
        &self,
        token: &str,
        name: &str,
    ) -> impl std::future::Future<Output = Result<(), CredentialError>> + Send;
}

/// Parses a stored credential value and extracts its token.
///
/// Returns `None` (after logging) for malformed JSON, and `None` when the
/// `access_token` field is absent.
fn parse_stored_token(key: &str, raw: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct Stored {
        access_token: Option<String>,
    }

    match serde_json::from_str::<Stored>(raw) {
        Ok(stored) => stored.access_token,
        Err(e) => {
            tracing::error!("Error parsing credential '{key}': {e}");
            None
        }
    }
}
