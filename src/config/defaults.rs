//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use crate::retry::RetryConfig;

/// Default Slack host.
pub const BASE_URL: &str = crate::slack::DEFAULT_BASE_URL;

/// Default maximum number of attempts per API call.
pub const RETRY_MAX_ATTEMPTS: u32 = RetryConfig::DEFAULT_MAX_ATTEMPTS;

/// Default delay before the first retry, in milliseconds.
pub const RETRY_INITIAL_BACKOFF_MS: u64 = 1000;

/// Default per-request HTTP timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Default credential name (the bare `SLACK_credential` key).
pub const TOKEN_NAME: &str = "";

/// Default file written by `init`.
pub const CONFIG_FILE: &str = "slack-post.toml";

