//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Slack connection and message defaults
    #[serde(default)]
    pub slack: SlackSection,

    /// Retry policy configuration
    #[serde(default)]
    pub retry: RetrySection,

    /// Credential storage configuration
    #[serde(default)]
    pub credentials: CredentialsSection,
}

/// Slack configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlackSection {
    /// Slack host (default: `https://slack.com`)
    pub base_url: Option<String>,

    /// Token used instead of the stored credential
    pub token: Option<String>,

    /// Name of the stored credential to use
    pub token_name: Option<String>,

    /// Channel used when `--channel` is absent
    pub default_channel: Option<String>,

    /// Username used when `--username` is absent
    pub username: Option<String>,

    /// Icon emoji used when `--icon-emoji` is absent
    pub icon_emoji: Option<String>,

    /// HTTP request timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Retry policy configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    /// Maximum number of attempts per call
    pub max_attempts: Option<u32>,

    /// Delay before the first retry in milliseconds
    pub initial_backoff_ms: Option<u64>,
}

/// Credential storage configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialsSection {
    /// Credentials file path
    pub path: Option<PathBuf>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r##"# slack-post configuration file

[slack]
# Slack host; /api/{method} is appended (default: https://slack.com)
# base_url = "https://slack.com"

# Token to use instead of the stored credential (--token overrides this)
# Prefer `slack-post token save <TOKEN>` over putting tokens here.
# token = "xoxb-..."

# Name of the stored credential (default: "", the SLACK_credential key)
# token_name = "work"

# Channel used when --channel is not given
# default_channel = "#general"

# Message defaults (CLI flags override)
# username = "deploy-bot"
# icon_emoji = ":robot_face:"

# HTTP request timeout in seconds (default: 30)
# timeout_secs = 30

[retry]
# Maximum number of attempts per API call (default: 3)
# max_attempts = 3

# Delay before the first retry in milliseconds, doubled each retry (default: 1000)
# initial_backoff_ms = 1000

[credentials]
# Credentials file (default: <config dir>/slack-post/credentials.json)
# path = "/path/to/credentials.json"
"##
    .to_string()
}
