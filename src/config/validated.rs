//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::credential::{CredentialStore, FileCredentialStore};
use crate::retry::RetryConfig;
use crate::slack::{ChatPostMessageArguments, MessageOptions, SlackApi};

use super::cli::{Cli, PostArgs};
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Slack host
    pub base_url: Url,

    /// Retry settings for every API call
    pub retry: RetryConfig,

    /// Per-request HTTP timeout
    pub timeout: Duration,

    /// Credentials file, if one could be determined
    pub credentials_path: Option<PathBuf>,

    /// Name of the stored credential to use
    pub token_name: String,

    /// Token given on the command line or in the config file
    pub explicit_token: Option<String>,

    /// Channel used when `post` has no `--channel`
    pub default_channel: Option<String>,

    /// Default bot username
    pub username: Option<String>,

    /// Default icon emoji
    pub icon_emoji: Option<String>,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let credentials = self
            .credentials_path
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| p.display().to_string());

        write!(
            f,
            "Config {{ base_url: {}, retry: {}x/{}ms, timeout: {}s, credentials: {}, \
             token_name: {:?}, explicit_token: {} }}",
            self.base_url,
            self.retry.max_attempts,
            self.retry.initial_backoff.as_millis(),
            self.timeout.as_secs(),
            credentials,
            self.token_name,
            self.explicit_token.is_some(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The base URL is invalid or not http(s)
    /// - `max_attempts` is zero
    /// - The timeout is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let slack = toml.map(|t| &t.slack);

        let base_url = Self::resolve_base_url(cli, toml)?;
        let retry = Self::build_retry_config(cli, toml)?;
        let timeout = Self::resolve_timeout(cli, toml)?;
        let credentials_path = Self::resolve_credentials_path(cli, toml);

        let token_name = cli
            .token_name
            .clone()
            .or_else(|| slack.and_then(|s| s.token_name.clone()))
            .unwrap_or_else(|| defaults::TOKEN_NAME.to_string());

        // CLI > TOML; empty values count as unset
        let explicit_token = cli
            .token
            .clone()
            .or_else(|| slack.and_then(|s| s.token.clone()))
            .filter(|t| !t.is_empty());

        Ok(Self {
            base_url,
            retry,
            timeout,
            credentials_path,
            token_name,
            explicit_token,
            default_channel: slack.and_then(|s| s.default_channel.clone()),
            username: slack.and_then(|s| s.username.clone()),
            icon_emoji: slack.and_then(|s| s.icon_emoji.clone()),
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// Builds the `chat.postMessage` arguments for a `post` invocation.
    ///
    /// Channel, username and icon emoji fall back to the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No channel is given anywhere
    /// - A JSON option is malformed
    /// - There is no text, blocks or attachments
    pub fn resolve_message(&self, args: &PostArgs) -> Result<ChatPostMessageArguments, ConfigError> {
        let channel = args
            .channel
            .clone()
            .or_else(|| self.default_channel.clone())
            .ok_or_else(|| {
                ConfigError::missing(
                    field::CHANNEL,
                    "Use --channel or set slack.default_channel in config file",
                )
            })?;

        validate_json(field::ATTACHMENTS, args.attachments.as_deref())?;
        validate_json(field::BLOCKS, args.blocks.as_deref())?;
        validate_json(field::METADATA, args.metadata.as_deref())?;

        let options = MessageOptions {
            attachments: args.attachments.clone(),
            blocks: args.blocks.clone(),
            icon_emoji: args.icon_emoji.clone().or_else(|| self.icon_emoji.clone()),
            icon_url: args.icon_url.clone(),
            // Flags only enable; absent means Slack's default
            link_names: args.link_names.then_some(true),
            metadata: args.metadata.clone(),
            mrkdwn: args.mrkdwn,
            parse: args.parse.map(Into::into),
            reply_broadcast: args.reply_broadcast.then_some(true),
            thread_ts: args.thread_ts.clone(),
            unfurl_links: args.unfurl_links,
            unfurl_media: args.unfurl_media,
            username: args.username.clone().or_else(|| self.username.clone()),
        };

        let mut message = ChatPostMessageArguments::new(channel).with_options(options);
        message.text = args.text.clone();

        if !message.has_content() {
            return Err(ConfigError::missing(
                field::CONTENT,
                "Use --text, --blocks or --attachments",
            ));
        }

        Ok(message)
    }

    /// Returns the token to post with: the explicit token if any, otherwise
    /// the credential stored under [`token_name`](Self::token_name).
    pub fn resolve_token(&self, store: &impl CredentialStore) -> Option<String> {
        self.explicit_token
            .clone()
            .or_else(|| store.get_token(&self.token_name))
    }

    /// Opens the credential store at the resolved path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoCredentialsPath`] if no path was configured
    /// and the platform has no user config directory.
    pub fn credential_store(&self) -> Result<FileCredentialStore, ConfigError> {
        self.credentials_path
            .as_ref()
            .map(FileCredentialStore::new)
            .ok_or(ConfigError::NoCredentialsPath)
    }

    /// Builds an API caller over `client` with this configuration's base URL
    /// and retry settings.
    #[must_use]
    pub fn api<H>(&self, client: H) -> SlackApi<H> {
        SlackApi::new(client)
            .with_base_url(self.base_url.clone())
            .with_retry_config(self.retry)
    }

    fn resolve_base_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let url_str = cli
            .base_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.slack.base_url.as_deref()))
            .unwrap_or(defaults::BASE_URL);

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: "scheme must be http or https".to_string(),
            });
        }

        Ok(url)
    }

    fn build_retry_config(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<RetryConfig, ConfigError> {
        let retry = toml.map(|t| &t.retry);

        // Priority: CLI explicit > TOML > default
        let max_attempts = cli
            .retry_max
            .or_else(|| retry.and_then(|r| r.max_attempts))
            .unwrap_or(defaults::RETRY_MAX_ATTEMPTS);

        let initial_backoff_ms = cli
            .retry_delay_ms
            .or_else(|| retry.and_then(|r| r.initial_backoff_ms))
            .unwrap_or(defaults::RETRY_INITIAL_BACKOFF_MS);

        // Zero attempts would fail every call without sending anything
        if max_attempts == 0 {
            return Err(ConfigError::InvalidRetry(
                "max_attempts must be greater than 0".to_string(),
            ));
        }

        Ok(RetryConfig::new()
            .with_max_attempts(max_attempts)
            .with_initial_backoff(Duration::from_millis(initial_backoff_ms)))
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.slack.timeout_secs))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_credentials_path(cli: &Cli, toml: Option<&TomlConfig>) -> Option<PathBuf> {
        cli.credentials_file
            .clone()
            .or_else(|| toml.and_then(|t| t.credentials.path.clone()))
            .or_else(FileCredentialStore::default_path)
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn validate_json(field: &'static str, value: Option<&str>) -> Result<(), ConfigError> {
    let Some(value) = value else {
        return Ok(());
    };

    serde_json::from_str::<serde_json::Value>(value)
        .map(drop)
        .map_err(|e| ConfigError::InvalidJson {
            field,
            reason: e.to_string(),
        })
}
