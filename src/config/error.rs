//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Missing required field that must be provided by CLI or config file.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// Invalid URL provided.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid duration value.
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid retry configuration.
    #[error("Invalid retry configuration: {0}")]
    InvalidRetry(String),

    /// A JSON-valued message option is not well-formed.
    #[error("Invalid JSON for {field}: {reason}")]
    InvalidJson {
        /// Name of the option
        field: &'static str,
        /// Parser message
        reason: String,
    },

    /// No credential directory could be determined.
    #[error("Cannot locate the credentials file. Use --credentials-file or set credentials.path")]
    NoCredentialsPath,
}

/// Well-known field names for `MissingRequired` and `InvalidJson` errors.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The target channel.
    pub const CHANNEL: &str = "channel";
    /// The message content (text, blocks or attachments).
    pub const CONTENT: &str = "text";
    /// The attachments option.
    pub const ATTACHMENTS: &str = "attachments";
    /// The blocks option.
    pub const BLOCKS: &str = "blocks";
    /// The metadata option.
    pub const METADATA: &str = "metadata";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
