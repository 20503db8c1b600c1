//! Configuration layer for slack-post.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The token is resolved as `--token`, then `slack.token`, then the stored
//! credential named by `--token-name` / `slack.token_name`.
//!
//! # Boolean Flag Semantics
//!
//! `--link-names` and `--reply-broadcast` only enable; when absent the field
//! is left out of the request. `--mrkdwn`, `--unfurl-links` and
//! `--unfurl-media` take an explicit `true`/`false` because Slack's defaults
//! for them are on.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command, ParseArg, PostArgs, TokenAction};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
