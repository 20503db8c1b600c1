//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use slack_post::config::{ConfigError, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::run::RunError;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid args, missing token, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - network failure, API error, etc.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::MissingRequired { field: f, .. } if *f == field::CHANNEL => {
            eprintln!("\nRun 'slack-post init' to generate a configuration template with default_channel.");
        }
        ConfigError::FileRead { .. } => {
            eprintln!("\nRun 'slack-post init' to generate a configuration template.");
        }
        _ => {}
    }
}

/// Maps a run failure to its exit code.
///
/// Problems the user can fix locally exit with [`exit_code::CONFIG_ERROR`];
/// failures talking to Slack exit with [`exit_code::runtime_error`].
pub fn exit_code_for(error: &RunError) -> std::process::ExitCode {
    match error {
        RunError::Config(_) | RunError::MissingToken { .. } | RunError::EmptyToken => {
            exit_code::CONFIG_ERROR
        }
        RunError::Slack(_) | RunError::Credential(_) | RunError::Http(_) => {
            exit_code::runtime_error()
        }
    }
}

/// Sets up the tracing subscriber for logging.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
