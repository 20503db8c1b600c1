//! slack-post: post messages to Slack from the command line
//!
//! Entry point for the slack-post application.

use std::future::Future;
use std::process::ExitCode;

use slack_post::config::{Cli, Command, ValidatedConfig, write_default_config};

mod app;
mod run;

use app::{exit_code, exit_code_for, print_config_hint, setup_tracing};
use run::RunError;

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match &cli.command {
        // Init must work even when the existing config is broken
        Command::Init { output } => handle_init(output),
        Command::Post(args) => run_with_config(&cli, |config| run::post_command(config, args)),
        Command::Token { action } => {
            run_with_config(&cli, |config| run::token_command(config, action))
        }
    }
}

/// Handles the `init` subcommand.
fn handle_init(output: &std::path::Path) -> ExitCode {
    match write_default_config(output) {
        Ok(()) => {
            println!("Configuration template written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Loads the configuration, sets up logging and runs `task` to completion.
///
/// Excluded from coverage - requires async runtime.
#[cfg(not(tarpaulin_include))]
fn run_with_config<F, Fut>(cli: &Cli, task: F) -> ExitCode
where
    F: FnOnce(ValidatedConfig) -> Fut,
    Fut: Future<Output = Result<(), RunError>>,
{
    let config = match ValidatedConfig::load(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    setup_tracing(config.verbose);
    tracing::debug!("{config}");

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to create Tokio runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    match runtime.block_on(task(config)) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            if let RunError::Config(ref config_error) = e {
                print_config_hint(config_error);
            }
            exit_code_for(&e)
        }
    }
}
