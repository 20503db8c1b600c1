//! Command execution.
//!
//! `post` and `token` need a validated config; `init` does not and is
//! handled in `main`. The work itself lives in small async functions generic
//! over the HTTP client and credential store, so the same code paths run
//! under test with mocks.

use thiserror::Error;

use slack_post::config::{ConfigError, PostArgs, TokenAction, ValidatedConfig};
use slack_post::credential::{CredentialError, CredentialStore, credential_key};
use slack_post::slack::{
    HttpClient, HttpError, ReqwestClient, SlackApiResponse, SlackError, WebClient,
};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Configuration was valid but incomplete for this command.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No token was given and none is stored under the requested name.
    #[error(
        "No Slack token for '{}'. Use --token or run 'slack-post token save <TOKEN>'",
        credential_key(name)
    )]
    MissingToken {
        /// Credential name that was looked up
        name: String,
    },

    /// `token save` was given an empty token.
    #[error("Refusing to store an empty token")]
    EmptyToken,

    /// The Slack call failed.
    #[error(transparent)]
    Slack(#[from] SlackError),

    /// Saving the credential failed.
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// The HTTP client could not be created.
    #[error(transparent)]
    Http(#[from] HttpError),
}

/// Runs `post` against the production HTTP client and the configured
/// credential file, printing Slack's response.
///
/// # Errors
///
/// Returns an error if the command fails; see [`RunError`].
#[cfg(not(tarpaulin_include))]
pub async fn post_command(config: ValidatedConfig, args: &PostArgs) -> Result<(), RunError> {
    let store = config.credential_store()?;
    let client = ReqwestClient::with_timeout(config.timeout)?;
    let response = post(&config, client, &store, args).await?;
    println!("{response}");
    Ok(())
}

/// Runs `token save` / `token show` against the configured credential file.
///
/// # Errors
///
/// Returns an error if the credential file is unavailable or cannot be
/// written.
#[cfg(not(tarpaulin_include))]
pub async fn token_command(config: ValidatedConfig, action: &TokenAction) -> Result<(), RunError> {
    let store = config.credential_store()?;
    let key = credential_key(&config.token_name);

    match action {
        TokenAction::Save { token } => {
            save_token(&store, token, &config.token_name).await?;
            println!("Token saved as '{key}' in {}", store.path().display());
        }
        TokenAction::Show => match show_token(&store, &config.token_name) {
            Some(masked) => println!("{key}: {masked}"),
            None => println!("No token stored under '{key}'"),
        },
    }

    Ok(())
}

/// Resolves the message and token, then posts with `chat.postMessage`.
///
/// # Errors
///
/// Returns an error if the message is incomplete, no token can be found, or
/// the Slack call fails.
pub async fn post<H, C>(
    config: &ValidatedConfig,
    client: H,
    store: &C,
    args: &PostArgs,
) -> Result<SlackApiResponse, RunError>
where
    H: HttpClient,
    C: CredentialStore,
{
    let message = config.resolve_message(args)?;
    let token = config
        .resolve_token(store)
        .ok_or_else(|| RunError::MissingToken {
            name: config.token_name.clone(),
        })?;

    let web = WebClient::with_api(config.api(client), token);
    let response = web.chat().post_message(&message).await?;

    tracing::info!(
        channel = %message.channel,
        ts = response.get_str("ts").unwrap_or("-"),
        "Message posted"
    );

    Ok(response)
}

/// Stores `token` under `name`.
///
/// # Errors
///
/// Returns [`RunError::EmptyToken`] for a blank token, or the store's error.
pub async fn save_token<C: CredentialStore>(
    store: &C,
    token: &str,
    name: &str,
) -> Result<(), RunError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(RunError::EmptyToken);
    }

    store.save_token(token, name).await?;
    tracing::debug!("Saved credential '{}'", credential_key(name));
    Ok(())
}

/// Returns the token stored under `name`, masked for display.
pub fn show_token<C: CredentialStore>(store: &C, name: &str) -> Option<String> {
    store.get_token(name).map(|token| mask_token(&token))
}

/// Keeps the first and last four characters of long tokens.
fn mask_token(token: &str) -> String {
    const VISIBLE: usize = 4;

    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= VISIBLE * 3 {
        return "*".repeat(chars.len().max(VISIBLE));
    }

    let head: String = chars[..VISIBLE].iter().collect();
    let tail: String = chars[chars.len() - VISIBLE..].iter().collect();
    format!("{head}...{tail}")
}
