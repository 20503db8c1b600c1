//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::slack::ParseMode;

use super::defaults;

/// slack-post: post messages to Slack from the command line
///
/// Calls `chat.postMessage` with retries on network failures and keeps
/// tokens in a per-user credentials file.
#[derive(Debug, Parser)]
#[command(name = "slack-post")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Slack token (overrides the config file and stored credentials)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Name of the stored credential to use
    #[arg(long = "token-name", global = true, value_name = "NAME")]
    pub token_name: Option<String>,

    /// Slack host that /api/{method} is appended to
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Maximum number of attempts per API call
    #[arg(long = "retry-max", global = true)]
    pub retry_max: Option<u32>,

    /// Delay before the first retry in milliseconds (doubles each retry)
    #[arg(long = "retry-delay-ms", global = true)]
    pub retry_delay_ms: Option<u64>,

    /// HTTP request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the credentials file
    #[arg(long = "credentials-file", global = true)]
    pub credentials_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for slack-post
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Post a message to a channel
    Post(PostArgs),

    /// Manage stored tokens
    Token {
        /// Token action
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },
}

/// Actions of the `token` subcommand.
#[derive(Debug, Subcommand)]
pub enum TokenAction {
    /// Store a token under --token-name
    Save {
        /// The token to store
        token: String,
    },

    /// Print the stored token (masked)
    Show,
}

/// Arguments of the `post` subcommand.
#[derive(Debug, Default, Args)]
pub struct PostArgs {
    /// Channel to post to (falls back to slack.default_channel)
    #[arg(long)]
    pub channel: Option<String>,

    /// Message text
    #[arg(long)]
    pub text: Option<String>,

    /// Timestamp of the parent message to reply to
    #[arg(long = "thread-ts", value_name = "TS")]
    pub thread_ts: Option<String>,

    /// Bot username override
    #[arg(long)]
    pub username: Option<String>,

    /// Emoji used as the message icon
    #[arg(long = "icon-emoji", value_name = "EMOJI")]
    pub icon_emoji: Option<String>,

    /// Image URL used as the message icon
    #[arg(long = "icon-url", value_name = "URL")]
    pub icon_url: Option<String>,

    /// JSON array of legacy attachments
    #[arg(long, value_name = "JSON")]
    pub attachments: Option<String>,

    /// JSON array of Block Kit blocks
    #[arg(long, value_name = "JSON")]
    pub blocks: Option<String>,

    /// JSON object with event_type and event_payload
    #[arg(long, value_name = "JSON")]
    pub metadata: Option<String>,

    /// Text parsing mode
    #[arg(long, value_enum)]
    pub parse: Option<ParseArg>,

    /// Find and link user groups
    #[arg(long = "link-names")]
    pub link_names: bool,

    /// With --thread-ts, also show the reply in the channel
    #[arg(long = "reply-broadcast")]
    pub reply_broadcast: bool,

    /// Enable or disable Slack markup parsing
    #[arg(long, value_name = "BOOL")]
    pub mrkdwn: Option<bool>,

    /// Enable or disable unfurling of text links
    #[arg(long = "unfurl-links", value_name = "BOOL")]
    pub unfurl_links: Option<bool>,

    /// Enable or disable unfurling of media links
    #[arg(long = "unfurl-media", value_name = "BOOL")]
    pub unfurl_media: Option<bool>,
}

/// Parse mode argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ParseArg {
    /// Resolve links, channels and users
    Full,
    /// Post text as-is
    None,
}

impl From<ParseArg> for ParseMode {
    fn from(arg: ParseArg) -> Self {
        match arg {
            ParseArg::Full => Self::Full,
            ParseArg::None => Self::None,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}
