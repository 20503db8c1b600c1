//! slack-post: a small Slack Web API client
//!
//! Posts messages with `chat.postMessage`, retrying network failures with
//! exponential backoff, and keeps tokens in a per-user credentials file.

pub mod config;
pub mod credential;
pub mod retry;
pub mod slack;
pub mod time;
