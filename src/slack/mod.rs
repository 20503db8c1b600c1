//! Slack Web API layer.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - `chat.postMessage` arguments ([`ChatPostMessageArguments`], [`MessageOptions`])
//! - Calling Web API methods with retries ([`SlackApi`])
//! - The token-bound facade ([`WebClient`], [`post_chat_message`])

mod api;
mod client;
mod error;
mod http;
mod message;
mod payload;
mod response;
mod web_client;

#[cfg(test)]
mod http_tests;

pub use api::{CHAT_POST_MESSAGE, DEFAULT_BASE_URL, SlackApi, default_base_url};
pub use client::ReqwestClient;
pub use error::{HttpError, SlackError};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use message::{ChatPostMessageArguments, MessageOptions, ParseMode};
pub use payload::TOKEN_FIELD;
pub use response::SlackApiResponse;
pub use web_client::{Chat, WebClient, create_web_client, post_chat_message};
