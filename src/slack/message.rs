//! Arguments for the `chat.postMessage` method.

use serde::{Deserialize, Serialize};

/// How Slack should treat the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Links, channels and users are resolved automatically.
    Full,
    /// Text is posted as-is.
    None,
}

/// Optional `chat.postMessage` fields.
///
/// Everything except `channel` and `text`. Unset fields are left out of the
/// request so Slack applies its own defaults.
///
/// `attachments`, `blocks` and `metadata` are JSON documents passed through
/// as strings, exactly as the Web API expects them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageOptions {
    /// JSON array of legacy attachments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<String>,

    /// JSON array of Block Kit blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<String>,

    /// Emoji used as the message icon. Overrides `icon_url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_emoji: Option<String>,

    /// Image URL used as the message icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,

    /// Find and link user groups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_names: Option<bool>,

    /// JSON object with `event_type` and `event_payload`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,

    /// Set to `false` to disable Slack markup parsing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mrkdwn: Option<bool>,

    /// Text parsing mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse: Option<ParseMode>,

    /// With `thread_ts`, also show the reply in the channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_broadcast: Option<bool>,

    /// Timestamp of the parent message to reply to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,

    /// Unfurl links to text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unfurl_links: Option<bool>,

    /// Unfurl links to media content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unfurl_media: Option<bool>,

    /// Bot username override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl MessageOptions {
    /// Creates options with every field unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the attachments JSON.
    #[must_use]
    pub fn with_attachments(mut self, json: impl Into<String>) -> Self {
        self.attachments = Some(json.into());
        self
    }

    /// Sets the Block Kit blocks JSON.
    #[must_use]
    pub fn with_blocks(mut self, json: impl Into<String>) -> Self {
        self.blocks = Some(json.into());
        self
    }

    /// Sets the icon emoji (e.g. `:robot_face:`).
    #[must_use]
    pub fn with_icon_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.icon_emoji = Some(emoji.into());
        self
    }

    /// Sets the icon image URL.
    #[must_use]
    pub fn with_icon_url(mut self, url: impl Into<String>) -> Self {
        self.icon_url = Some(url.into());
        self
    }

    /// Sets `link_names`.
    #[must_use]
    pub const fn with_link_names(mut self, enabled: bool) -> Self {
        self.link_names = Some(enabled);
        self
    }

    /// Sets the message metadata JSON.
    #[must_use]
    pub fn with_metadata(mut self, json: impl Into<String>) -> Self {
        self.metadata = Some(json.into());
        self
    }

    /// Sets `mrkdwn`.
    #[must_use]
    pub const fn with_mrkdwn(mut self, enabled: bool) -> Self {
        self.mrkdwn = Some(enabled);
        self
    }

    /// Sets the parse mode.
    #[must_use]
    pub const fn with_parse(mut self, mode: ParseMode) -> Self {
        self.parse = Some(mode);
        self
    }

    /// Sets `reply_broadcast`.
    #[must_use]
    pub const fn with_reply_broadcast(mut self, enabled: bool) -> Self {
        self.reply_broadcast = Some(enabled);
        self
    }

    /// Makes the message a reply in the thread started by `ts`.
    #[must_use]
    pub fn with_thread_ts(mut self, ts: impl Into<String>) -> Self {
        self.thread_ts = Some(ts.into());
        self
    }

    /// Sets `unfurl_links`.
    #[must_use]
    pub const fn with_unfurl_links(mut self, enabled: bool) -> Self {
        self.unfurl_links = Some(enabled);
        self
    }

    /// Sets `unfurl_media`.
    #[must_use]
    pub const fn with_unfurl_media(mut self, enabled: bool) -> Self {
        self.unfurl_media = Some(enabled);
        self
    }

    /// Sets the bot username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

/// Full argument set for `chat.postMessage`.
///
/// `text` is required by Slack unless `attachments` or `blocks` are given, in
/// which case it becomes the notification fallback.
///
/// # Example
///
/// ```
/// use slack_post::slack::{ChatPostMessageArguments, MessageOptions};
///
/// let args = ChatPostMessageArguments::new("#general")
///     .with_text("Deploy finished")
///     .with_options(MessageOptions::new().with_username("deploy-bot"));
///
/// assert_eq!(args.channel, "#general");
/// assert_eq!(args.options.username.as_deref(), Some("deploy-bot"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPostMessageArguments {
    /// Channel, private group, or IM channel to post to.
    pub channel: String,

    /// Message text, or notification fallback when blocks/attachments are set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// All remaining fields.
    #[serde(flatten)]
    pub options: MessageOptions,
}

impl ChatPostMessageArguments {
    /// Creates arguments targeting `channel` with nothing else set.
    #[must_use]
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            text: None,
            options: MessageOptions::default(),
        }
    }

    /// Builds arguments from a channel, text and extra options.
    #[must_use]
    pub fn compose(
        channel: impl Into<String>,
        text: impl Into<String>,
        options: MessageOptions,
    ) -> Self {
        Self {
            channel: channel.into(),
            text: Some(text.into()),
            options,
        }
    }

    /// Sets the message text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Replaces the optional fields.
    #[must_use]
    pub fn with_options(mut self, options: MessageOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns true if the message has something to display.
    #[must_use]
    pub const fn has_content(&self) -> bool {
        self.text.is_some() || self.options.attachments.is_some() || self.options.blocks.is_some()
    }
}
