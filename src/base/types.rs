//! Common types and result handling shared across the bot.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Application-wide error type.
pub type Err = anyhow::Error;
/// Application-wide result type.
pub type Res<T> = Result<T, Err>;
/// Result with no value.
pub type Void = Res<()>;

/// A user in the chat platform: the opaque platform ID plus the
/// human-readable display name. Reconstructed from each inbound event;
/// there is no persisted identity graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Speaker {
    /// Platform identifier, usable to `<@id>` mention the user.
    pub id: String,
    /// Human-readable name, used for stable ordering in history output.
    pub display_name: String,
}

impl Speaker {
    /// Returns the string that triggers a mention of this speaker, e.g.
    /// `<@U12345>`.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

/// A single normalized "user said X" event delivered by the transport.
/// Ephemeral; never stored.
#[derive(Debug, Clone)]
pub struct InboundEvent {
    /// Who said it.
    pub speaker: Speaker,
    /// What they said.
    pub text: String,
}

/// What a responder wants the bot to say.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// The message to send to the channel.
    pub text: String,
    /// Whether to prefix the message with a mention of the triggering
    /// speaker.
    pub mention_speaker: bool,
    /// Opaque to the dispatcher; stored with the response in history so
    /// responders can pass structured data to later history lookups.
    #[serde(default)]
    pub metadata: Value,
}

impl Response {
    /// A plain text response with no mention and no metadata.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mention_speaker: false,
            metadata: Value::Null,
        }
    }
}
