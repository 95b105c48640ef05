use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message origin.
///
/// Closed set at the data-model boundary; the original's loose `ai`/`bot`/
/// `echo` labels all map onto `Assistant` when deserialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    #[default]
    #[serde(alias = "human")]
    User,
    #[serde(alias = "ai", alias = "bot", alias = "echo")]
    Assistant,
}

/// One line of conversation or live-call transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,

    /// Owning track; absent for global/legacy messages. Never mutated once set.
    #[serde(default)]
    pub track_id: Option<String>,
}

/// Append input. Missing `id`/`timestamp` get defaults when appended.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    #[serde(default)]
    pub id: Option<String>,
    /// Defaults to `user`: the local-echo path usually omits it
    #[serde(default)]
    pub sender: Sender,
    pub text: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub track_id: Option<String>,
}

impl NewMessage {
    pub fn user(text: impl Into<String>, track_id: Option<String>) -> Self {
        Self::tagged(Sender::User, text, track_id)
    }

    pub fn assistant(text: impl Into<String>, track_id: Option<String>) -> Self {
        Self::tagged(Sender::Assistant, text, track_id)
    }

    fn tagged(sender: Sender, text: impl Into<String>, track_id: Option<String>) -> Self {
        Self {
            id: None,
            sender,
            text: text.into(),
            timestamp: None,
            track_id,
        }
    }

    pub(crate) fn into_message(self) -> Message {
        Message {
            // UUIDs instead of time-based ids: rapid appends must not collide
            id: self.id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            sender: self.sender,
            text: self.text,
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
            track_id: self.track_id,
        }
    }
}
