//! Message and update types.

use serde::{Deserialize, Serialize};

use super::chat::Chat;
use super::user::User;
use crate::error::{ModelError, ModelResult};

/// A Telegram message.
///
/// Only the fields the filters look at are modelled; unknown fields in the
/// payload are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier inside the chat.
    pub message_id: i64,
    /// Unix time the message was sent.
    #[serde(default)]
    pub date: i64,
    /// The chat the message belongs to.
    pub chat: Chat,
    /// Sender, empty for messages sent to channels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,
    /// UTF-8 text of a text message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Message {
    /// Creates a message without text or sender in the given chat.
    pub fn new(message_id: i64, chat: Chat) -> Self {
        Self {
            message_id,
            chat,
            ..Default::default()
        }
    }

    /// Sets the text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the sender.
    pub fn with_from(mut self, from: User) -> Self {
        self.from = Some(from);
        self
    }

    /// Returns the text, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// An incoming update.
///
/// Updates that do not carry a message (callback queries, polls, ...) keep
/// `message` empty and are ignored by the router.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Update {
    /// Update identifier.
    pub update_id: i64,
    /// New incoming message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

impl Update {
    /// Decodes an update from a Bot API JSON payload.
    pub fn from_json(payload: &str) -> ModelResult<Self> {
        serde_json::from_str(payload).map_err(ModelError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChatType;

    #[test]
    fn test_decode_update() {
        let payload = r#"{
            "update_id": 10,
            "message": {
                "message_id": 5,
                "date": 1700000000,
                "chat": {"id": 42, "type": "private", "first_name": "Ada"},
                "from": {"id": 42, "is_bot": false, "first_name": "Ada", "username": "ada"},
                "text": "/start",
                "entities": [{"type": "bot_command", "offset": 0, "length": 6}]
            }
        }"#;

        let update = Update::from_json(payload).unwrap();
        let message = update.message.unwrap();
        assert_eq!(message.text(), Some("/start"));
        assert_eq!(message.chat.kind, ChatType::Private);
        assert_eq!(message.from.unwrap().username.as_deref(), Some("ada"));
    }

    #[test]
    fn test_decode_update_without_message() {
        let update = Update::from_json(r#"{"update_id": 11, "callback_query": {}}"#).unwrap();
        assert!(update.message.is_none());
    }

    #[test]
    fn test_decode_invalid_payload() {
        assert!(matches!(
            Update::from_json("{not json"),
            Err(ModelError::Decode(_))
        ));
    }
}
