//! Bot API wire types.
//!
//! Only the fields the relay reads are modeled; everything else in the
//! payload is ignored by serde.

use serde::{Deserialize, Serialize};

use chatrelay_types::message::InboundMessage;

/// Envelope wrapping every Bot API response.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    #[serde(default)]
    pub username: Option<String>,
}

impl User {
    /// Username when set, otherwise the first name.
    pub fn display_name(&self) -> &str {
        match self.username.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.first_name,
        }
    }
}

impl Update {
    /// Convert into an [`InboundMessage`].
    ///
    /// Returns `None` for updates without a message or without a sender.
    /// A message without text (stickers, photos) becomes empty text.
    pub fn into_inbound(self) -> Option<InboundMessage> {
        let message = self.message?;
        let sender = message.from.as_ref()?.display_name().to_string();
        Some(InboundMessage::new(
            message.chat.id,
            sender,
            message.text.unwrap_or_default(),
        ))
    }
}

/// Body of a `getUpdates` call.
#[derive(Debug, Serialize)]
pub struct GetUpdatesParams<'a> {
    pub offset: i64,
    pub timeout: u64,
    pub allowed_updates: &'a [&'a str],
}

/// Body of a `sendMessage` call. Plain text, no parse mode.
#[derive(Debug, Serialize)]
pub struct SendMessageParams<'a> {
    pub chat_id: i64,
    pub text: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatrelay_types::chat::ChatId;

    const UPDATES: &str = r#"{
        "ok": true,
        "result": [
            {
                "update_id": 100,
                "message": {
                    "message_id": 1,
                    "date": 1700000000,
                    "chat": {"id": -1001, "type": "supergroup", "title": "devs"},
                    "from": {"id": 7, "is_bot": false, "first_name": "Alice", "username": "alice"},
                    "text": "@relay_bot hello"
                }
            },
            {
                "update_id": 101,
                "message": {
                    "message_id": 2,
                    "chat": {"id": -1001, "type": "supergroup"},
                    "from": {"id": 8, "is_bot": false, "first_name": "Bob"},
                    "sticker": {"file_id": "abc"}
                }
            },
            {
                "update_id": 102,
                "edited_message": {
                    "message_id": 1,
                    "chat": {"id": -1001, "type": "supergroup"},
                    "text": "edited"
                }
            },
            {
                "update_id": 103,
                "message": {
                    "message_id": 3,
                    "chat": {"id": -1001, "type": "channel"},
                    "text": "channel post without sender"
                }
            }
        ]
    }"#;

    fn parse() -> Vec<Update> {
        let response: ApiResponse<Vec<Update>> = serde_json::from_str(UPDATES).unwrap();
        assert!(response.ok);
        response.result.unwrap()
    }

    #[test]
    fn test_text_message_converts() {
        let update = parse().remove(0);
        assert_eq!(update.update_id, 100);
        let inbound = update.into_inbound().unwrap();
        assert_eq!(inbound.chat_id, ChatId(-1001));
        assert_eq!(inbound.sender, "alice");
        assert_eq!(inbound.text, "@relay_bot hello");
    }

    #[test]
    fn test_missing_text_becomes_empty_and_falls_back_to_first_name() {
        let update = parse().remove(1);
        let inbound = update.into_inbound().unwrap();
        assert_eq!(inbound.sender, "Bob");
        assert_eq!(inbound.text, "");
    }

    #[test]
    fn test_updates_without_message_or_sender_are_skipped() {
        let mut updates = parse();
        assert!(updates.remove(3).into_inbound().is_none());
        assert!(updates.remove(2).into_inbound().is_none());
    }

    #[test]
    fn test_error_response_parses() {
        let json = r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#;
        let response: ApiResponse<Vec<Update>> = serde_json::from_str(json).unwrap();
        assert!(!response.ok);
        assert!(response.result.is_none());
        assert_eq!(response.error_code, Some(401));
        assert_eq!(response.description.as_deref(), Some("Unauthorized"));
    }

    #[test]
    fn test_get_updates_params_serialize() {
        let params = GetUpdatesParams {
            offset: 101,
            timeout: 60,
            allowed_updates: &["message"],
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"offset": 101, "timeout": 60, "allowed_updates": ["message"]})
        );
    }
}
