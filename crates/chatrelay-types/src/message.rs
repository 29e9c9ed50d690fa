//! Inbound chat message envelope.
//!
//! The transport converts platform updates into `InboundMessage` values;
//! everything downstream of the poller works only with this shape.

use serde::{Deserialize, Serialize};

use crate::chat::ChatId;

/// A single text message received from the chat platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub chat_id: ChatId,
    /// Display handle of the author (platform username, or first name when
    /// the user has none).
    pub sender: String,
    /// Message text, possibly empty.
    pub text: String,
}

impl InboundMessage {
    pub fn new(chat_id: impl Into<ChatId>, sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            sender: sender.into(),
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_message_new() {
        let msg = InboundMessage::new(42_i64, "alice", "hi");
        assert_eq!(msg.chat_id, ChatId(42));
        assert_eq!(msg.sender, "alice");
        assert_eq!(msg.text, "hi");
    }
}
