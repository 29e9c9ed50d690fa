//! ChatTransport trait definition.
//!
//! Outbound half of the chat-platform boundary. The inbound half is a plain
//! `mpsc` stream of [`InboundMessage`](chatrelay_types::message::InboundMessage)
//! fed by the platform poller.

use chatrelay_types::chat::ChatId;
use chatrelay_types::error::TransportError;

/// Delivery of plain-text messages to a chat.
///
/// Implementations live in chatrelay-infra (e.g., `TelegramClient`).
/// Callers treat sends as fire-and-forget: errors are logged, never retried.
pub trait ChatTransport: Send + Sync {
    /// Human-readable transport name (e.g., "telegram").
    fn name(&self) -> &str;

    /// Send `text` to `chat_id`.
    fn send(
        &self,
        chat_id: ChatId,
        text: &str,
    ) -> impl std::future::Future<Output = Result<(), TransportError>> + Send;
}

impl<T: ChatTransport> ChatTransport for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn send(
        &self,
        chat_id: ChatId,
        text: &str,
    ) -> impl std::future::Future<Output = Result<(), TransportError>> + Send {
        (**self).send(chat_id, text)
    }
}
