//! Message handler trait for the per-chat dispatcher.
//!
//! Defines the `MessageHandler` trait the dispatcher drives from each chat's
//! worker task. The production implementation is [`crate::relay::Relay`].

use chatrelay_types::message::InboundMessage;

/// Trait for consuming inbound messages one at a time.
///
/// The dispatcher guarantees that calls for the same chat never overlap and
/// arrive in platform order; calls for different chats may run concurrently.
pub trait MessageHandler: Send + Sync {
    /// Process one inbound message to completion, including any reply.
    fn handle_message(
        &self,
        message: InboundMessage,
    ) -> impl std::future::Future<Output = ()> + Send;
}
