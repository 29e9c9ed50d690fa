//! The relay: one inbound message in, at most one reply out.
//!
//! Control flow per message:
//!
//! 1. A recognized directive is applied and acknowledged; nothing else runs.
//! 2. Otherwise an ambient message is appended to history as
//!    `"<sender>: <text>"` with no reply.
//! 3. An addressed message goes through the completion assembler and the
//!    reply is sent back as `"@<sender>, <reply>"`. A failed completion is
//!    answered with a generic sentence and leaves history untouched.

use std::sync::Arc;

use chatrelay_types::chat::history_entry;
use chatrelay_types::message::InboundMessage;
use tracing::{debug, warn};

use crate::chat::assembler::CompletionAssembler;
use crate::chat::command::CommandInterpreter;
use crate::chat::mention::{MentionMatcher, Route};
use crate::chat::store::ConversationStore;
use crate::llm::box_provider::BoxLlmProvider;
use crate::message::handler::MessageHandler;
use crate::message::transport::ChatTransport;

/// Reply used when the completion provider fails for any reason.
pub const COMPLETION_FAILURE_REPLY: &str =
    "Sorry, something went wrong while processing your request.";

/// Routes inbound messages through commands, mentions and completions.
///
/// Generic over `ChatTransport` so tests can swap in a recording transport
/// while production pins it to the Telegram client.
pub struct Relay<T: ChatTransport> {
    store: Arc<ConversationStore>,
    commands: CommandInterpreter,
    matcher: MentionMatcher,
    assembler: CompletionAssembler,
    transport: T,
}

impl<T: ChatTransport> Relay<T> {
    pub fn new(
        store: Arc<ConversationStore>,
        provider: Arc<BoxLlmProvider>,
        transport: T,
        handle: &str,
    ) -> Self {
        Self {
            commands: CommandInterpreter::new(Arc::clone(&store)),
            matcher: MentionMatcher::new(handle),
            assembler: CompletionAssembler::new(Arc::clone(&store), provider),
            store,
            transport,
        }
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// Decide what to do with `message` and return the reply text, if any.
    ///
    /// Never fails: validation and completion errors become reply text.
    pub async fn handle(&self, message: &InboundMessage) -> Option<String> {
        let chat_id = message.chat_id;

        if let Some(reply) = self
            .commands
            .interpret(chat_id, &message.text, self.matcher.handle())
        {
            return Some(reply);
        }

        match self.matcher.classify(&message.text) {
            Route::Ambient => {
                debug!(%chat_id, sender = %message.sender, text = %message.text, "ambient message stored");
                self.store
                    .append_message(chat_id, history_entry(&message.sender, &message.text));
                None
            }
            Route::Addressed => {
                debug!(%chat_id, sender = %message.sender, "addressed message");
                let reply = self
                    .assembler
                    .complete(chat_id, &message.text)
                    .await
                    .unwrap_or_else(|_| COMPLETION_FAILURE_REPLY.to_string());
                Some(format!("@{}, {}", message.sender, reply))
            }
        }
    }

    /// Handle `message` and deliver the reply through the transport.
    ///
    /// Delivery is fire-and-forget: failures are logged and dropped.
    pub async fn process(&self, message: &InboundMessage) {
        let Some(reply) = self.handle(message).await else {
            return;
        };

        if let Err(e) = self.transport.send(message.chat_id, &reply).await {
            warn!(
                chat_id = %message.chat_id,
                transport = self.transport.name(),
                error = %e,
                "failed to deliver reply"
            );
        }
    }
}

impl<T: ChatTransport> MessageHandler for Relay<T> {
    async fn handle_message(&self, message: InboundMessage) {
        self.process(&message).await;
    }
}
