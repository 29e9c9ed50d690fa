//! Completion request assembly for addressed messages.
//!
//! The prompt is always laid out as:
//!
//! ```text
//! system: <context, possibly empty>
//! user:   <history[0]>        e.g. "alice: hi"
//! ...
//! user:   <history[n-1]>      e.g. "Bot: Not much!"
//! user:   <raw addressed text, no sender prefix>
//! ```
//!
//! History entries already carry their `"<sender>: "` prefix, so every one
//! of them, including the bot's own previous replies, goes out as a user
//! message.

use std::sync::Arc;

use chatrelay_types::chat::{BOT_SENDER, ChatId, history_entry};
use chatrelay_types::llm::{CompletionRequest, LlmError, Message};
use tracing::{Instrument, debug, info_span, warn};

use super::store::ConversationStore;
use crate::llm::box_provider::BoxLlmProvider;

/// Builds prompts from chat state, calls the provider once, and folds a
/// successful reply back into history.
#[derive(Debug, Clone)]
pub struct CompletionAssembler {
    store: Arc<ConversationStore>,
    provider: Arc<BoxLlmProvider>,
}

impl CompletionAssembler {
    pub fn new(store: Arc<ConversationStore>, provider: Arc<BoxLlmProvider>) -> Self {
        Self { store, provider }
    }

    /// Build the request for `text` from the chat's current effective state.
    pub fn build_request(&self, chat_id: ChatId, text: &str) -> CompletionRequest {
        let snapshot = self.store.snapshot(chat_id);

        let mut messages = Vec::with_capacity(snapshot.history.len() + 2);
        messages.push(Message::system(snapshot.context));
        messages.extend(snapshot.history.into_iter().map(Message::user));
        messages.push(Message::user(text));

        CompletionRequest {
            model: self.provider.default_model().to_string(),
            messages,
            max_tokens: snapshot.max_tokens,
            temperature: Some(snapshot.temperature),
        }
    }

    /// Request a completion for an addressed message.
    ///
    /// On success the reply is appended to history as `"Bot: <reply>"` and
    /// returned. On failure history is left untouched and the error is
    /// returned for the caller to turn into a generic reply. No retry.
    pub async fn complete(&self, chat_id: ChatId, text: &str) -> Result<String, LlmError> {
        let request = self.build_request(chat_id, text);

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
            chat_id = %chat_id,
        );

        let response = match self.provider.complete(&request).instrument(span).await {
            Ok(response) => response,
            Err(e) => {
                warn!(%chat_id, error = %e, "completion failed");
                return Err(e);
            }
        };

        debug!(
            %chat_id,
            response_id = %response.id,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "completion received"
        );

        self.store
            .append_message(chat_id, history_entry(BOT_SENDER, &response.content));
        Ok(response.content)
    }
}
