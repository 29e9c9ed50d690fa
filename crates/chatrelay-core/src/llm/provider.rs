//! LlmProvider trait definition.
//!
//! This is the core abstraction that completion backends implement.
//! Uses RPITIT for `complete`, wrapped by [`super::box_provider::BoxLlmProvider`]
//! when dynamic dispatch is needed.

use chatrelay_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for chat-completion backends.
///
/// Implementations live in chatrelay-infra (e.g., `OpenAiCompatibleProvider`).
/// Any transport, status or decoding failure must surface as an [`LlmError`];
/// callers treat every error uniformly as a failed completion.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Model used when a request leaves `model` empty.
    fn default_model(&self) -> &str;

    /// Send a completion request and receive the first choice.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
