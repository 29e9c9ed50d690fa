//! LLM provider implementations.
//!
//! Contains the concrete [`LlmProvider`](chatrelay_core::llm::provider::LlmProvider)
//! implementation for OpenAI-compatible endpoints, a factory
//! ([`create_provider`]) building it from the `[llm]` settings, and a
//! connection test ([`test_provider_connection`]) used by `chatrelay check`.

pub mod openai_compat;

use secrecy::SecretString;

use chatrelay_core::llm::box_provider::BoxLlmProvider;
use chatrelay_types::config::LlmSettings;
use chatrelay_types::llm::{CompletionRequest, LlmError, Message};

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::OpenAiCompatConfig;

/// Create a [`BoxLlmProvider`] from the `[llm]` settings and the API key.
pub fn create_provider(settings: &LlmSettings, api_key: SecretString) -> BoxLlmProvider {
    let config = OpenAiCompatConfig::from_settings(settings, api_key);
    BoxLlmProvider::new(OpenAiCompatibleProvider::new(config))
}

/// Test provider connectivity by sending a minimal completion request.
///
/// Sends a tiny "Hello" message with a small token budget to verify the API
/// key and endpoint.
pub async fn test_provider_connection(provider: &BoxLlmProvider) -> Result<(), LlmError> {
    let request = CompletionRequest {
        model: String::new(), // Provider uses its configured default
        messages: vec![Message::user("Hello")],
        max_tokens: 10,
        temperature: Some(0.0),
    };
    provider.complete(&request).await?;
    Ok(())
}
