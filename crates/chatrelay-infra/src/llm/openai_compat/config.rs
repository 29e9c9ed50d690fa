//! Configuration for the OpenAI-compatible provider.

use std::time::Duration;

use chatrelay_types::config::LlmSettings;
use secrecy::SecretString;

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "openai").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    pub api_key: SecretString,
    /// Model identifier sent with every request.
    pub model: String,
    /// Upper bound on a single completion call.
    pub request_timeout: Duration,
}

impl OpenAiCompatConfig {
    /// Build from the `[llm]` section of `config.toml` plus the API key.
    pub fn from_settings(settings: &LlmSettings, api_key: SecretString) -> Self {
        Self {
            provider_name: provider_name_for(&settings.base_url).to_string(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: settings.model.clone(),
            request_timeout: Duration::from_secs(settings.request_timeout_secs),
        }
    }
}

/// Infer a display name from well-known base URLs.
fn provider_name_for(base_url: &str) -> &'static str {
    if base_url.contains("api.openai.com") {
        "openai"
    } else if base_url.contains("api.mistral.ai") {
        "mistral"
    } else if base_url.contains("generativelanguage.googleapis.com") {
        "gemini"
    } else {
        "openai_compatible"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_from_default_settings() {
        let config = OpenAiCompatConfig::from_settings(
            &LlmSettings::default(),
            SecretString::from("sk-test".to_string()),
        );
        assert_eq!(config.provider_name, "openai");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.api_key.expose_secret(), "sk-test");
    }

    #[test]
    fn test_custom_base_url() {
        let settings = LlmSettings {
            model: "llama3".to_string(),
            base_url: "http://localhost:11434/v1/".to_string(),
            request_timeout_secs: 120,
        };
        let config = OpenAiCompatConfig::from_settings(&settings, SecretString::from("unused".to_string()));
        assert_eq!(config.provider_name, "openai_compatible");
        assert_eq!(config.base_url, "http://localhost:11434/v1");
        assert_eq!(config.request_timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_known_provider_names() {
        assert_eq!(provider_name_for("https://api.mistral.ai/v1"), "mistral");
        assert_eq!(
            provider_name_for("https://generativelanguage.googleapis.com/v1beta/openai"),
            "gemini"
        );
    }
}
