//! Application state wiring all components together.
//!
//! The relay is generic over its transport; AppState pins it to the
//! Telegram client.

use std::path::Path;
use std::sync::Arc;

use chatrelay_core::chat::ConversationStore;
use chatrelay_core::llm::box_provider::BoxLlmProvider;
use chatrelay_core::relay::Relay;
use chatrelay_infra::config::RelayConfig;
use chatrelay_infra::llm::create_provider;
use chatrelay_infra::telegram::TelegramClient;

/// Relay pinned to the Telegram transport.
pub type TelegramRelay = Relay<Arc<TelegramClient>>;

/// Shared application state.
pub struct AppState {
    pub config: RelayConfig,
    pub store: Arc<ConversationStore>,
    pub provider: Arc<BoxLlmProvider>,
    pub telegram: Arc<TelegramClient>,
    pub relay: Arc<TelegramRelay>,
}

impl AppState {
    /// Load configuration and wire the store, provider, client and relay.
    pub async fn init(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let config = RelayConfig::load(config_path).await?;

        let provider = Arc::new(create_provider(
            &config.file.llm,
            config.openai_api_key.clone(),
        ));
        let telegram = Arc::new(TelegramClient::new(
            &config.file.telegram,
            config.telegram_token.clone(),
        ));
        let store = Arc::new(ConversationStore::new());
        let relay = Arc::new(Relay::new(
            Arc::clone(&store),
            Arc::clone(&provider),
            Arc::clone(&telegram),
            &config.bot_username,
        ));

        tracing::debug!(
            config_path = %config.config_path.display(),
            provider = provider.name(),
            model = provider.default_model(),
            "application state initialized"
        );

        Ok(Self {
            config,
            store,
            provider,
            telegram,
            relay,
        })
    }
}
