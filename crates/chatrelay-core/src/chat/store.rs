//! In-memory per-chat conversation store.
//!
//! Each chat owns a bounded history window, a system context and two optional
//! sampling settings. State is created lazily on first mutation and lives for
//! the process lifetime.
//!
//! Every mutation is a read-modify-write under the DashMap shard lock for that
//! key, so concurrent writers to one chat serialize while other chats proceed.
//! No guard ever escapes this module, and none is held across an `.await`.

use std::collections::VecDeque;

use chatrelay_types::chat::{
    ChatId, ChatSnapshot, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, HISTORY_LIMIT,
    MAX_TEMPERATURE, MIN_TEMPERATURE,
};
use chatrelay_types::error::SettingsError;
use dashmap::DashMap;
use tracing::debug;

/// Stored state of one chat.
///
/// `temperature` and `max_tokens` are `None` until explicitly configured, so
/// an explicit temperature of `0.0` stays distinguishable from "never set".
#[derive(Debug, Clone, Default)]
struct ChatState {
    history: VecDeque<String>,
    context: String,
    temperature: Option<f64>,
    max_tokens: Option<u32>,
}

impl ChatState {
    fn snapshot(&self) -> ChatSnapshot {
        ChatSnapshot {
            history: self.history.iter().cloned().collect(),
            context: self.context.clone(),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        }
    }
}

/// Concurrency-safe keyed store of [`ChatState`].
///
/// Shared between the command interpreter, the mention router and the
/// completion assembler via `Arc<ConversationStore>`.
#[derive(Debug, Default)]
pub struct ConversationStore {
    chats: DashMap<ChatId, ChatState>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the chat's history, evicting the oldest entries so
    /// that at most [`HISTORY_LIMIT`] remain.
    pub fn append_message(&self, chat_id: ChatId, entry: impl Into<String>) {
        let mut state = self.chats.entry(chat_id).or_default();
        state.history.push_back(entry.into());
        while state.history.len() > HISTORY_LIMIT {
            state.history.pop_front();
        }
    }

    /// Drop every history entry for the chat. Settings are kept.
    pub fn clear_history(&self, chat_id: ChatId) {
        let mut state = self.chats.entry(chat_id).or_default();
        state.history.clear();
        debug!(%chat_id, "history cleared");
    }

    /// Replace the system context. Any string, including empty, is accepted.
    pub fn set_context(&self, chat_id: ChatId, text: impl Into<String>) {
        self.chats.entry(chat_id).or_default().context = text.into();
    }

    /// Parse and store a sampling temperature.
    ///
    /// On error the chat's state is left untouched.
    pub fn set_temperature(&self, chat_id: ChatId, raw: &str) -> Result<f64, SettingsError> {
        let value = parse_temperature(raw)?;
        self.chats.entry(chat_id).or_default().temperature = Some(value);
        Ok(value)
    }

    /// Parse and store a response length cap.
    ///
    /// On error the chat's state is left untouched.
    pub fn set_max_tokens(&self, chat_id: ChatId, raw: &str) -> Result<u32, SettingsError> {
        let value = parse_max_tokens(raw)?;
        self.chats.entry(chat_id).or_default().max_tokens = Some(value);
        Ok(value)
    }

    /// Effective view of the chat. Unknown chats yield all defaults and are
    /// not created.
    pub fn snapshot(&self, chat_id: ChatId) -> ChatSnapshot {
        self.chats
            .get(&chat_id)
            .map(|state| state.snapshot())
            .unwrap_or_default()
    }

    /// Number of chats with stored state.
    pub fn len(&self) -> usize {
        self.chats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }
}

/// Parse a temperature in `[0, 2]`. Surrounding whitespace is ignored and
/// `-0` is stored as `0`.
pub fn parse_temperature(raw: &str) -> Result<f64, SettingsError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value == 0.0 => Ok(0.0),
        Ok(value) if (MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&value) => Ok(value),
        _ => Err(SettingsError::InvalidTemperature(trimmed.to_string())),
    }
}

/// Parse a strictly positive token cap that fits in a `u32`.
pub fn parse_max_tokens(raw: &str) -> Result<u32, SettingsError> {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(value) if value > 0 => {
            u32::try_from(value).map_err(|_| SettingsError::InvalidMaxTokens(trimmed.to_string()))
        }
        _ => Err(SettingsError::InvalidMaxTokens(trimmed.to_string())),
    }
}
