//! Per-chat conversation types.
//!
//! A chat is identified by a signed 64-bit integer (Telegram group ids are
//! negative). Each chat carries a bounded history window plus three
//! independently configurable settings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of history entries retained per chat.
pub const HISTORY_LIMIT: usize = 10;

/// Sampling temperature used when a chat never configured one.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Response length cap used when a chat never configured one.
pub const DEFAULT_MAX_TOKENS: u32 = 150;

/// Lowest accepted sampling temperature (inclusive).
pub const MIN_TEMPERATURE: f64 = 0.0;

/// Highest accepted sampling temperature (inclusive).
pub const MAX_TEMPERATURE: f64 = 2.0;

/// Sender label used for the bot's own replies in history.
pub const BOT_SENDER: &str = "Bot";

/// Identifier of a single conversation thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        ChatId(id)
    }
}

/// Format a history entry as `"<sender>: <text>"`.
pub fn history_entry(sender: &str, text: &str) -> String {
    format!("{sender}: {text}")
}

/// Effective view of a chat's state, with defaults substituted for unset
/// settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSnapshot {
    /// Most recent entries, oldest first.
    pub history: Vec<String>,
    /// System-role prompt segment (empty when never set).
    pub context: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for ChatSnapshot {
    fn default() -> Self {
        Self {
            history: Vec::new(),
            context: String::new(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}
