//! Slash directive parsing and execution.
//!
//! Exactly four directives are recognized, case-sensitively, as the first
//! whitespace-delimited word of a message: `/clear`, `/setcontext`,
//! `/settemp` and `/setmaxtokens`. Everything after that word, trimmed, is
//! the argument. Telegram appends `@<bot>` to commands picked from the menu
//! in groups (`/clear@relay_bot`); that suffix is accepted only when it
//! names this bot.
//!
//! Anything else, including unknown `/words`, is not a command and falls
//! through to the mention router.

use std::sync::Arc;

use chatrelay_types::chat::ChatId;
use tracing::{debug, info};

use super::store::ConversationStore;

pub const CLEARED_REPLY: &str = "Chat history cleared.";
pub const CONTEXT_UPDATED_REPLY: &str = "Context updated.";
pub const INVALID_TEMPERATURE_REPLY: &str = "Error: temperature must be a number between 0 and 2.";
pub const INVALID_MAX_TOKENS_REPLY: &str = "Error: max tokens must be a positive integer.";

/// A recognized control directive with its raw argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Drop the chat's history. Arguments are ignored.
    Clear,
    /// Replace the system context (may be empty).
    SetContext(String),
    /// Set the sampling temperature; the argument is validated on apply.
    SetTemperature(String),
    /// Set the response length cap; the argument is validated on apply.
    SetMaxTokens(String),
}

impl Command {
    /// Parse inbound text as a directive addressed to the bot `handle`.
    ///
    /// Returns `None` when the text is not one of the four directives.
    pub fn parse(text: &str, handle: &str) -> Option<Command> {
        if !text.starts_with('/') {
            return None;
        }

        let (word, rest) = match text.find(char::is_whitespace) {
            Some(idx) => text.split_at(idx),
            None => (text, ""),
        };
        let argument = rest.trim().to_string();

        let name = match word.split_once('@') {
            Some((name, target)) if !target.is_empty() && target.eq_ignore_ascii_case(handle) => {
                name
            }
            Some(_) => return None,
            None => word,
        };

        match name {
            "/clear" => Some(Command::Clear),
            "/setcontext" => Some(Command::SetContext(argument)),
            "/settemp" => Some(Command::SetTemperature(argument)),
            "/setmaxtokens" => Some(Command::SetMaxTokens(argument)),
            _ => None,
        }
    }
}

/// Applies parsed directives to the conversation store.
///
/// Every directive produces exactly one reply. Validation failures are
/// converted to a corrective reply here and never propagate further.
#[derive(Debug, Clone)]
pub struct CommandInterpreter {
    store: Arc<ConversationStore>,
}

impl CommandInterpreter {
    pub fn new(store: Arc<ConversationStore>) -> Self {
        Self { store }
    }

    /// Execute `command` against `chat_id` and return the reply text.
    pub fn apply(&self, chat_id: ChatId, command: &Command) -> String {
        match command {
            Command::Clear => {
                self.store.clear_history(chat_id);
                info!(%chat_id, "history cleared by command");
                CLEARED_REPLY.to_string()
            }
            Command::SetContext(text) => {
                self.store.set_context(chat_id, text.as_str());
                info!(%chat_id, len = text.len(), "context updated");
                CONTEXT_UPDATED_REPLY.to_string()
            }
            Command::SetTemperature(raw) => match self.store.set_temperature(chat_id, raw) {
                Ok(value) => {
                    info!(%chat_id, temperature = value, "temperature updated");
                    format!("Temperature updated: {value:.2}")
                }
                Err(e) => {
                    debug!(%chat_id, error = %e, "rejected temperature");
                    INVALID_TEMPERATURE_REPLY.to_string()
                }
            },
            Command::SetMaxTokens(raw) => match self.store.set_max_tokens(chat_id, raw) {
                Ok(value) => {
                    info!(%chat_id, max_tokens = value, "max tokens updated");
                    format!("Max tokens updated: {value}")
                }
                Err(e) => {
                    debug!(%chat_id, error = %e, "rejected max tokens");
                    INVALID_MAX_TOKENS_REPLY.to_string()
                }
            },
        }
    }

    /// Parse and apply in one step. `None` means "not a command".
    pub fn interpret(&self, chat_id: ChatId, text: &str, handle: &str) -> Option<String> {
        Command::parse(text, handle).map(|command| self.apply(chat_id, &command))
    }
}
