//! Per-chat conversation state and the policies that act on it.
//!
//! - `store` -- `ConversationStore`, bounded history plus per-chat settings
//! - `command` -- `/clear`, `/setcontext`, `/settemp`, `/setmaxtokens`
//! - `mention` -- `@handle` detection for non-command messages
//! - `assembler` -- prompt assembly and reply reconciliation

pub mod assembler;
pub mod command;
pub mod mention;
pub mod store;

pub use assembler::CompletionAssembler;
pub use command::{Command, CommandInterpreter};
pub use mention::{MentionMatcher, Route};
pub use store::ConversationStore;
