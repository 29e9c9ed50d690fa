//! Conversation state, command handling and message routing for chatrelay.
//!
//! This crate defines the "ports" (`LlmProvider`, `ChatTransport`,
//! `MessageHandler`) that the infrastructure layer implements, plus the
//! per-chat state and routing policy built on top of them. It depends only on
//! `chatrelay-types` -- never on `chatrelay-infra` or any HTTP crate.

pub mod chat;
pub mod llm;
pub mod message;
pub mod relay;

#[cfg(test)]
pub(crate) mod testing;
