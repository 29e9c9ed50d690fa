//! Infrastructure layer for chatrelay.
//!
//! Contains the concrete adapters behind the ports defined in
//! `chatrelay-core`: the OpenAI-compatible completion provider, the Telegram
//! Bot API client and poller, and startup configuration loading.

pub mod config;
pub mod llm;
pub mod secret;
pub mod telegram;
