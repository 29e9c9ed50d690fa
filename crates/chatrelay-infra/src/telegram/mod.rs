//! Telegram Bot API integration.
//!
//! [`TelegramClient`] talks to the Bot API over reqwest and doubles as the
//! outbound [`ChatTransport`](chatrelay_core::message::transport::ChatTransport).
//! [`TelegramPoller`] long-polls `getUpdates` and feeds the inbound channel.

pub mod client;
pub mod poller;
pub mod types;

use std::future::Future;
use std::sync::Arc;

use chatrelay_types::error::TransportError;

pub use client::TelegramClient;
pub use poller::TelegramPoller;

use self::types::Update;

/// Source of raw updates for the poller.
pub trait UpdateSource: Send + Sync {
    /// Fetch updates with `update_id >= offset`, waiting up to
    /// `timeout_secs` for new ones.
    fn poll(
        &self,
        offset: i64,
        timeout_secs: u64,
    ) -> impl Future<Output = Result<Vec<Update>, TransportError>> + Send;
}

impl<T: UpdateSource> UpdateSource for Arc<T> {
    fn poll(
        &self,
        offset: i64,
        timeout_secs: u64,
    ) -> impl Future<Output = Result<Vec<Update>, TransportError>> + Send {
        (**self).poll(offset, timeout_secs)
    }
}
