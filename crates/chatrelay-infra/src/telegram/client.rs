//! Telegram Bot API client over reqwest.
//!
//! # Token Security
//!
//! The bot token is part of every request URL. It is held in a
//! [`SecretString`], never appears in `Debug` output, and reqwest errors are
//! stripped of their URL before being logged or returned.

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use chatrelay_core::message::transport::ChatTransport;
use chatrelay_types::chat::ChatId;
use chatrelay_types::config::TelegramSettings;
use chatrelay_types::error::TransportError;

use super::types::{ApiResponse, GetUpdatesParams, SendMessageParams, Update};
use super::UpdateSource;

/// Slack added on top of the long-poll timeout for the HTTP request itself.
const POLL_GRACE: Duration = Duration::from_secs(10);

/// Timeout for ordinary (non-polling) calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const ALLOWED_UPDATES: &[&str] = &["message"];

pub struct TelegramClient {
    http: Client,
    api_base: String,
    token: SecretString,
}

impl TelegramClient {
    pub fn new(settings: &TelegramSettings, token: SecretString) -> Self {
        Self {
            http: Client::new(),
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token.expose_secret(), method)
    }

    async fn call<P, R>(&self, method: &str, params: &P, timeout: Duration) -> Result<R, TransportError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.method_url(method))
            .json(params)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| TransportError::Http(e.without_url().to_string()))?;

        let body: ApiResponse<R> = response
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.without_url().to_string()))?;

        match body {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse {
                ok: true,
                result: None,
                ..
            } => Err(TransportError::Decode(format!("{method}: missing result"))),
            ApiResponse {
                error_code,
                description,
                ..
            } => Err(TransportError::Api {
                code: error_code.unwrap_or_default(),
                description: description.unwrap_or_else(|| "unknown error".to_string()),
            }),
        }
    }

    /// Long-poll for updates after `offset`, waiting up to `timeout_secs`.
    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>, TransportError> {
        let params = GetUpdatesParams {
            offset,
            timeout: timeout_secs,
            allowed_updates: ALLOWED_UPDATES,
        };
        self.call(
            "getUpdates",
            &params,
            Duration::from_secs(timeout_secs) + POLL_GRACE,
        )
        .await
    }

    /// Send a plain-text message to `chat_id`.
    pub async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<(), TransportError> {
        let params = SendMessageParams {
            chat_id: chat_id.0,
            text,
        };
        let _: serde_json::Value = self.call("sendMessage", &params, REQUEST_TIMEOUT).await?;
        debug!(%chat_id, len = text.len(), "message sent");
        Ok(())
    }
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("api_base", &self.api_base)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl ChatTransport for TelegramClient {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, chat_id: ChatId, text: &str) -> Result<(), TransportError> {
        self.send_message(chat_id, text).await
    }
}

impl UpdateSource for TelegramClient {
    async fn poll(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>, TransportError> {
        self.get_updates(offset, timeout_secs).await
    }
}
