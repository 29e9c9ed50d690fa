//! Hand-written test doubles for the provider and transport ports.

use std::sync::{Arc, Mutex};

use chatrelay_types::chat::ChatId;
use chatrelay_types::error::TransportError;
use chatrelay_types::llm::{CompletionRequest, CompletionResponse, LlmError, Usage};
use tokio::sync::Notify;

use crate::llm::provider::LlmProvider;
use crate::message::transport::ChatTransport;

enum Outcome {
    Reply(String),
    Fail,
}

/// Provider returning a fixed reply (or a fixed error), recording every
/// request it receives. Optionally waits on a gate before answering.
pub(crate) struct ScriptedProvider {
    outcome: Outcome,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedProvider {
    pub(crate) fn replying(reply: &str) -> Self {
        Self {
            outcome: Outcome::Reply(reply.to_string()),
            requests: Arc::default(),
            gate: None,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            outcome: Outcome::Fail,
            requests: Arc::default(),
            gate: None,
        }
    }

    /// Hold every completion until `gate` is notified.
    pub(crate) fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub(crate) fn requests(&self) -> Arc<Mutex<Vec<CompletionRequest>>> {
        Arc::clone(&self.requests)
    }
}

impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.outcome {
            Outcome::Reply(content) => Ok(CompletionResponse {
                id: "chatcmpl-test".to_string(),
                content: content.clone(),
                model: request.model.clone(),
                usage: Usage {
                    input_tokens: 12,
                    output_tokens: 3,
                },
            }),
            Outcome::Fail => Err(LlmError::Provider {
                message: "connection reset".to_string(),
            }),
        }
    }
}

/// Transport recording every outbound message.
#[derive(Clone, Default)]
pub(crate) struct RecordingTransport {
    sent: Arc<Mutex<Vec<(ChatId, String)>>>,
    fail: bool,
}

impl RecordingTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing() -> Self {
        Self {
            sent: Arc::default(),
            fail: true,
        }
    }

    pub(crate) fn sent(&self) -> Vec<(ChatId, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl ChatTransport for RecordingTransport {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send(&self, chat_id: ChatId, text: &str) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
        if self.fail {
            return Err(TransportError::Http("connection refused".to_string()));
        }
        Ok(())
    }
}
