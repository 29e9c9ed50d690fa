//! Long-polling loop feeding the inbound message channel.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use chatrelay_types::message::InboundMessage;

use super::UpdateSource;

/// Pause after a failed poll before trying again.
const ERROR_BACKOFF: Duration = Duration::from_secs(5);

pub struct TelegramPoller<S: UpdateSource> {
    source: S,
    timeout_secs: u64,
    offset: i64,
}

impl<S: UpdateSource> TelegramPoller<S> {
    pub fn new(source: S, timeout_secs: u64) -> Self {
        Self {
            source,
            timeout_secs,
            offset: 0,
        }
    }

    /// Poll until `cancel` fires or the inbound receiver is dropped.
    ///
    /// Each batch advances the offset past the highest `update_id` seen, so
    /// an update is delivered at most once even if it converts to nothing.
    pub async fn run(mut self, inbound: mpsc::Sender<InboundMessage>, cancel: CancellationToken) {
        info!(timeout_secs = self.timeout_secs, "telegram poller started");

        loop {
            let batch = tokio::select! {
                _ = cancel.cancelled() => break,
                batch = self.source.poll(self.offset, self.timeout_secs) => batch,
            };

            let updates = match batch {
                Ok(updates) => updates,
                Err(e) => {
                    warn!(error = %e, "telegram poll failed, backing off");
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = tokio::time::sleep(ERROR_BACKOFF) => continue,
                    }
                }
            };

            for update in updates {
                self.offset = self.offset.max(update.update_id + 1);
                let update_id = update.update_id;
                let Some(message) = update.into_inbound() else {
                    debug!(update_id, "skipping update without a usable message");
                    continue;
                };
                if inbound.send(message).await.is_err() {
                    debug!("inbound channel closed");
                    return;
                }
            }
        }

        info!(offset = self.offset, "telegram poller stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use chatrelay_types::chat::ChatId;
    use chatrelay_types::error::TransportError;

    use crate::telegram::types::Update;

    /// Source replaying scripted batches, recording the offsets it was
    /// asked for. Once the script runs out it parks forever.
    struct ScriptedSource {
        batches: Mutex<VecDeque<Result<Vec<Update>, TransportError>>>,
        offsets: Mutex<Vec<i64>>,
    }

    impl ScriptedSource {
        fn new(batches: Vec<Result<Vec<Update>, TransportError>>) -> Self {
            Self {
                batches: Mutex::new(batches.into()),
                offsets: Mutex::new(Vec::new()),
            }
        }
    }

    impl UpdateSource for &ScriptedSource {
        async fn poll(&self, offset: i64, _timeout_secs: u64) -> Result<Vec<Update>, TransportError> {
            self.offsets.lock().unwrap().push(offset);
            let next = self.batches.lock().unwrap().pop_front();
            match next {
                Some(batch) => batch,
                None => std::future::pending().await,
            }
        }
    }

    fn update(json: &str) -> Update {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn test_forwards_messages_and_advances_offset() {
        let source = ScriptedSource::new(vec![
            Ok(vec![
                update(r#"{"update_id":10,"message":{"message_id":1,"chat":{"id":5},"from":{"id":1,"first_name":"Ann","username":"ann"},"text":"hi"}}"#),
                update(r#"{"update_id":11}"#),
            ]),
            Ok(vec![
                update(r#"{"update_id":12,"message":{"message_id":2,"chat":{"id":5},"from":{"id":2,"first_name":"Ben"},"text":"yo"}}"#),
            ]),
        ]);
        let (tx, mut rx) = mpsc::channel(8);
        let cancel = CancellationToken::new();

        let poller = TelegramPoller::new(&source, 1);
        let run = poller.run(tx, cancel.clone());
        let collect = async {
            let first = rx.recv().await.unwrap();
            let second = rx.recv().await.unwrap();
            cancel.cancel();
            (first, second)
        };
        let ((first, second), ()) = tokio::join!(collect, run);

        assert_eq!(first, InboundMessage::new(ChatId(5), "ann", "hi"));
        assert_eq!(second, InboundMessage::new(ChatId(5), "Ben", "yo"));
        // Update 11 carried no message but still moved the offset.
        assert_eq!(&source.offsets.lock().unwrap()[..2], &[0, 12]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backs_off_after_poll_error() {
        let source = ScriptedSource::new(vec![
            Err(TransportError::Http("connection reset".to_string())),
            Ok(vec![update(
                r#"{"update_id":1,"message":{"message_id":1,"chat":{"id":2},"from":{"id":3,"first_name":"Cy"}}}"#,
            )]),
        ]);
        let (tx, mut rx) = mpsc::channel(8);
        let cancel = CancellationToken::new();

        let started = tokio::time::Instant::now();
        let run = TelegramPoller::new(&source, 1).run(tx, cancel.clone());
        let collect = async {
            let message = rx.recv().await.unwrap();
            cancel.cancel();
            message
        };
        let (message, ()) = tokio::join!(collect, run);

        assert!(started.elapsed() >= ERROR_BACKOFF);
        assert_eq!(message.text, "");
        assert_eq!(message.sender, "Cy");
    }

    #[tokio::test]
    async fn test_stops_when_receiver_dropped() {
        let source = ScriptedSource::new(vec![Ok(vec![update(
            r#"{"update_id":1,"message":{"message_id":1,"chat":{"id":2},"from":{"id":3,"first_name":"Cy"},"text":"x"}}"#,
        )])]);
        let (tx, rx) = mpsc::channel(8);
        drop(rx);

        TelegramPoller::new(&source, 1)
            .run(tx, CancellationToken::new())
            .await;

        assert_eq!(source.offsets.lock().unwrap().len(), 1);
    }
}
