//! Per-chat dispatch of the inbound message stream.
//!
//! The platform delivers a single ordered stream for all chats. The
//! `Dispatcher` fans it out into one bounded `mpsc` mailbox per chat, each
//! drained by its own task. Within a chat, messages are handled strictly in
//! arrival order, one at a time, so at most one completion is in flight per
//! chat. A slow completion only delays later messages of the same chat.
//!
//! A worker that sees no message for its idle timeout closes its mailbox,
//! finishes whatever was already queued and exits. The next message for that
//! chat spawns a fresh worker, so quiet chats do not pin a task each.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chatrelay_types::chat::ChatId;
use chatrelay_types::message::InboundMessage;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::handler::MessageHandler;

/// Buffer size for per-chat mailboxes.
const MAILBOX_BUFFER: usize = 256;

/// How long a chat worker waits for its next message before retiring.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(600);

/// Fans the inbound stream out to per-chat worker tasks.
pub struct Dispatcher<H: MessageHandler + 'static> {
    handler: Arc<H>,
    /// Per-chat mailbox senders (chat_id -> mpsc sender).
    mailboxes: HashMap<ChatId, mpsc::Sender<InboundMessage>>,
    workers: JoinSet<()>,
    idle_timeout: Duration,
    dropped: u64,
}

impl<H: MessageHandler + 'static> Dispatcher<H> {
    pub fn new(handler: Arc<H>) -> Self {
        Self {
            handler,
            mailboxes: HashMap::new(),
            workers: JoinSet::new(),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            dropped: 0,
        }
    }

    /// Override how long an idle chat worker lives.
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Consume `inbound` until it closes or `cancel` fires, then close every
    /// mailbox and wait for the workers to drain what they already hold.
    pub async fn run(mut self, mut inbound: mpsc::Receiver<InboundMessage>, cancel: CancellationToken) {
        info!("dispatcher started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("dispatcher cancelled");
                    break;
                }
                next = inbound.recv() => match next {
                    Some(message) => self.route(message),
                    None => {
                        debug!("inbound stream closed");
                        break;
                    }
                },
                Some(result) = self.workers.join_next(), if !self.workers.is_empty() => {
                    self.reap(result);
                }
            }
        }

        let chats = self.mailboxes.len();
        self.mailboxes.clear();
        while let Some(result) = self.workers.join_next().await {
            self.reap(result);
        }

        info!(chats, dropped = self.dropped, "dispatcher stopped");
    }

    /// Deliver one message to its chat's mailbox, spawning the worker on
    /// first contact or after the previous one retired.
    fn route(&mut self, message: InboundMessage) {
        let chat_id = message.chat_id;

        let sender = match self.mailboxes.get(&chat_id) {
            Some(sender) if !sender.is_closed() => sender.clone(),
            _ => self.spawn_worker(chat_id),
        };

        let message = match sender.try_send(message) {
            Ok(()) => return,
            Err(mpsc::error::TrySendError::Full(_)) => {
                self.dropped += 1;
                warn!(%chat_id, "mailbox full, message dropped");
                return;
            }
            Err(mpsc::error::TrySendError::Closed(message)) => message,
        };

        // The worker retired between the check and the send.
        if self.spawn_worker(chat_id).try_send(message).is_err() {
            self.dropped += 1;
            warn!(%chat_id, "mailbox closed, message dropped");
        }
    }

    /// Forget the mailboxes of workers that have exited.
    fn reap(&mut self, result: Result<(), tokio::task::JoinError>) {
        if let Err(e) = result {
            warn!(error = %e, "chat worker ended abnormally");
        }
        self.mailboxes.retain(|_, sender| !sender.is_closed());
    }

    fn spawn_worker(&mut self, chat_id: ChatId) -> mpsc::Sender<InboundMessage> {
        let (tx, rx) = mpsc::channel(MAILBOX_BUFFER);
        self.mailboxes.insert(chat_id, tx.clone());
        self.workers
            .spawn(chat_worker(chat_id, Arc::clone(&self.handler), rx, self.idle_timeout));
        debug!(%chat_id, "spawned chat worker");
        tx
    }
}

async fn chat_worker<H: MessageHandler>(
    chat_id: ChatId,
    handler: Arc<H>,
    mut mailbox: mpsc::Receiver<InboundMessage>,
    idle_timeout: Duration,
) {
    loop {
        match tokio::time::timeout(idle_timeout, mailbox.recv()).await {
            Ok(Some(message)) => handler.handle_message(message).await,
            Ok(None) => break,
            Err(_) => {
                // Refuse new sends, then drain what was already accepted.
                mailbox.close();
                while let Some(message) = mailbox.recv().await {
                    handler.handle_message(message).await;
                }
                debug!(%chat_id, "chat worker idle, retired");
                return;
            }
        }
    }
    debug!(%chat_id, "chat worker stopped");
}

impl<H: MessageHandler + 'static> std::fmt::Debug for Dispatcher<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("chats", &self.mailboxes.len())
            .field("workers", &self.workers.len())
            .field("dropped", &self.dropped)
            .finish()
    }
}
