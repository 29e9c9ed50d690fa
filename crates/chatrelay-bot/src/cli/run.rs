//! `chatrelay run`: poll Telegram and relay until interrupted.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use chatrelay_core::message::Dispatcher;
use chatrelay_infra::telegram::TelegramPoller;

use crate::state::AppState;

/// Buffer between the poller and the dispatcher.
const INBOUND_BUFFER: usize = 256;

pub async fn run(state: AppState) -> Result<()> {
    info!(
        bot = %state.config.bot_username,
        model = state.provider.default_model(),
        "chatrelay starting"
    );

    let cancel = CancellationToken::new();
    let (tx, rx) = mpsc::channel(INBOUND_BUFFER);

    let poller = TelegramPoller::new(
        Arc::clone(&state.telegram),
        state.config.file.telegram.poll_timeout_secs,
    );
    let poller_task = tokio::spawn(poller.run(tx, cancel.clone()));
    let dispatcher_task =
        tokio::spawn(Dispatcher::new(Arc::clone(&state.relay)).run(rx, cancel.clone()));

    shutdown_signal().await;
    info!("shutdown requested");
    cancel.cancel();

    let (poller_result, dispatcher_result) = tokio::join!(poller_task, dispatcher_task);
    poller_result?;
    dispatcher_result?;

    info!(chats = state.store.len(), "chatrelay stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
