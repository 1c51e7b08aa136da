use std::io::{BufRead, Write};

use async_trait::async_trait;
use kanal::{AsyncReceiver, AsyncSender, Sender};
use scriptvocab_core::AuthSubscription;
use scriptvocab_ui::ConfirmPrompt;
use tokio_util::sync::CancellationToken;

use crate::events::AppEvent;

/// Read stdin lines on a dedicated thread. The thread ends on EOF or once
/// the receiving side is gone.
pub fn spawn_stdin_reader(lines_tx: Sender<String>) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if lines_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
        tracing::debug!("Stdin reader stopping");
    })
}

/// Forward auth state changes into the event loop
pub async fn watch_auth(
    mut subscription: AuthSubscription,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            next = subscription.next() => {
                let Some(user) = next else {
                    tracing::warn!("Auth provider closed");
                    break;
                };
                event_tx.send(AppEvent::AuthChanged(user)).await?;
            }
        }
    }

    tracing::info!("Auth watcher stopping");
    Ok(())
}

/// Confirmation answered on the terminal with the next input line
pub struct LineConfirm {
    lines_rx: AsyncReceiver<String>,
}

impl LineConfirm {
    pub fn new(lines_rx: AsyncReceiver<String>) -> Self {
        Self { lines_rx }
    }
}

#[async_trait]
impl ConfirmPrompt for LineConfirm {
    async fn confirm(&mut self, message: &str) -> bool {
        {
            let mut out = std::io::stdout().lock();
            if write!(out, "{message} [y/N] ").and_then(|_| out.flush()).is_err() {
                return false;
            }
        }

        match self.lines_rx.recv().await {
            Ok(answer) => is_yes(&answer),
            Err(_) => false,
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
