use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use scriptvocab_core::AuthProvider;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::{AppEvent, DictionarySession, event_loop};
use crate::io::{LineConfirm, spawn_stdin_reader, watch_auth};
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub events: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            events: kanal::bounded_async(64),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Spawn the dictionary screen: stdin reader, auth watcher and event loop
    pub fn spawn_dictionary(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        let (lines_tx, lines_rx) = kanal::bounded::<String>(16);
        let lines_rx = lines_rx.to_async();
        spawn_stdin_reader(lines_tx);

        // Auth watcher
        tasks.spawn(watch_auth(
            self.state.auth.subscribe(),
            self.cancel_token.child_token(),
            self.channels.events.0.clone(),
        ));

        // Event loop
        let session = DictionarySession::new(
            self.state.clone(),
            self.channels.events.0.clone(),
            std::io::stdout(),
        );
        tasks.spawn(event_loop(
            session,
            self.channels.events.1.clone(),
            lines_rx.clone(),
            Box::new(LineConfirm::new(lines_rx)),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
