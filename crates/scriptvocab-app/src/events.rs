use std::io::Write;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use scriptvocab_core::StoreError;
use scriptvocab_types::{AuthUser, UserId, VocabRecord};
use scriptvocab_ui::{ConfirmPrompt, DictionaryViewer, RemovalRequest};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod command;
pub mod fetch_dictionary;
pub mod remove_records;

use command::{Flow, handle_command};
use fetch_dictionary::spawn_fetch;

/// Events delivered to the dictionary event loop
#[derive(Debug)]
pub enum AppEvent {
    AuthChanged(Option<AuthUser>),
    DictionaryLoaded {
        user: UserId,
        result: Result<Vec<VocabRecord>, StoreError>,
    },
    RecordsRemoved {
        request: RemovalRequest,
        result: Result<(), StoreError>,
    },
}

/// Dictionary screen: viewer state plus where it renders to
pub struct DictionarySession<W> {
    pub(crate) state: Arc<AppState>,
    pub(crate) viewer: DictionaryViewer,
    pub(crate) events_tx: AsyncSender<AppEvent>,
    pub(crate) out: W,
    /// Store calls spawned but not yet reported back
    pub(crate) in_flight: usize,
}

impl<W: Write + Send> DictionarySession<W> {
    pub fn new(state: Arc<AppState>, events_tx: AsyncSender<AppEvent>, out: W) -> Self {
        Self {
            state,
            viewer: DictionaryViewer::new(),
            events_tx,
            out,
            in_flight: 0,
        }
    }

    pub fn viewer(&self) -> &DictionaryViewer {
        &self.viewer
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// No pending auth resolution, fetch or removal
    pub fn is_settled(&self) -> bool {
        !self.viewer.is_loading() && self.in_flight == 0
    }

    pub fn render(&mut self) -> anyhow::Result<()> {
        writeln!(self.out)?;
        write!(self.out, "{}", self.viewer.view())?;
        self.out.flush()?;
        Ok(())
    }

    pub async fn handle_event(&mut self, event: AppEvent) -> anyhow::Result<()> {
        tracing::debug!("[EVENT_LOOP] {:?}", std::mem::discriminant(&event));
        match event {
            AppEvent::AuthChanged(user) => {
                if let Some(request) = self.viewer.auth_changed(user) {
                    self.in_flight += 1;
                    spawn_fetch(self.state.store.clone(), request, self.events_tx.clone());
                }
            }
            AppEvent::DictionaryLoaded { user, result } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.viewer.fetch_completed(&user, result);
            }
            AppEvent::RecordsRemoved { request, result } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.viewer.removal_completed(&request, result);
            }
        }

        self.render()
    }

    pub async fn handle_line(
        &mut self,
        line: &str,
        prompt: &mut dyn ConfirmPrompt,
    ) -> anyhow::Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        match line.parse() {
            Ok(command) => handle_command(self, command, prompt).await,
            Err(e) => {
                writeln!(self.out, "{e}")?;
                Ok(Flow::Continue)
            }
        }
    }
}

/// Dictionary event loop: auth/store events and user input, until quit.
///
/// When input reaches EOF the loop keeps handling events until the session
/// settles, so piped input still sees the loaded dictionary.
pub async fn event_loop<W: Write + Send>(
    mut session: DictionarySession<W>,
    events_rx: AsyncReceiver<AppEvent>,
    lines_rx: AsyncReceiver<String>,
    mut prompt: Box<dyn ConfirmPrompt>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    session.render()?;

    tracing::info!("[EVENT_LOOP] Starting dictionary loop");
    let mut input_open = true;
    loop {
        if !input_open && session.is_settled() {
            break;
        }

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                break;
            }
            event = events_rx.recv() => {
                session.handle_event(event?).await?;
            }
            line = lines_rx.recv(), if input_open => {
                let Ok(line) = line else {
                    tracing::info!("[EVENT_LOOP] Input closed, finishing pending work");
                    input_open = false;
                    continue;
                };
                if session.handle_line(&line, prompt.as_mut()).await? == Flow::Quit {
                    break;
                }
            }
        }
    }

    Ok(())
}
