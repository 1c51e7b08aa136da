use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use kanal::AsyncReceiver;
use scriptvocab_config::Config;
use scriptvocab_core::{DictionaryStore, StoreError};
use scriptvocab_translator::{SubmissionPayload, TranslateError, TranslationApi, TranslationResponse};
use scriptvocab_types::{AuthUser, UserId, VocabRecord};
use scriptvocab_ui::ConfirmPrompt;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::events::command::Flow;
use crate::events::{AppEvent, DictionarySession, event_loop};
use crate::state::AppState;

#[derive(Default)]
struct MemoryStore {
    data: Mutex<HashMap<UserId, Vec<VocabRecord>>>,
    fail_remove: AtomicBool,
    remove_calls: AtomicUsize,
}

impl MemoryStore {
    fn with_user(user: &str, words: &[&str]) -> Self {
        let store = Self::default();
        let records = words
            .iter()
            .map(|w| VocabRecord::new(*w).with_field("translation", format!("{w}-en")))
            .collect();
        store.data.lock().unwrap().insert(UserId::from(user), records);
        store
    }

    fn ids(&self, user: &str) -> Vec<String> {
        self.data.lock().unwrap()[&UserId::from(user)]
            .iter()
            .map(|r| r.original_text.clone())
            .collect()
    }
}

#[async_trait]
impl DictionaryStore for MemoryStore {
    async fn fetch(&self, user: &UserId) -> Result<Vec<VocabRecord>, StoreError> {
        Ok(self.data.lock().unwrap().get(user).cloned().unwrap_or_default())
    }

    async fn remove(&self, user: &UserId, ids: &[String]) -> Result<(), StoreError> {
        self.remove_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(StoreError::ApiError {
                status: 503,
                message: "unavailable".to_string(),
            });
        }

        if let Some(records) = self.data.lock().unwrap().get_mut(user) {
            records.retain(|r| !ids.contains(&r.original_text));
        }
        Ok(())
    }
}

struct NoTranslator;

#[async_trait]
impl TranslationApi for NoTranslator {
    async fn submit(&self, _: SubmissionPayload) -> Result<TranslationResponse, TranslateError> {
        Err(TranslateError::MissingEndpoint)
    }
}

struct Answer(bool);

#[async_trait]
impl ConfirmPrompt for Answer {
    async fn confirm(&mut self, _message: &str) -> bool {
        self.0
    }
}

/// Writer whose contents stay readable after the session moves into a task
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn state_with(store: Arc<MemoryStore>) -> Arc<AppState> {
    Arc::new(AppState::with_parts(
        Config::default(),
        store,
        Arc::new(NoTranslator),
    ))
}

async fn next_event(rx: &AsyncReceiver<AppEvent>) -> AppEvent {
    timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("event never arrived")
        .expect("channel closed")
}

fn output(session: &DictionarySession<Vec<u8>>) -> String {
    String::from_utf8_lossy(session.output()).into_owned()
}

/// Session signed in as alice with her dictionary loaded
async fn loaded_session(
    store: Arc<MemoryStore>,
) -> (DictionarySession<Vec<u8>>, AsyncReceiver<AppEvent>) {
    let (tx, rx) = kanal::unbounded_async();
    let mut session = DictionarySession::new(state_with(store), tx, Vec::new());

    session
        .handle_event(AppEvent::AuthChanged(Some(AuthUser::new("alice"))))
        .await
        .unwrap();
    assert!(session.viewer().is_loading());

    let loaded = next_event(&rx).await;
    assert!(matches!(loaded, AppEvent::DictionaryLoaded { .. }));
    session.handle_event(loaded).await.unwrap();

    (session, rx)
}

#[tokio::test]
async fn signed_out_shows_no_data_and_no_spinner() {
    let (tx, _rx) = kanal::unbounded_async();
    let mut session = DictionarySession::new(state_with(Arc::default()), tx, Vec::new());

    session.handle_event(AppEvent::AuthChanged(None)).await.unwrap();

    assert!(!session.viewer().is_loading());
    assert!(session.viewer().records().is_none());
    assert!(output(&session).contains("Sign in to see your personal dictionary."));
    assert!(!output(&session).ends_with("Loading...\n"));
}

#[tokio::test]
async fn sign_in_loads_dictionary() {
    let store = Arc::new(MemoryStore::with_user("alice", &["gato", "perro"]));
    let (session, _rx) = loaded_session(store).await;

    assert_eq!(session.viewer().records().unwrap().len(), 2);
    let rendered = output(&session);
    assert!(rendered.contains("Loading..."));
    assert!(rendered.contains("Personal Dictionary"));
    assert!(rendered.contains("perro-en"));
}

#[tokio::test]
async fn empty_dictionary_shows_empty_state() {
    let store = Arc::new(MemoryStore::with_user("alice", &[]));
    let (session, _rx) = loaded_session(store).await;

    assert!(output(&session).ends_with("Your personal dictionary is empty.\n"));
}

#[tokio::test]
async fn confirmed_delete_removes_selection_everywhere() {
    let store = Arc::new(MemoryStore::with_user("alice", &["gato", "perro", "pez"]));
    let (mut session, rx) = loaded_session(store.clone()).await;
    let mut yes = Answer(true);

    for line in ["edit", "toggle gato", "toggle pez"] {
        assert_eq!(session.handle_line(line, &mut yes).await.unwrap(), Flow::Continue);
    }
    assert_eq!(session.viewer().selection().len(), 2);

    session.handle_line("remove", &mut yes).await.unwrap();
    let removed = next_event(&rx).await;
    session.handle_event(removed).await.unwrap();

    let remaining: Vec<_> = session
        .viewer()
        .records()
        .unwrap()
        .iter()
        .map(|r| r.id().to_string())
        .collect();
    assert_eq!(remaining, vec!["perro"]);
    assert!(session.viewer().selection().is_empty());
    assert!(!session.viewer().is_edit_mode());
    assert_eq!(store.ids("alice"), vec!["perro"]);
}

#[tokio::test]
async fn declined_delete_never_calls_store() {
    let store = Arc::new(MemoryStore::with_user("alice", &["gato"]));
    let (mut session, rx) = loaded_session(store.clone()).await;

    session.handle_line("edit", &mut Answer(false)).await.unwrap();
    session.handle_line("toggle gato", &mut Answer(false)).await.unwrap();
    session.handle_line("remove", &mut Answer(false)).await.unwrap();

    assert!(
        timeout(Duration::from_millis(100), rx.recv()).await.is_err(),
        "no removal should be in flight"
    );
    assert_eq!(store.remove_calls.load(Ordering::SeqCst), 0);
    assert!(session.viewer().is_edit_mode());
}

#[tokio::test]
async fn failed_delete_keeps_state() {
    let store = Arc::new(MemoryStore::with_user("alice", &["gato", "perro"]));
    store.fail_remove.store(true, Ordering::SeqCst);
    let (mut session, rx) = loaded_session(store.clone()).await;
    let mut yes = Answer(true);

    session.handle_line("edit", &mut yes).await.unwrap();
    session.handle_line("toggle gato", &mut yes).await.unwrap();
    session.handle_line("remove", &mut yes).await.unwrap();
    let removed = next_event(&rx).await;
    session.handle_event(removed).await.unwrap();

    assert_eq!(store.remove_calls.load(Ordering::SeqCst), 1);
    assert_eq!(session.viewer().records().unwrap().len(), 2);
    assert!(session.viewer().selection().contains("gato"));
    assert!(session.viewer().is_edit_mode());
}

#[tokio::test]
async fn bad_input_is_reported_inline() {
    let store = Arc::new(MemoryStore::with_user("alice", &["gato"]));
    let (mut session, _rx) = loaded_session(store).await;
    let mut yes = Answer(true);

    session.handle_line("dance", &mut yes).await.unwrap();
    session.handle_line("toggle gato", &mut yes).await.unwrap();

    let rendered = output(&session);
    assert!(rendered.contains("Unknown command: dance"));
    assert!(rendered.contains("Not in edit mode"));
}

#[tokio::test]
async fn login_command_signs_in_through_auth() {
    let store = Arc::new(MemoryStore::with_user("bob", &["Hund"]));
    let state = state_with(store);
    let (tx, _rx) = kanal::unbounded_async();
    let mut session = DictionarySession::new(state.clone(), tx, Vec::new());

    session.handle_line("login bob", &mut Answer(true)).await.unwrap();
    assert_eq!(state.auth.current(), Some(AuthUser::new("bob")));

    session.handle_line("logout", &mut Answer(true)).await.unwrap();
    assert_eq!(state.auth.current(), None);
}

#[tokio::test]
async fn event_loop_stops_on_quit() {
    let state = state_with(Arc::default());
    let (events_tx, events_rx) = kanal::unbounded_async();
    let (lines_tx, lines_rx) = kanal::unbounded_async::<String>();
    let session = DictionarySession::new(state, events_tx.clone(), Vec::new());

    let handle = tokio::spawn(event_loop(
        session,
        events_rx,
        lines_rx,
        Box::new(Answer(true)),
        CancellationToken::new(),
    ));

    events_tx.send(AppEvent::AuthChanged(None)).await.unwrap();
    lines_tx.send("quit".to_string()).await.unwrap();

    timeout(Duration::from_secs(2), handle)
        .await
        .expect("loop did not stop")
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn event_loop_stops_on_cancel() {
    let state = state_with(Arc::default());
    let (events_tx, events_rx) = kanal::unbounded_async();
    let (_lines_tx, lines_rx) = kanal::unbounded_async::<String>();
    let cancel = CancellationToken::new();
    let session = DictionarySession::new(state, events_tx, Vec::new());

    let handle = tokio::spawn(event_loop(
        session,
        events_rx,
        lines_rx,
        Box::new(Answer(true)),
        cancel.clone(),
    ));
    cancel.cancel();

    timeout(Duration::from_secs(2), handle)
        .await
        .expect("loop did not stop")
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn input_eof_waits_for_pending_load() {
    let store = Arc::new(MemoryStore::with_user("alice", &["gato"]));
    let (events_tx, events_rx) = kanal::unbounded_async();
    let (lines_tx, lines_rx) = kanal::unbounded_async::<String>();
    let out = SharedBuf::default();
    let session = DictionarySession::new(state_with(store), events_tx.clone(), out.clone());

    let handle = tokio::spawn(event_loop(
        session,
        events_rx,
        lines_rx,
        Box::new(Answer(true)),
        CancellationToken::new(),
    ));

    lines_tx.send("show".to_string()).await.unwrap();
    drop(lines_tx);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!handle.is_finished(), "loop exited while still loading");

    events_tx
        .send(AppEvent::AuthChanged(Some(AuthUser::new("alice"))))
        .await
        .unwrap();

    timeout(Duration::from_secs(2), handle)
        .await
        .expect("loop did not stop after loading")
        .unwrap()
        .unwrap();

    let rendered = out.contents();
    assert!(rendered.contains("Loading..."));
    assert!(rendered.contains("Personal Dictionary"));
    assert!(rendered.contains("gato-en"));
}

#[tokio::test]
async fn input_eof_when_signed_out_stops() {
    let (events_tx, events_rx) = kanal::unbounded_async();
    let (lines_tx, lines_rx) = kanal::unbounded_async::<String>();
    let session =
        DictionarySession::new(state_with(Arc::default()), events_tx.clone(), Vec::new());

    let handle = tokio::spawn(event_loop(
        session,
        events_rx,
        lines_rx,
        Box::new(Answer(true)),
        CancellationToken::new(),
    ));

    drop(lines_tx);
    events_tx.send(AppEvent::AuthChanged(None)).await.unwrap();

    timeout(Duration::from_secs(2), handle)
        .await
        .expect("loop did not stop")
        .unwrap()
        .unwrap();
}
