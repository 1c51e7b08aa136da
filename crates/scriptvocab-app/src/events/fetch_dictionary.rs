use std::sync::Arc;

use kanal::AsyncSender;
use scriptvocab_core::DictionaryStore;
use scriptvocab_ui::FetchRequest;

use super::AppEvent;

/// Fetch the user's dictionary in the background and report back
pub fn spawn_fetch(
    store: Arc<dyn DictionaryStore>,
    request: FetchRequest,
    events_tx: AsyncSender<AppEvent>,
) {
    tokio::spawn(async move {
        tracing::debug!("Fetching dictionary for {}", request.user);
        let result = store.fetch(&request.user).await;

        let event = AppEvent::DictionaryLoaded {
            user: request.user,
            result,
        };
        if let Err(e) = events_tx.send(event).await {
            tracing::error!("Failed to deliver dictionary: {}", e);
        }
    });
}
