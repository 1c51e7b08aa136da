use std::sync::Arc;

use kanal::AsyncSender;
use scriptvocab_core::DictionaryStore;
use scriptvocab_ui::RemovalRequest;

use super::AppEvent;

/// Ask the store to drop the selected records and report back
pub fn spawn_removal(
    store: Arc<dyn DictionaryStore>,
    request: RemovalRequest,
    events_tx: AsyncSender<AppEvent>,
) {
    tokio::spawn(async move {
        tracing::info!("Removing {} records for {}", request.ids.len(), request.user);
        let result = store.remove(&request.user, &request.ids).await;

        if let Err(e) = events_tx
            .send(AppEvent::RecordsRemoved { request, result })
            .await
        {
            tracing::error!("Failed to deliver removal result: {}", e);
        }
    });
}
