mod file;
mod http;

pub use file::JsonFileStore;
pub use http::HttpDictionaryStore;

use std::sync::Arc;

use scriptvocab_config::StoreBackend;
use scriptvocab_config::store::StoreConfig;
use scriptvocab_core::{DictionaryStore, StoreError};

/// Build the store backend selected in config
pub fn open_store(config: &StoreConfig) -> Result<Arc<dyn DictionaryStore>, StoreError> {
    match config.backend {
        StoreBackend::File => {
            tracing::info!("Using file store at {}", config.data_dir.display());
            Ok(Arc::new(JsonFileStore::new(config.data_dir.clone())))
        }
        StoreBackend::Http => {
            let base_url = config
                .base_url
                .clone()
                .ok_or(StoreError::NotConfigured("STORE_URL not defined"))?;
            tracing::info!("Using HTTP store at {}", base_url);
            Ok(Arc::new(HttpDictionaryStore::new(
                base_url,
                config.api_token.clone(),
                std::time::Duration::from_secs(config.timeout_seconds),
            )?))
        }
    }
}
