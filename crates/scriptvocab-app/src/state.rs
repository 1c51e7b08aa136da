use std::sync::Arc;
use std::time::Duration;

use scriptvocab_config::Config;
use scriptvocab_core::{DictionaryStore, SessionAuth};
use scriptvocab_translator::{HttpTranslationApi, TranslationApi};

pub struct AppState {
    pub config: Config,
    pub auth: Arc<SessionAuth>,
    pub store: Arc<dyn DictionaryStore>,
    pub translator: Arc<dyn TranslationApi>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let store = scriptvocab_store::open_store(&config.store)?;
        let translator = HttpTranslationApi::new(
            config.translator.api_url.clone(),
            Duration::from_secs(config.translator.timeout_seconds),
        )?;

        if config.translator.api_url.is_none() {
            tracing::warn!("API_URL not defined, translation requests will fail");
        }

        Ok(Self::with_parts(config, store, Arc::new(translator)))
    }

    pub fn with_parts(
        config: Config,
        store: Arc<dyn DictionaryStore>,
        translator: Arc<dyn TranslationApi>,
    ) -> Self {
        Self {
            config,
            auth: Arc::new(SessionAuth::new()),
            store,
            translator,
        }
    }
}
