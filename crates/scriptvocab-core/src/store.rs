use scriptvocab_types::{UserId, VocabRecord};

/// Persistent per-user vocabulary collection
#[async_trait::async_trait]
pub trait DictionaryStore: Send + Sync {
    /// Fetch every record saved by `user`
    async fn fetch(&self, user: &UserId) -> Result<Vec<VocabRecord>, StoreError>;

    /// Remove the records whose `original_text` is in `ids`
    async fn remove(&self, user: &UserId, ids: &[String]) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store error: HTTP {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed dictionary data: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid store URL: {0}")]
    InvalidUrl(String),

    #[error("Store not configured: {0}")]
    NotConfigured(&'static str),
}
