mod http;
pub mod languages;
pub mod payload;

pub use http::HttpTranslationApi;
pub use languages::{LANGUAGES, Language, SourceLanguage};
pub use payload::{SubmissionInput, SubmissionPayload, Threshold, UploadFile};

use scriptvocab_types::{RecordsBody, VocabRecord};
use serde::Deserialize;

pub type LanguageCode = String;

/// Translation service interface
#[async_trait::async_trait]
pub trait TranslationApi: Send + Sync {
    /// Submit text or a file and get back the extracted vocabulary
    async fn submit(&self, payload: SubmissionPayload) -> Result<TranslationResponse, TranslateError>;
}

/// Tabular result of a submission, rendered as returned
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "RecordsBody")]
pub struct TranslationResponse {
    pub data: Vec<VocabRecord>,
}

impl From<RecordsBody> for TranslationResponse {
    fn from(body: RecordsBody) -> Self {
        Self {
            data: body.into_records(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("API_URL not defined")]
    MissingEndpoint,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}
