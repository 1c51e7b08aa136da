use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, Url};
use scriptvocab_core::{DictionaryStore, StoreError};
use scriptvocab_types::{RecordsBody, UserId, VocabRecord};
use serde::Serialize;

/// Dictionary store reached over a small REST API:
///
/// - `GET  {base}/users/{user}/dictionary` returns the records
/// - `POST {base}/users/{user}/dictionary/remove` with `{"ids": [...]}`
#[derive(Clone)]
pub struct HttpDictionaryStore {
    base_url: Url,
    api_token: Option<String>,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct RemoveRequest<'a> {
    ids: &'a [String],
}

impl HttpDictionaryStore {
    pub fn new(
        base_url: String,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let base_url = Url::parse(&base_url)
            .map_err(|e| StoreError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_token,
            client,
        })
    }

    /// `{base}/users/{user}/dictionary[/{action}]`, with `user` escaped as a
    /// single path segment
    fn dictionary_url(&self, user: &UserId, action: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["users", user.as_str(), "dictionary"])
                .extend(action);
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(StoreError::ApiError {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl DictionaryStore for HttpDictionaryStore {
    async fn fetch(&self, user: &UserId) -> Result<Vec<VocabRecord>, StoreError> {
        let request = self.authorize(self.client.get(self.dictionary_url(user, None)));
        let response = Self::check(request.send().await?).await?;

        let body = response.bytes().await?;
        let records = serde_json::from_slice::<RecordsBody>(&body)?.into_records();
        tracing::debug!("Fetched {} records for {}", records.len(), user);
        Ok(records)
    }

    async fn remove(&self, user: &UserId, ids: &[String]) -> Result<(), StoreError> {
        let url = self.dictionary_url(user, Some("remove"));
        let request = self.authorize(self.client.post(url).json(&RemoveRequest { ids }));
        Self::check(request.send().await?).await?;

        tracing::debug!("Removed {} records for {}", ids.len(), user);
        Ok(())
    }
}
