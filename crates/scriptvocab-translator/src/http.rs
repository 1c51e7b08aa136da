use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use crate::{SubmissionInput, SubmissionPayload, TranslateError, TranslationApi, TranslationResponse};

/// Posts submissions as `multipart/form-data` to the configured endpoint
#[derive(Clone)]
pub struct HttpTranslationApi {
    client: reqwest::Client,
    api_url: Option<String>,
}

impl HttpTranslationApi {
    pub fn new(api_url: Option<String>, timeout: Duration) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_url })
    }

    fn build_form(payload: SubmissionPayload) -> Result<Form, TranslateError> {
        let mut form = Form::new();
        for (name, value) in payload.fields() {
            form = form.text(name, value);
        }

        if let SubmissionInput::File(file) = payload.input {
            let mut part = Part::bytes(file.bytes).file_name(file.name);
            if let Some(mime) = &file.mime {
                part = part.mime_str(mime)?;
            }
            form = form.part("file", part);
        }

        Ok(form)
    }
}

#[async_trait]
impl TranslationApi for HttpTranslationApi {
    async fn submit(
        &self,
        payload: SubmissionPayload,
    ) -> Result<TranslationResponse, TranslateError> {
        let api_url = self.api_url.as_deref().ok_or(TranslateError::MissingEndpoint)?;
        let form = Self::build_form(payload)?;

        let response = self.client.post(api_url).multipart(form).send().await?;

        if response.status() == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body = response.bytes().await?;
        let parsed: TranslationResponse = serde_json::from_slice(&body)?;
        tracing::debug!("Translation API returned {} rows", parsed.data.len());
        Ok(parsed)
    }
}
