#[cfg(test)]
#[path = "http_client_test.rs"]
mod tests;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, Url};

use crate::{ChatRequest, ChatResponse, ClientError, ErrorBody, PortfolioBackend, ResumeUpload};

/// Questions and uploads wait on the backend indefinitely, only the start-up
/// probe gives up early.
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(3);

/// HTTP client for a remote portfolio backend
pub struct HttpBackendClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackendClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed =
            Url::parse(trimmed).map_err(|_| ClientError::InvalidBaseUrl(base_url.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self {
            base_url: trimmed.to_string(),
            client: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = ErrorBody::parse(&body);
    tracing::warn!(status = status.as_u16(), detail = ?detail, "backend rejected request");

    Err(ClientError::Status {
        status: status.as_u16(),
        detail,
    })
}

#[async_trait]
impl PortfolioBackend for HttpBackendClient {
    async fn ask(&self, question: &str) -> Result<String, ClientError> {
        let chat_url = self.endpoint("/chat");
        tracing::debug!(url = %chat_url, "sending question");

        let response = self
            .client
            .post(&chat_url)
            .json(&ChatRequest::new(question))
            .send()
            .await?;

        let response = ensure_success(response).await?;
        let body = response.text().await?;
        let parsed = serde_json::from_str::<ChatResponse>(&body)
            .map_err(|err| ClientError::Decode(err.to_string()))?;

        Ok(parsed.answer)
    }

    async fn upload_resume(&self, upload: ResumeUpload) -> Result<(), ClientError> {
        let upload_url = self.endpoint("/upload-resume");
        tracing::debug!(
            url = %upload_url,
            file_name = %upload.file_name,
            bytes = upload.bytes.len(),
            "uploading resume"
        );

        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&upload_url)
            .multipart(form)
            .send()
            .await?;

        // Body is an acknowledgement only, the status is all that matters.
        ensure_success(response).await?;

        Ok(())
    }

    async fn health_check(&self) -> Result<(), ClientError> {
        let health_url = self.endpoint("/");
        let response = self
            .client
            .get(&health_url)
            .timeout(HEALTH_CHECK_TIMEOUT)
            .send()
            .await?;

        ensure_success(response).await?;

        Ok(())
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
