use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ClientError;

pub const RESUME_CONTENT_TYPE: &str = "application/pdf";

/// Body of `POST /chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

impl ChatRequest {
    pub fn new(question: &str) -> Self {
        Self {
            question: question.to_string(),
        }
    }
}

/// Successful reply of `POST /chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
}

/// Error envelope returned by the backend on rejected requests
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Best-effort extraction of the `detail` field as text.
    pub fn parse(body: &str) -> Option<String> {
        let parsed = serde_json::from_str::<ErrorBody>(body).ok()?;
        match parsed.detail? {
            serde_json::Value::String(text) => Some(text),
            other => Some(other.to_string()),
        }
    }
}

/// A resume file ready to be sent to the ingestion service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ResumeUpload {
    pub fn new(file_name: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            content_type: RESUME_CONTENT_TYPE.to_string(),
            bytes,
        }
    }

    /// Read a resume from disk, naming the part after the file.
    pub async fn from_path(path: &Path) -> Result<Self, ClientError> {
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(&display_name(path), bytes))
    }
}

/// File name shown to the user for a selected path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
