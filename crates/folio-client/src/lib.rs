//! Client SDK for the portfolio backend.
//!
//! The backend exposes two collaborators to the portfolio: a question-answer
//! service that replies to a free-form question about the resume, and a file
//! ingestion service that accepts a resume PDF. This crate wraps both behind
//! the `PortfolioBackend` trait so the terminal application can be driven by
//! the HTTP implementation in production and by in-memory doubles in tests.

use async_trait::async_trait;

pub mod error;
pub mod http_client;
pub mod types;

pub use error::ClientError;
pub use types::*;

/// PortfolioBackend trait for talking to the portfolio API
#[async_trait]
pub trait PortfolioBackend: Send + Sync {
    /// Ask a question and receive the answer text
    async fn ask(&self, question: &str) -> Result<String, ClientError>;

    /// Submit a resume file to the ingestion service
    async fn upload_resume(&self, upload: ResumeUpload) -> Result<(), ClientError>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> Result<(), ClientError>;

    /// Base address requests are sent to
    fn base_url(&self) -> &str;
}

pub type BackendBox = Box<dyn PortfolioBackend>;

/// Factory for creating PortfolioBackend instances
pub struct BackendFactory;

impl BackendFactory {
    /// Create an HTTP client for a remote backend
    pub fn create_http_client(base_url: &str) -> Result<BackendBox, ClientError> {
        Ok(Box::new(http_client::HttpBackendClient::new(base_url)?))
    }
}
