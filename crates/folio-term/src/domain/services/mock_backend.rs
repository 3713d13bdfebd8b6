use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;

use crate::domain::models::ClientError;
use crate::domain::models::PortfolioBackend;
use folio_client::ResumeUpload;

type AskFn = Box<dyn Fn(&str) -> Result<String, ClientError> + Send + Sync>;
type UploadFn = Box<dyn Fn(&ResumeUpload) -> Result<(), ClientError> + Send + Sync>;

pub struct MockBackend {
    ask_fn: AskFn,
    upload_fn: UploadFn,
    healthy: bool,
    pub asked: AtomicUsize,
    pub uploaded: AtomicUsize,
}

impl MockBackend {
    pub fn answering(answer: &str) -> MockBackend {
        let answer = answer.to_string();
        return MockBackend::with_ask(move |_| Ok(answer.clone()));
    }

    pub fn unreachable() -> MockBackend {
        let mut backend = MockBackend::with_ask(|_| Err(ClientError::Interrupted));
        backend.upload_fn = Box::new(|_| {
            Err(ClientError::Status {
                status: 400,
                detail: Some("Only PDF files are allowed".to_string()),
            })
        });
        backend.healthy = false;
        return backend;
    }

    pub fn with_ask(
        ask_fn: impl Fn(&str) -> Result<String, ClientError> + Send + Sync + 'static,
    ) -> MockBackend {
        return MockBackend {
            ask_fn: Box::new(ask_fn),
            upload_fn: Box::new(|_| Ok(())),
            healthy: true,
            asked: AtomicUsize::new(0),
            uploaded: AtomicUsize::new(0),
        };
    }
}

#[async_trait]
impl PortfolioBackend for MockBackend {
    async fn ask(&self, question: &str) -> Result<String, ClientError> {
        self.asked.fetch_add(1, Ordering::SeqCst);
        (self.ask_fn)(question)
    }

    async fn upload_resume(&self, upload: ResumeUpload) -> Result<(), ClientError> {
        self.uploaded.fetch_add(1, Ordering::SeqCst);
        (self.upload_fn)(&upload)
    }

    async fn health_check(&self) -> Result<(), ClientError> {
        if self.healthy {
            return Ok(());
        }
        Err(ClientError::Interrupted)
    }

    fn base_url(&self) -> &str {
        "http://127.0.0.1:8000"
    }
}
