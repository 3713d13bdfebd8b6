use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use super::upload::send_resume;
use crate::domain::models::Action;
use crate::domain::models::BackendBox;
use crate::domain::models::ClientError;
use crate::domain::models::Event;

/// Reports exactly one completion event per request. If the worker ends
/// without reporting, dropping the guard reports `Interrupted` so the
/// pending gate in the UI is always released.
struct Completion<T> {
    event_tx: mpsc::UnboundedSender<Event>,
    to_event: fn(Result<T, ClientError>) -> Event,
    reported: bool,
}

impl<T> Completion<T> {
    fn new(
        event_tx: mpsc::UnboundedSender<Event>,
        to_event: fn(Result<T, ClientError>) -> Event,
    ) -> Completion<T> {
        return Completion {
            event_tx,
            to_event,
            reported: false,
        };
    }

    fn report(mut self, outcome: Result<T, ClientError>) -> Result<()> {
        self.reported = true;
        self.event_tx.send((self.to_event)(outcome))?;
        Ok(())
    }
}

impl<T> Drop for Completion<T> {
    fn drop(&mut self) {
        if !self.reported {
            tracing::error!("request worker ended without reporting a result");
            let _ = self
                .event_tx
                .send((self.to_event)(Err(ClientError::Interrupted)));
        }
    }
}

async fn ask_question(
    backend: &BackendBox,
    question: String,
    completion: Completion<String>,
) -> Result<()> {
    tracing::info!(chars = question.len(), "asking question");
    let outcome = backend.ask(&question).await;
    completion.report(outcome)
}

async fn upload_resume(
    backend: &BackendBox,
    path: PathBuf,
    completion: Completion<()>,
) -> Result<()> {
    tracing::info!(path = %path.display(), "uploading resume");
    let outcome = send_resume(&**backend, &path).await;
    completion.report(outcome)
}

pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        backend: BackendBox,
        event_tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let backend_arc = Arc::new(backend);

        while let Some(action) = rx.recv().await {
            let backend_worker = backend_arc.clone();
            match action {
                Action::AskQuestion(question) => {
                    let completion = Completion::new(event_tx.clone(), Event::ChatAnswered);
                    tokio::spawn(async move {
                        ask_question(&backend_worker, question, completion).await
                    });
                }
                Action::UploadResume(path) => {
                    let completion = Completion::new(event_tx.clone(), Event::ResumeUploaded);
                    tokio::spawn(async move {
                        upload_resume(&backend_worker, path, completion).await
                    });
                }
            }
        }

        Ok(())
    }
}
