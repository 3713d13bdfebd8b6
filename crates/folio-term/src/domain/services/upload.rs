#[cfg(test)]
#[path = "upload_test.rs"]
mod tests;

use std::path::Path;
use std::path::PathBuf;

use folio_client::display_name;
use folio_client::ResumeUpload;

use crate::domain::models::ClientError;
use crate::domain::models::PortfolioBackend;
use crate::domain::models::UploadState;
use crate::domain::models::UploadStatus;

/// File picker filter, only PDF resumes can be selected.
pub fn is_pdf(path: &Path) -> bool {
    return path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
}

#[derive(Debug, Clone, Default)]
pub struct UploadManager {
    state: UploadState,
}

impl UploadManager {
    pub fn state(&self) -> &UploadState {
        return &self.state;
    }

    pub fn is_uploading(&self) -> bool {
        return self.state.is_uploading();
    }

    /// Records a newly selected file and returns the path to upload. Each
    /// selection replaces the previous one; nothing is queued while an
    /// upload is in flight.
    pub fn select(&mut self, path: &Path) -> Option<PathBuf> {
        if self.is_uploading() {
            return None;
        }

        self.state = UploadState {
            selected_file_name: Some(display_name(path)),
            status: UploadStatus::Uploading,
        };

        return Some(path.to_path_buf());
    }

    pub fn resolve(&mut self, outcome: Result<(), ClientError>) {
        if !self.is_uploading() {
            tracing::warn!("received an upload result with no upload in flight");
            return;
        }

        self.state.status = match outcome {
            Ok(()) => UploadStatus::Succeeded,
            Err(err) => {
                tracing::warn!(category = err.category(), error = %err, "resume upload failed");
                UploadStatus::Failed
            }
        };
    }

    /// Runs a whole upload against the backend.
    pub async fn upload(&mut self, backend: &dyn PortfolioBackend, path: &Path) -> &UploadState {
        if let Some(path) = self.select(path) {
            let outcome = send_resume(backend, &path).await;
            self.resolve(outcome);
        }

        return &self.state;
    }
}

/// Reads the file and hands it to the ingestion service.
pub async fn send_resume(backend: &dyn PortfolioBackend, path: &Path) -> Result<(), ClientError> {
    let upload = ResumeUpload::from_path(path).await?;
    return backend.upload_resume(upload).await;
}
