pub const UPLOAD_SUCCESS_TEXT: &str = "Resume uploaded successfully!";
pub const UPLOAD_FAILURE_TEXT: &str = "Upload failed. Is the backend running?";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Succeeded,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct UploadState {
    pub selected_file_name: Option<String>,
    pub status: UploadStatus,
}

impl UploadState {
    pub fn is_uploading(&self) -> bool {
        self.status == UploadStatus::Uploading
    }

    /// Notice shown under the picker once an upload has resolved.
    pub fn status_text(&self) -> Option<&'static str> {
        match self.status {
            UploadStatus::Succeeded => Some(UPLOAD_SUCCESS_TEXT),
            UploadStatus::Failed => Some(UPLOAD_FAILURE_TEXT),
            UploadStatus::Idle | UploadStatus::Uploading => None,
        }
    }
}
