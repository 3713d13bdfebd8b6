use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AskQuestion(String),
    UploadResume(PathBuf),
}
