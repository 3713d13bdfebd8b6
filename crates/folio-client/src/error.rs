use thiserror::Error;

/// Failures talking to the portfolio backend.
///
/// Callers in the terminal application collapse every variant into one
/// user-facing notice per feature; the variants exist so logs can tell a
/// down backend from a rejected request.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid backend base url '{0}'")]
    InvalidBaseUrl(String),

    #[error("backend not reachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend responded with status {status}{}", format_detail(.detail))]
    Status { status: u16, detail: Option<String> },

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("failed to read resume file: {0}")]
    Io(#[from] std::io::Error),

    #[error("request ended before a response was reported")]
    Interrupted,
}

impl ClientError {
    /// Short label used as a structured logging field.
    pub fn category(&self) -> &'static str {
        match self {
            ClientError::InvalidBaseUrl(_) => "config",
            ClientError::Transport(_) => "transport",
            ClientError::Status { .. } => "status",
            ClientError::Decode(_) => "decode",
            ClientError::Io(_) => "io",
            ClientError::Interrupted => "interrupted",
        }
    }
}

fn format_detail(detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!(": {detail}"),
        None => String::new(),
    }
}
