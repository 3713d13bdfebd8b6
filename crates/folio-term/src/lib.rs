//! Terminal client for a personal portfolio backend.
//!
//! Questions typed into the chat panel are proxied to the backend's `/chat`
//! endpoint and rendered as a transcript. A resume PDF can be uploaded to
//! `/upload-resume` from the side panel. Both features are also available as
//! one-shot subcommands.

pub mod application;
pub mod configuration;
pub mod domain;
pub mod infrastructure;
pub use application::ui::{destruct_terminal_for_panic, start_loop};
pub use configuration::{Config, ConfigKey};
pub use domain::models::{Action, Event, Message, QuickPrompt, Role, UploadState, UploadStatus};
pub use domain::services::{AppState, AppStateProps, ConversationManager, UploadManager};
