pub mod actions;
pub mod app_state;
pub mod conversation;
pub mod events;
#[cfg(test)]
pub mod mock_backend;
mod scroll;
mod transcript_view;
pub mod upload;

pub use app_state::AppState;
pub use app_state::AppStateProps;
pub use app_state::Focus;
pub use conversation::fallback_text;
pub use conversation::ConversationManager;
pub use scroll::Scroll;
pub use transcript_view::TranscriptView;
pub use upload::is_pdf;
pub use upload::UploadManager;
