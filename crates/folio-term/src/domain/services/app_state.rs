use std::path::PathBuf;

use anyhow::Result;
use ratatui::prelude::Rect;
use ratatui::style::Style;
use tokio::sync::mpsc;
use tui_textarea::TextArea;

use super::is_pdf;
use super::ConversationManager;
use super::Scroll;
use super::TranscriptView;
use super::UploadManager;
use crate::domain::models::Action;
use crate::domain::models::BackendBox;
use crate::domain::models::Event;
use crate::domain::models::QuickPrompt;

#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

pub const CHAT_PLACEHOLDER: &str = "Ask about skills, projects...";
pub const FILE_PLACEHOLDER: &str = "Path to a PDF resume, then Enter";
pub const PDF_ONLY_NOTICE: &str = "Only PDF files can be selected.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Chat,
    ResumePicker,
}

pub struct AppStateProps {
    pub backend: BackendBox,
    pub resume_download: String,
}

pub struct AppState<'a> {
    pub api_base_url: String,
    backend: BackendBox,
    pub chat_input: TextArea<'a>,
    pub conversation: ConversationManager,
    pub file_input: TextArea<'a>,
    pub focus: Focus,
    pub last_known_height: usize,
    pub last_known_width: usize,
    pub notice: Option<String>,
    pub resume_download: String,
    pub scroll: Scroll,
    pub transcript_view: TranscriptView,
    pub upload: UploadManager,
}

fn text_input<'a>(placeholder: &str) -> TextArea<'a> {
    let mut textarea = TextArea::default();
    textarea.set_placeholder_text(placeholder);
    textarea.set_cursor_line_style(Style::default());
    return textarea;
}

fn take_text(textarea: &mut TextArea) -> String {
    let text = textarea.lines().join("\n");
    textarea.select_all();
    textarea.cut();
    return text;
}

fn replace_text(textarea: &mut TextArea, text: &str) {
    textarea.select_all();
    textarea.cut();
    textarea.insert_str(text);
}

impl<'a> AppState<'a> {
    pub fn new(props: AppStateProps) -> Result<AppState<'a>> {
        let api_base_url = props.backend.base_url().to_string();

        let app_state = AppState {
            backend: props.backend,
            chat_input: text_input(CHAT_PLACEHOLDER),
            conversation: ConversationManager::new(&api_base_url),
            file_input: text_input(FILE_PLACEHOLDER),
            focus: Focus::default(),
            last_known_height: 0,
            last_known_width: 0,
            notice: None,
            resume_download: props.resume_download,
            scroll: Scroll::default(),
            transcript_view: TranscriptView::default(),
            upload: UploadManager::default(),
            api_base_url,
        };

        Ok(app_state)
    }

    /// Probes the backend and raises a notice when it is down. Run after the
    /// first draw, the probe can take a few seconds.
    pub async fn check_backend(&mut self) {
        if let Err(err) = self.backend.health_check().await {
            tracing::warn!(category = err.category(), error = %err, "backend health check failed");
            self.notice = Some(format!(
                "Backend at {} isn't responding yet. Questions and uploads will fail until it's running.",
                self.api_base_url
            ));
        }
    }

    /// Returns true when the UI loop should exit.
    pub fn handle_event(&mut self, event: Event, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        match event {
            Event::ChatAnswered(outcome) => {
                self.conversation.resolve(outcome);
                self.sync_dependants();
                self.scroll.last();
            }
            Event::ResumeUploaded(outcome) => {
                self.upload.resolve(outcome);
            }
            Event::KeyboardCTRLC => {
                return Ok(true);
            }
            Event::KeyboardEnter => match self.focus {
                Focus::Chat => {
                    let question = self.chat_input.lines().join("\n");
                    self.submit_question(&question, tx)?;
                }
                Focus::ResumePicker => {
                    let path = self.file_input.lines().join("\n");
                    self.select_resume(&path, tx)?;
                }
            },
            Event::KeyboardTab => {
                self.focus = match self.focus {
                    Focus::Chat => Focus::ResumePicker,
                    Focus::ResumePicker => Focus::Chat,
                };
            }
            Event::KeyboardQuickPrompt(prompt) => {
                self.use_quick_prompt(prompt);
            }
            Event::KeyboardPaste(text) => {
                self.focused_input().insert_str(text.replace(['\r', '\n'], " "));
            }
            Event::KeyboardCharInput(input) => {
                self.focused_input().input(input);
            }
            Event::UIScrollDown => {
                self.scroll.down();
            }
            Event::UIScrollUp => {
                self.scroll.up();
            }
            Event::UIScrollPageDown => {
                self.scroll.down_page();
            }
            Event::UIScrollPageUp => {
                self.scroll.up_page();
            }
            Event::UITick => {}
        }

        Ok(false)
    }

    fn focused_input(&mut self) -> &mut TextArea<'a> {
        return match self.focus {
            Focus::Chat => &mut self.chat_input,
            Focus::ResumePicker => &mut self.file_input,
        };
    }

    pub fn use_quick_prompt(&mut self, prompt: QuickPrompt) {
        self.focus = Focus::Chat;
        replace_text(&mut self.chat_input, &prompt.question());
    }

    pub fn submit_question(
        &mut self,
        question: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        let Some(question) = self.conversation.submit(question) else {
            return Ok(());
        };

        take_text(&mut self.chat_input);
        self.sync_dependants();
        self.scroll.last();
        tx.send(Action::AskQuestion(question))?;

        Ok(())
    }

    pub fn select_resume(&mut self, path: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let path = path.trim();
        if path.is_empty() || self.upload.is_uploading() {
            return Ok(());
        }

        let path = PathBuf::from(path);
        if !is_pdf(&path) {
            self.notice = Some(PDF_ONLY_NOTICE.to_string());
            return Ok(());
        }

        if let Some(path) = self.upload.select(&path) {
            if self.notice.as_deref() == Some(PDF_ONLY_NOTICE) {
                self.notice = None;
            }
            take_text(&mut self.file_input);
            tx.send(Action::UploadResume(path))?;
        }

        Ok(())
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width.into();
        self.last_known_height = rect.height.into();
        self.sync_dependants();
    }

    fn sync_dependants(&mut self) {
        self.transcript_view.set_messages(
            self.conversation.messages(),
            self.conversation.is_pending(),
            self.last_known_width,
        );

        let scrollbar_at_bottom = self.scroll.is_position_at_last();
        self.scroll
            .set_state(self.transcript_view.len(), self.last_known_height);

        if self.conversation.is_pending() && scrollbar_at_bottom {
            self.scroll.last();
        }
    }
}
