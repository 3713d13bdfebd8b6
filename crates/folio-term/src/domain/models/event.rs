use folio_client::ClientError;
use tui_textarea::Input;

use super::QuickPrompt;

#[derive(Debug)]
pub enum Event {
    ChatAnswered(Result<String, ClientError>),
    ResumeUploaded(Result<(), ClientError>),
    KeyboardCharInput(Input),
    KeyboardCTRLC,
    KeyboardEnter,
    KeyboardPaste(String),
    KeyboardQuickPrompt(QuickPrompt),
    KeyboardTab,
    UITick,
    UIScrollDown,
    UIScrollUp,
    UIScrollPageDown,
    UIScrollPageUp,
}
