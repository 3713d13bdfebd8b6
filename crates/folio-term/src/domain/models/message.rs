#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use super::Role;

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum MessageStatus {
    #[default]
    Delivered,
    /// Assistant message standing in for a failed exchange.
    Fallback,
}

#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub status: MessageStatus,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Message {
        return Message {
            role,
            content: content.to_string(),
            status: MessageStatus::Delivered,
        };
    }

    pub fn user(content: &str) -> Message {
        return Message::new(Role::User, content);
    }

    pub fn assistant(content: &str) -> Message {
        return Message::new(Role::Assistant, content);
    }

    pub fn fallback(content: &str) -> Message {
        return Message {
            role: Role::Assistant,
            content: content.to_string(),
            status: MessageStatus::Fallback,
        };
    }

    pub fn is_fallback(&self) -> bool {
        return self.status == MessageStatus::Fallback;
    }

    /// Content with tabs expanded, ready for the transcript view.
    pub fn display_text(&self) -> String {
        return self.content.replace('\t', "  ");
    }
}
