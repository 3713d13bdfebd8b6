#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use crate::domain::models::ClientError;
use crate::domain::models::Message;
use crate::domain::models::PortfolioBackend;

pub fn fallback_text(base_url: &str) -> String {
    return format!("Backend not reachable. Please ensure FastAPI is running on {base_url}");
}

/// Ordered transcript of question/answer exchanges with a single in-flight
/// request gate. Messages are only ever appended.
#[derive(Debug, Clone)]
pub struct ConversationManager {
    messages: Vec<Message>,
    pending: bool,
    fallback: String,
}

impl ConversationManager {
    pub fn new(base_url: &str) -> ConversationManager {
        return ConversationManager {
            messages: vec![],
            pending: false,
            fallback: fallback_text(base_url),
        };
    }

    pub fn messages(&self) -> &[Message] {
        return &self.messages;
    }

    pub fn is_pending(&self) -> bool {
        return self.pending;
    }

    pub fn fallback(&self) -> &str {
        return &self.fallback;
    }

    /// Appends the user message and returns the question to dispatch, or
    /// `None` when the question is blank or an exchange is still pending.
    pub fn submit(&mut self, question: &str) -> Option<String> {
        let question = question.trim();
        if question.is_empty() || self.pending {
            return None;
        }

        self.messages.push(Message::user(question));
        self.pending = true;

        return Some(question.to_string());
    }

    /// Applies the outcome of the pending exchange.
    pub fn resolve(&mut self, outcome: Result<String, ClientError>) -> Option<&Message> {
        if !self.pending {
            tracing::warn!("received a chat reply with no pending question");
            return None;
        }

        let message = match outcome {
            Ok(answer) => Message::assistant(&answer),
            Err(err) => {
                tracing::warn!(category = err.category(), error = %err, "chat request failed");
                Message::fallback(&self.fallback)
            }
        };

        self.messages.push(message);
        self.pending = false;

        return self.messages.last();
    }

    /// Runs a whole exchange against the backend.
    pub async fn ask(
        &mut self,
        backend: &dyn PortfolioBackend,
        question: &str,
    ) -> Option<&Message> {
        let question = self.submit(question)?;
        let outcome = backend.ask(&question).await;

        return self.resolve(outcome);
    }
}
