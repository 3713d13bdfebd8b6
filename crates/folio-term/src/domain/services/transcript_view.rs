use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::domain::models::Message;
use crate::domain::models::Role;

const INDENT: &str = "  ";
pub const PENDING_TEXT: &str = "Thinking...";

/// Greedy word wrap measured in terminal columns. Words wider than `width`
/// are split between characters.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines: Vec<String> = vec![];

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = word.width();

            if word_width > width {
                if current_width > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                for c in word.chars() {
                    let char_width = c.width().unwrap_or(0);
                    if current_width + char_width > width && current_width > 0 {
                        lines.push(std::mem::take(&mut current));
                        current_width = 0;
                    }
                    current.push(c);
                    current_width += char_width;
                }
                continue;
            }

            let needed = if current_width == 0 {
                word_width
            } else {
                current_width + 1 + word_width
            };
            if needed > width && current_width > 0 {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if current_width > 0 {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
        }

        lines.push(current);
    }

    return lines;
}

fn header(message: &Message) -> Line<'static> {
    let (label, color) = match message.role {
        Role::User => ("You", Color::Cyan),
        Role::Assistant if message.is_fallback() => ("Assistant", Color::Red),
        Role::Assistant => ("Assistant", Color::Green),
    };

    return Line::from(Span::styled(
        label,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));
}

/// Transcript pre-rendered to lines for the current panel width, so the
/// scroll state can work in line units.
#[derive(Debug, Default, Clone)]
pub struct TranscriptView {
    lines: Vec<Line<'static>>,
}

impl TranscriptView {
    pub fn set_messages(&mut self, messages: &[Message], pending: bool, width: usize) {
        let body_width = width.saturating_sub(INDENT.len()).max(1);
        let mut lines: Vec<Line<'static>> = vec![];

        for (idx, message) in messages.iter().enumerate() {
            if idx > 0 {
                lines.push(Line::default());
            }
            lines.push(header(message));

            let style = if message.is_fallback() {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            for text in wrap_text(&message.display_text(), body_width) {
                lines.push(Line::from(Span::styled(format!("{INDENT}{text}"), style)));
            }
        }

        if pending {
            if !lines.is_empty() {
                lines.push(Line::default());
            }
            lines.push(header(&Message::assistant("")));
            lines.push(Line::from(Span::styled(
                format!("{INDENT}{PENDING_TEXT}"),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )));
        }

        self.lines = lines;
    }

    pub fn len(&self) -> usize {
        return self.lines.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.lines.is_empty();
    }

    pub fn lines(&self) -> &[Line<'static>] {
        return &self.lines;
    }
}
