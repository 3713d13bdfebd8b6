use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// Canned questions offered next to the chat input, bound to F1..F4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum QuickPrompt {
    #[strum(serialize = "What are your strongest skills?")]
    StrongestSkills,
    #[strum(serialize = "What projects have you built?")]
    Projects,
    #[strum(serialize = "What tech stack do you use?")]
    TechStack,
    #[strum(serialize = "Summarize your experience")]
    Experience,
}

impl QuickPrompt {
    /// Prompt bound to function key `F{n}`.
    pub fn from_function_key(n: u8) -> Option<QuickPrompt> {
        if n == 0 {
            return None;
        }
        QuickPrompt::iter().nth(usize::from(n - 1))
    }

    pub fn question(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_maps_function_keys_to_prompts() {
        assert_eq!(QuickPrompt::from_function_key(0), None);
        assert_eq!(
            QuickPrompt::from_function_key(1),
            Some(QuickPrompt::StrongestSkills)
        );
        assert_eq!(
            QuickPrompt::from_function_key(4),
            Some(QuickPrompt::Experience)
        );
        assert_eq!(QuickPrompt::from_function_key(5), None);
    }

    #[test]
    fn it_renders_the_question_text() {
        assert_eq!(
            QuickPrompt::TechStack.question(),
            "What tech stack do you use?"
        );
    }
}
