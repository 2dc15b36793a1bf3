//! Decision provider that replays pre-recorded answers.

use super::{DecisionProvider, Prompt};
use crate::models::KeywordEntry;
use anyhow::Result;
use std::collections::VecDeque;

/// Answers prompts from a fixed list, in order, and records what was asked.
///
/// Used by tests and by the CLI's `--answers` flag for unattended runs.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecider {
    answers: VecDeque<usize>,
    /// Prompts that were answered, in order
    pub asked: Vec<Prompt>,
    /// Notifications as (title, message)
    pub notices: Vec<(String, String)>,
    /// Number of keyword list refreshes
    pub refreshes: usize,
}

impl ScriptedDecider {
    /// Creates a decider that will give the listed answers.
    pub fn new(answers: impl IntoIterator<Item = usize>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Creates a decider with no answers. Any prompt is an error.
    #[must_use]
    pub fn silent() -> Self {
        Self::default()
    }

    /// Answers that were never used.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    /// Titles of the prompts asked so far.
    #[must_use]
    pub fn asked_titles(&self) -> Vec<&str> {
        self.asked.iter().map(|p| p.title.as_str()).collect()
    }
}

impl DecisionProvider for ScriptedDecider {
    fn choose(&mut self, prompt: &Prompt) -> Result<usize> {
        let answer = self
            .answers
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No scripted answer left for prompt '{}'", prompt.title))?;
        tracing::debug!(title = %prompt.title, answer, "scripted answer");
        self.asked.push(prompt.clone());
        Ok(answer)
    }

    fn notify(&mut self, title: &str, message: &str) -> Result<()> {
        self.notices.push((title.to_string(), message.to_string()));
        Ok(())
    }

    fn keywords_changed(&mut self, _entries: &[KeywordEntry]) {
        self.refreshes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers_in_order() {
        let mut decider = ScriptedDecider::new([1, 0]);
        let prompt = Prompt::confirm("Q", "?", "Yes", "No");
        assert_eq!(decider.choose(&prompt).unwrap(), 1);
        assert!(decider.confirm(&prompt).unwrap());
        assert_eq!(decider.remaining(), 0);
        assert_eq!(decider.asked_titles(), vec!["Q", "Q"]);
    }

    #[test]
    fn test_exhausted_is_error() {
        let mut decider = ScriptedDecider::silent();
        let prompt = Prompt::confirm("Q", "?", "Yes", "No");
        let err = decider.choose(&prompt).unwrap_err();
        assert!(err.to_string().contains("'Q'"));
    }
}
