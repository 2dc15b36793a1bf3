//! User decision boundary.
//!
//! Validation and registry edits ask the user how to recover from bad input.
//! Those questions go through [`DecisionProvider`] so the logic can run
//! against a real terminal or against scripted answers.

pub mod scripted;
pub mod terminal;

pub use scripted::ScriptedDecider;
pub use terminal::TerminalDecider;

use crate::models::KeywordEntry;
use anyhow::Result;

/// A question with two or three labeled options.
///
/// Option 0 is always the first label. Callers interpret the returned index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Short title (e.g. "Error: Scene File Path is Empty")
    pub title: String,
    /// Full explanation shown to the user
    pub message: String,
    /// Option labels in display order
    pub options: Vec<String>,
}

impl Prompt {
    /// Creates a yes/no style prompt. Option 0 is `accept`, option 1 is `decline`.
    pub fn confirm(
        title: impl Into<String>,
        message: impl Into<String>,
        accept: impl Into<String>,
        decline: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            options: vec![accept.into(), decline.into()],
        }
    }

    /// Creates a three-way choice prompt.
    pub fn choice(
        title: impl Into<String>,
        message: impl Into<String>,
        options: [&str; 3],
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            options: options.iter().map(|o| (*o).to_string()).collect(),
        }
    }
}

/// Source of user decisions.
pub trait DecisionProvider {
    /// Asks the user to pick one of the prompt's options and returns its index.
    ///
    /// # Errors
    ///
    /// Returns an error if no answer could be obtained (e.g. terminal I/O).
    fn choose(&mut self, prompt: &Prompt) -> Result<usize>;

    /// Shows an informational message that only needs acknowledging.
    fn notify(&mut self, title: &str, message: &str) -> Result<()>;

    /// Called after every successful change to the keyword list.
    fn keywords_changed(&mut self, _entries: &[KeywordEntry]) {}

    /// Asks a confirm prompt; true when option 0 was chosen.
    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        Ok(self.choose(prompt)? == 0)
    }
}

impl<T: DecisionProvider + ?Sized> DecisionProvider for &mut T {
    fn choose(&mut self, prompt: &Prompt) -> Result<usize> {
        (**self).choose(prompt)
    }

    fn notify(&mut self, title: &str, message: &str) -> Result<()> {
        (**self).notify(title, message)
    }

    fn keywords_changed(&mut self, entries: &[KeywordEntry]) {
        (**self).keywords_changed(entries);
    }
}

impl<T: DecisionProvider + ?Sized> DecisionProvider for Box<T> {
    fn choose(&mut self, prompt: &Prompt) -> Result<usize> {
        (**self).choose(prompt)
    }

    fn notify(&mut self, title: &str, message: &str) -> Result<()> {
        (**self).notify(title, message)
    }

    fn keywords_changed(&mut self, entries: &[KeywordEntry]) {
        (**self).keywords_changed(entries);
    }
}
