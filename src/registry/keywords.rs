//! Ordered keyword list with positional insert and remove.

use crate::models::{HandlerKind, KeywordEntry};
use crate::prompt::{DecisionProvider, Prompt};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Result of a positional edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryOutcome {
    /// A default entry was inserted at this index
    Added(usize),
    /// The entry at this index was removed
    Removed {
        /// Index the entry had
        index: usize,
        /// The removed entry
        entry: KeywordEntry,
    },
    /// The user declined the out-of-range fallback; nothing changed
    Declined,
    /// The list was empty; nothing to remove
    Empty,
}

/// Ordered list of keyword to handler mappings.
///
/// Keywords are not required to be unique; lookups return the first match.
/// Positions are signed so that out-of-range requests from the user
/// interface (including negative ones) can be offered a fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordRegistry {
    entries: Vec<KeywordEntry>,
}

impl KeywordRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries in order.
    #[must_use]
    pub fn entries(&self) -> &[KeywordEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends an entry without prompting.
    pub fn push(&mut self, entry: KeywordEntry) {
        self.entries.push(entry);
    }

    /// Inserts a default entry at `index`.
    ///
    /// `index == len` (or an empty list) appends. A negative index offers to
    /// insert at the front instead; an index past the end offers to append.
    /// Declining either offer leaves the list untouched.
    pub fn add_keyword(
        &mut self,
        index: i64,
        provider: &mut dyn DecisionProvider,
    ) -> Result<RegistryOutcome> {
        let len = self.entries.len() as i64;

        let target = if self.entries.is_empty() || index == len {
            self.entries.len()
        } else if index < 0 {
            let prompt = Prompt::confirm(
                "Error: Index Out of Range (Small)",
                "Provided index is too small! Would you like to add a keyword at the first index?",
                "Add Keyword",
                "Do Not Add Keyword",
            );
            if !provider.confirm(&prompt)? {
                return Ok(RegistryOutcome::Declined);
            }
            0
        } else if index > len {
            let prompt = Prompt::confirm(
                "Error: Index Out of Range (Large)",
                "Provided index is too large! Would you like to add a keyword at the last index?",
                "Add Keyword",
                "Do Not Add Keyword",
            );
            if !provider.confirm(&prompt)? {
                return Ok(RegistryOutcome::Declined);
            }
            self.entries.len()
        } else {
            #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
            let position = index as usize;
            position
        };

        self.entries.push(KeywordEntry::default());
        self.bubble_last_to(target);

        tracing::debug!(index, target, "keyword added");
        provider.keywords_changed(&self.entries);
        Ok(RegistryOutcome::Added(target))
    }

    /// Removes the entry at `index`.
    ///
    /// An index past the end offers to remove the last entry; a negative index
    /// offers to remove the first one.
    pub fn remove_keyword(
        &mut self,
        index: i64,
        provider: &mut dyn DecisionProvider,
    ) -> Result<RegistryOutcome> {
        if self.entries.is_empty() {
            provider.notify(
                "Error: No List",
                "There are no entries in the list! Cannot remove anything!",
            )?;
            return Ok(RegistryOutcome::Empty);
        }

        let len = self.entries.len() as i64;
        let target = if index >= len {
            let prompt = Prompt::confirm(
                "Error: Index Out of Range (Large)",
                "Provided index is too large! Would you like to remove the keyword at the last index?",
                "Remove Keyword",
                "Do Not Remove Keyword",
            );
            if !provider.confirm(&prompt)? {
                return Ok(RegistryOutcome::Declined);
            }
            self.entries.len() - 1
        } else if index < 0 {
            let prompt = Prompt::confirm(
                "Error: Index Out of Range (Small)",
                "Provided index is too small! Would you like to remove the keyword at the first index?",
                "Remove Keyword",
                "Do Not Remove Keyword",
            );
            if !provider.confirm(&prompt)? {
                return Ok(RegistryOutcome::Declined);
            }
            0
        } else {
            #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
            let position = index as usize;
            position
        };

        let entry = self.entries.remove(target);
        tracing::debug!(index, target, keyword = %entry.keyword, "keyword removed");
        provider.keywords_changed(&self.entries);
        Ok(RegistryOutcome::Removed {
            index: target,
            entry,
        })
    }

    /// Edits the keyword text and/or handler of an existing entry.
    pub fn set_entry(
        &mut self,
        index: usize,
        keyword: Option<&str>,
        handler: Option<HandlerKind>,
    ) -> Result<&KeywordEntry> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or_else(|| anyhow::anyhow!("Keyword index {index} out of range (0-{})", len.saturating_sub(1)))?;

        if let Some(keyword) = keyword {
            entry.keyword = keyword.to_string();
        }
        if let Some(handler) = handler {
            entry.handler = handler;
        }
        Ok(entry)
    }

    /// Returns the handler of the first entry whose keyword equals `keyword`.
    ///
    /// Returns the `NONE` kind when nothing matches.
    #[must_use]
    pub fn find_handler(&self, keyword: &str) -> HandlerKind {
        self.entries
            .iter()
            .find(|entry| entry.keyword == keyword)
            .map(|entry| entry.handler.clone())
            .unwrap_or_default()
    }

    /// Moves the last entry up to `target` by adjacent swaps.
    fn bubble_last_to(&mut self, target: usize) {
        let mut i = self.entries.len() - 1;
        while i > target {
            self.entries.swap(i, i - 1);
            i -= 1;
        }
    }
}

impl From<Vec<KeywordEntry>> for KeywordRegistry {
    fn from(entries: Vec<KeywordEntry>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedDecider;

    fn registry(words: &[&str]) -> KeywordRegistry {
        words
            .iter()
            .map(|w| KeywordEntry::new(*w, HandlerKind::new("GROUND")))
            .collect::<Vec<_>>()
            .into()
    }

    fn words(registry: &KeywordRegistry) -> Vec<&str> {
        registry.entries().iter().map(|e| e.keyword.as_str()).collect()
    }

    #[test]
    fn test_add_at_len_appends() {
        let mut reg = registry(&["a", "b", "c"]);
        let mut decider = ScriptedDecider::silent();

        let outcome = reg.add_keyword(3, &mut decider).unwrap();

        assert_eq!(outcome, RegistryOutcome::Added(3));
        assert_eq!(reg.len(), 4);
        assert_eq!(reg.entries()[3], KeywordEntry::default());
        assert_eq!(decider.refreshes, 1);
    }

    #[test]
    fn test_add_to_empty_list_ignores_index() {
        let mut reg = KeywordRegistry::new();
        let mut decider = ScriptedDecider::silent();

        assert_eq!(reg.add_keyword(-5, &mut decider).unwrap(), RegistryOutcome::Added(0));
        assert_eq!(reg.len(), 1);
        assert!(decider.asked.is_empty());
    }

    #[test]
    fn test_add_interior_index() {
        let mut reg = registry(&["a", "b", "c"]);
        let mut decider = ScriptedDecider::silent();

        reg.add_keyword(1, &mut decider).unwrap();
        assert_eq!(words(&reg), vec!["a", "", "b", "c"]);

        reg.add_keyword(3, &mut decider).unwrap();
        assert_eq!(words(&reg), vec!["a", "", "b", "", "c"]);
    }

    #[test]
    fn test_add_negative_confirmed_goes_first() {
        let mut reg = registry(&["a", "b"]);
        let mut decider = ScriptedDecider::new([0]);

        assert_eq!(reg.add_keyword(-1, &mut decider).unwrap(), RegistryOutcome::Added(0));
        assert_eq!(words(&reg), vec!["", "a", "b"]);
        assert_eq!(decider.asked_titles(), vec!["Error: Index Out of Range (Small)"]);
    }

    #[test]
    fn test_add_negative_declined_is_noop() {
        let mut reg = registry(&["a", "b"]);
        let mut decider = ScriptedDecider::new([1]);

        assert_eq!(reg.add_keyword(-1, &mut decider).unwrap(), RegistryOutcome::Declined);
        assert_eq!(words(&reg), vec!["a", "b"]);
        assert_eq!(decider.refreshes, 0);
    }

    #[test]
    fn test_add_too_large_confirmed_appends() {
        let mut reg = registry(&["a", "b"]);
        let mut decider = ScriptedDecider::new([0]);

        assert_eq!(reg.add_keyword(9, &mut decider).unwrap(), RegistryOutcome::Added(2));
        assert_eq!(words(&reg), vec!["a", "b", ""]);
    }

    #[test]
    fn test_add_too_large_declined() {
        let mut reg = registry(&["a"]);
        let mut decider = ScriptedDecider::new([1]);

        assert_eq!(reg.add_keyword(5, &mut decider).unwrap(), RegistryOutcome::Declined);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_remove_empty_reports() {
        let mut reg = KeywordRegistry::new();
        let mut decider = ScriptedDecider::silent();

        assert_eq!(reg.remove_keyword(0, &mut decider).unwrap(), RegistryOutcome::Empty);
        assert!(reg.is_empty());
        assert_eq!(decider.notices.len(), 1);
        assert_eq!(decider.notices[0].0, "Error: No List");
    }

    #[test]
    fn test_remove_in_range() {
        let mut reg = registry(&["a", "b", "c"]);
        let mut decider = ScriptedDecider::silent();

        let outcome = reg.remove_keyword(1, &mut decider).unwrap();
        assert!(matches!(outcome, RegistryOutcome::Removed { index: 1, ref entry } if entry.keyword == "b"));
        assert_eq!(words(&reg), vec!["a", "c"]);
        assert_eq!(decider.refreshes, 1);
    }

    #[test]
    fn test_remove_out_of_range_fallbacks() {
        let mut reg = registry(&["a", "b", "c"]);
        let mut decider = ScriptedDecider::new([0, 0]);

        reg.remove_keyword(3, &mut decider).unwrap();
        assert_eq!(words(&reg), vec!["a", "b"]);

        reg.remove_keyword(-2, &mut decider).unwrap();
        assert_eq!(words(&reg), vec!["b"]);
    }

    #[test]
    fn test_remove_declined_is_noop() {
        let mut reg = registry(&["a", "b"]);
        let mut decider = ScriptedDecider::new([1, 1]);

        assert_eq!(reg.remove_keyword(7, &mut decider).unwrap(), RegistryOutcome::Declined);
        assert_eq!(reg.remove_keyword(-1, &mut decider).unwrap(), RegistryOutcome::Declined);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_find_handler_first_match_wins() {
        let reg: KeywordRegistry = vec![
            KeywordEntry::new("rock", HandlerKind::new("SCENERY")),
            KeywordEntry::new("rock", HandlerKind::new("GROUND")),
        ]
        .into();

        assert_eq!(reg.find_handler("rock"), HandlerKind::new("SCENERY"));
        assert!(reg.find_handler("Rock").is_none());
        assert!(reg.find_handler("tree").is_none());
    }

    #[test]
    fn test_set_entry() {
        let mut reg = registry(&["a"]);
        reg.set_entry(0, Some("ledge"), Some(HandlerKind::new("PLATFORM")))
            .unwrap();
        assert_eq!(reg.entries()[0].keyword, "ledge");
        assert_eq!(reg.entries()[0].handler, HandlerKind::new("PLATFORM"));

        assert!(reg.set_entry(4, Some("x"), None).is_err());
    }
}
