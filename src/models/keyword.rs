//! Keyword to handler mapping entries.

use crate::models::HandlerKind;
use serde::{Deserialize, Serialize};

/// One keyword and the handler applied to assets whose name matches it.
///
/// A freshly added entry has an empty keyword and the `NONE` handler; the
/// validator rejects empty keywords before an import runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    /// Text matched against imported asset names
    #[serde(default)]
    pub keyword: String,
    /// Handler applied on a match
    #[serde(default)]
    pub handler: HandlerKind,
}

impl KeywordEntry {
    /// Creates a new entry.
    pub fn new(keyword: impl Into<String>, handler: HandlerKind) -> Self {
        Self {
            keyword: keyword.into(),
            handler,
        }
    }

    /// Returns true if the keyword text is empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.keyword.is_empty()
    }
}
