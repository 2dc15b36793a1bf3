//! Import session: everything the user edits between import runs.

use crate::models::ImportConfiguration;
use crate::registry::{KeywordRegistry, LayerTable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Descriptive data about a session file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Session name
    pub name: String,
    /// Creation time
    pub created: DateTime<Utc>,
    /// Last save time
    pub modified: DateTime<Utc>,
}

impl SessionMetadata {
    /// Creates metadata stamped with the current time.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            created: now,
            modified: now,
        }
    }

    /// Updates the modification timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }
}

/// The import settings, keyword list and layer table of one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSession {
    /// Session metadata
    pub metadata: SessionMetadata,
    /// Import settings
    #[serde(default)]
    pub import: ImportConfiguration,
    /// Keyword to handler mappings
    #[serde(default)]
    pub keywords: KeywordRegistry,
    /// Handler to layer assignments
    #[serde(default)]
    pub layers: LayerTable,
}

impl ImportSession {
    /// Creates an empty session.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            metadata: SessionMetadata::new(name),
            import: ImportConfiguration::default(),
            keywords: KeywordRegistry::new(),
            layers: LayerTable::new(),
        }
    }
}
