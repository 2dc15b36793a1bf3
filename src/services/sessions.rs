//! Session file I/O service.
//!
//! Sessions are stored as TOML. Writes go through a temp file + rename so a
//! crash never leaves a half-written session behind.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::models::{HandlerCatalog, ImportSession, LayerNames};

/// Service for loading and saving session files.
pub struct SessionService;

impl SessionService {
    /// Loads a session from a TOML file.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use keyscene::services::SessionService;
    ///
    /// let session = SessionService::load(Path::new("level1.toml"))?;
    /// println!("{} keywords", session.keywords.len());
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(path: &Path) -> Result<ImportSession> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse session file {}", path.display()))
    }

    /// Saves a session, refreshing its modification time.
    pub fn save(session: &mut ImportSession, path: &Path) -> Result<()> {
        session.metadata.touch();

        let content =
            toml::to_string_pretty(session).context("Failed to serialize session")?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create session directory {}", parent.display())
            })?;
        }

        let temp_path = path.with_extension("toml.tmp");
        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temp session file {}", temp_path.display())
        })?;

        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to save session to {}", path.display()))?;

        tracing::debug!(path = %path.display(), "session saved");
        Ok(())
    }

    /// Creates a new session with a layer entry for every handler kind.
    #[must_use]
    pub fn create(name: &str, catalog: &HandlerCatalog, layers: &LayerNames) -> ImportSession {
        let mut session = ImportSession::new(name);
        session.layers.rebuild(catalog, layers);
        session
    }
}
