//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use crate::constants::{CONFIG_DIR_ENV, CONFIG_DIR_NAME, DEFAULT_ROOT_MARKER};
use crate::models::{HandlerCatalog, HandlerDefinition, LayerNames};
use crate::validator::ProjectPaths;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Project layout settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Path segment marking the root of importable assets (e.g. "Assets")
    #[serde(default = "default_root_marker")]
    pub root_marker: String,
    /// Absolute project data directory used when the image path is left empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_root_marker() -> String {
    DEFAULT_ROOT_MARKER.to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root_marker: default_root_marker(),
            data_dir: None,
        }
    }
}

impl ProjectConfig {
    /// Resolves the project data directory.
    ///
    /// Falls back to `<current dir>/<root_marker>` when not configured.
    pub fn resolved_data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        Ok(cwd.join(&self.root_marker))
    }
}

/// Terminal interaction preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Print the keyword list after every interactive change
    #[serde(default = "default_echo_keywords")]
    pub echo_keywords: bool,
}

const fn default_echo_keywords() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            echo_keywords: default_echo_keywords(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/keyscene/config.toml`
/// - macOS: `~/Library/Application Support/keyscene/config.toml`
/// - Windows: `%APPDATA%\keyscene\config.toml`
///
/// The `KEYSCENE_CONFIG_DIR` environment variable overrides the directory.
///
/// # Validation
///
/// - `root_marker` must be a single non-empty path segment
/// - custom layer ids must be within 0-31
/// - custom handler names must be upper-case and not collide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Project layout settings
    #[serde(default)]
    pub project: ProjectConfig,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
    /// Additional or overridden layer names
    #[serde(default)]
    pub layers: BTreeMap<String, i32>,
    /// Custom handler kinds, appended after the built-ins
    #[serde(default)]
    pub handlers: Vec<HandlerDefinition>,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            project: ProjectConfig::default(),
            ui: UiConfig::default(),
            layers: BTreeMap::new(),
            handlers: Vec::new(),
        }
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config = Self::from_toml(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        Ok(config)
    }

    /// Parses and validates configuration text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        let marker = &self.project.root_marker;
        if marker.is_empty() || marker.contains(['/', '\\']) {
            anyhow::bail!(
                "Root marker '{marker}' must be a single path segment (e.g. \"{DEFAULT_ROOT_MARKER}\")"
            );
        }

        self.layer_names()?;
        self.handler_catalog()?;

        Ok(())
    }

    /// Builds the handler catalog: built-ins followed by custom handlers.
    pub fn handler_catalog(&self) -> Result<HandlerCatalog> {
        HandlerCatalog::with_custom(&self.handlers).context("Invalid handler definition")
    }

    /// Builds the layer name table: built-ins merged with custom names.
    pub fn layer_names(&self) -> Result<LayerNames> {
        LayerNames::with_custom(&self.layers).context("Invalid layer definition")
    }

    /// Project values used by the validator.
    pub fn project_paths(&self) -> Result<ProjectPaths> {
        let data_dir = self.project.resolved_data_dir()?;
        Ok(ProjectPaths::new(
            self.project.root_marker.clone(),
            data_dir.to_string_lossy(),
        ))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
