//! Application-wide constants.
//!
//! This module defines the application name and the engine defaults that the
//! importer relies on when the configuration does not override them.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "KeyScene Importer";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "keyscene";

/// Directory name used under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "keyscene";

/// Environment variable that overrides the config directory (used by tests).
pub const CONFIG_DIR_ENV: &str = "KEYSCENE_CONFIG_DIR";

/// Path segment that marks the root of importable project assets.
pub const DEFAULT_ROOT_MARKER: &str = "Assets";

/// Name of the layer that new handler layer entries are placed on.
pub const DEFAULT_LAYER_NAME: &str = "Default";

/// Highest layer id the engine supports (32 layers, 0-based).
pub const MAX_LAYER_ID: i32 = 31;
