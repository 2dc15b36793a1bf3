//! Import settings entered by the user before an import run.

use serde::{Deserialize, Serialize};

/// Settings for one import run.
///
/// Edited freely by the user, then normalized in place by
/// [`ImportValidator`](crate::validator::ImportValidator).
///
/// # Validation
///
/// After a successful validation pass:
/// - `base_file_path` names an existing directory and ends with a separator
/// - `xml_folder` ends with a separator when `use_folders` is still set
/// - `scene_file_path` and `image_file_path` are non-empty, end with a separator
///   and start at the project root marker when the user input contained it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfiguration {
    /// Directory containing the exported files to import
    pub base_file_path: String,
    /// Whether XML files live in a subfolder of the base path
    pub use_folders: bool,
    /// Subfolder (relative to the base path) holding XML files
    pub xml_folder: String,
    /// Project-relative folder the scene is saved to
    pub scene_file_path: String,
    /// Folder images are saved to
    pub image_file_path: String,
    /// Whether custom scene/image names are used
    pub use_custom_names: bool,
    /// Custom name for the created scene
    pub custom_scene_name: String,
    /// Custom name prefix for imported images
    pub custom_image_name: String,
}

impl ImportConfiguration {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base file path.
    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        self.base_file_path = path.into();
        self
    }

    /// Sets the scene and image destination paths.
    pub fn with_destinations(
        mut self,
        scene_path: impl Into<String>,
        image_path: impl Into<String>,
    ) -> Self {
        self.scene_file_path = scene_path.into();
        self.image_file_path = image_path.into();
        self
    }

    /// Enables XML subfolders.
    pub fn with_xml_folder(mut self, folder: impl Into<String>) -> Self {
        self.use_folders = true;
        self.xml_folder = folder.into();
        self
    }

    /// Enables custom names.
    pub fn with_custom_names(
        mut self,
        scene_name: impl Into<String>,
        image_name: impl Into<String>,
    ) -> Self {
        self.use_custom_names = true;
        self.custom_scene_name = scene_name.into();
        self.custom_image_name = image_name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default() {
        let config: ImportConfiguration = toml::from_str("base_file_path = \"/tmp\"").unwrap();
        assert_eq!(config.base_file_path, "/tmp");
        assert!(!config.use_folders);
        assert!(config.scene_file_path.is_empty());
    }

    #[test]
    fn test_builders() {
        let config = ImportConfiguration::new()
            .with_base_path("/data")
            .with_xml_folder("xml")
            .with_custom_names("Level", "");
        assert!(config.use_folders);
        assert_eq!(config.xml_folder, "xml");
        assert!(config.use_custom_names);
        assert!(config.custom_image_name.is_empty());
    }
}
