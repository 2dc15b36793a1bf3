//! Handler to scene layer assignments and the layer name table.

use crate::constants::{DEFAULT_LAYER_NAME, MAX_LAYER_ID};
use crate::models::HandlerKind;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The scene layer that objects of a handler kind are placed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerLayer {
    /// Handler kind
    pub handler: HandlerKind,
    /// Engine layer id (0-31)
    pub layer: i32,
}

impl HandlerLayer {
    /// Creates a new assignment.
    #[must_use]
    pub const fn new(handler: HandlerKind, layer: i32) -> Self {
        Self { handler, layer }
    }
}

/// Mapping of engine layer names to layer ids.
///
/// Starts from the engine's built-in layers; the config file may add or
/// override names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerNames {
    names: BTreeMap<String, i32>,
}

impl LayerNames {
    /// Built-in engine layers.
    #[must_use]
    pub fn builtin() -> Self {
        let names = [
            (DEFAULT_LAYER_NAME, 0),
            ("TransparentFX", 1),
            ("Ignore Raycast", 2),
            ("Water", 4),
            ("UI", 5),
        ]
        .into_iter()
        .map(|(name, id)| (name.to_string(), id))
        .collect();

        Self { names }
    }

    /// Built-in layers merged with user-defined ones.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is empty or an id is outside 0-31.
    pub fn with_custom(custom: &BTreeMap<String, i32>) -> Result<Self> {
        let mut layers = Self::builtin();
        for (name, id) in custom {
            layers.insert(name, *id)?;
        }
        Ok(layers)
    }

    /// Adds or overrides a named layer.
    pub fn insert(&mut self, name: &str, id: i32) -> Result<()> {
        if name.trim().is_empty() {
            anyhow::bail!("Layer name cannot be empty");
        }
        validate_layer_id(id)?;
        self.names.insert(name.to_string(), id);
        Ok(())
    }

    /// Returns the id of a named layer.
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<i32> {
        self.names.get(name).copied()
    }

    /// Returns the first name assigned to an id.
    #[must_use]
    pub fn name_of(&self, id: i32) -> Option<&str> {
        self.names
            .iter()
            .find(|(_, layer)| **layer == id)
            .map(|(name, _)| name.as_str())
    }

    /// Id of the `Default` layer (0 if the config removed it).
    #[must_use]
    pub fn default_layer(&self) -> i32 {
        self.id_of(DEFAULT_LAYER_NAME).unwrap_or(0)
    }

    /// Resolves a layer given either a name or a numeric id.
    pub fn resolve(&self, text: &str) -> Result<i32> {
        if let Some(id) = self.id_of(text) {
            return Ok(id);
        }
        let id: i32 = text
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Unknown layer '{text}'"))?;
        validate_layer_id(id)?;
        Ok(id)
    }

    /// Iterates over (name, id) pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.names.iter().map(|(name, id)| (name.as_str(), *id))
    }
}

impl Default for LayerNames {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Checks that an id is within the engine's layer range.
pub fn validate_layer_id(id: i32) -> Result<()> {
    if !(0..=MAX_LAYER_ID).contains(&id) {
        anyhow::bail!("Layer id {id} is out of range (0-{MAX_LAYER_ID})");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_default_layer() {
        let layers = LayerNames::builtin();
        assert_eq!(layers.default_layer(), 0);
        assert_eq!(layers.id_of("Water"), Some(4));
        assert_eq!(layers.name_of(5), Some("UI"));
    }

    #[test]
    fn test_custom_layers() {
        let mut custom = BTreeMap::new();
        custom.insert("Ground".to_string(), 8);
        let layers = LayerNames::with_custom(&custom).unwrap();
        assert_eq!(layers.id_of("Ground"), Some(8));
        assert_eq!(layers.id_of("Default"), Some(0));
    }

    #[test]
    fn test_custom_layer_out_of_range() {
        let mut custom = BTreeMap::new();
        custom.insert("Far".to_string(), 32);
        assert!(LayerNames::with_custom(&custom).is_err());
    }

    #[test]
    fn test_resolve_by_name_or_number() {
        let layers = LayerNames::builtin();
        assert_eq!(layers.resolve("Water").unwrap(), 4);
        assert_eq!(layers.resolve("9").unwrap(), 9);
        assert!(layers.resolve("Nowhere").is_err());
        assert!(layers.resolve("-1").is_err());
    }
}
