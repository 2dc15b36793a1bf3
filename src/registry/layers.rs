//! Handler to layer table.

use crate::models::handler_layer::validate_layer_id;
use crate::models::{HandlerCatalog, HandlerKind, HandlerLayer, LayerNames};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Layer assignment for each handler kind.
///
/// Entries are added by [`rebuild`](Self::rebuild) and only removed by an
/// explicit [`prune`](Self::prune).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerTable {
    entries: Vec<HandlerLayer>,
}

impl LayerTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries in order.
    #[must_use]
    pub fn entries(&self) -> &[HandlerLayer] {
        &self.entries
    }

    /// Adds an entry on the `Default` layer for every declared handler kind
    /// that has none yet, in catalog order.
    ///
    /// Entries for kinds no longer declared are kept. Returns the kinds added.
    pub fn rebuild(&mut self, catalog: &HandlerCatalog, layers: &LayerNames) -> Vec<HandlerKind> {
        let default_layer = layers.default_layer();
        let mut added = Vec::new();

        for kind in catalog.kinds() {
            if self.entries.iter().any(|entry| entry.handler == kind) {
                continue;
            }
            tracing::debug!(handler = %kind, layer = default_layer, "adding handler layer");
            self.entries.push(HandlerLayer::new(kind.clone(), default_layer));
            added.push(kind);
        }

        added
    }

    /// Removes entries for undeclared kinds and repeated entries for the
    /// same kind (the first one is kept). Returns the removed entries.
    pub fn prune(&mut self, catalog: &HandlerCatalog) -> Vec<HandlerLayer> {
        let mut kept: Vec<HandlerLayer> = Vec::with_capacity(self.entries.len());
        let mut removed = Vec::new();

        for entry in self.entries.drain(..) {
            let declared = catalog.contains(&entry.handler);
            let repeated = kept.iter().any(|k| k.handler == entry.handler);
            if declared && !repeated {
                kept.push(entry);
            } else {
                removed.push(entry);
            }
        }

        self.entries = kept;
        removed
    }

    /// Assigns a layer to a handler, adding an entry if it has none.
    pub fn set_layer(&mut self, handler: &HandlerKind, layer: i32) -> Result<()> {
        validate_layer_id(layer)?;
        match self.entries.iter_mut().find(|entry| &entry.handler == handler) {
            Some(entry) => entry.layer = layer,
            None => self.entries.push(HandlerLayer::new(handler.clone(), layer)),
        }
        Ok(())
    }

    /// Layer of the first entry for `handler`.
    #[must_use]
    pub fn layer_for(&self, handler: &HandlerKind) -> Option<i32> {
        self.entries
            .iter()
            .find(|entry| &entry.handler == handler)
            .map(|entry| entry.layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HandlerDefinition;

    #[test]
    fn test_rebuild_adds_every_kind_once() {
        let mut table = LayerTable::new();
        let catalog = HandlerCatalog::builtin();
        let layers = LayerNames::builtin();

        let added = table.rebuild(&catalog, &layers);
        assert_eq!(added.len(), 4);
        assert!(table.entries().iter().all(|e| e.layer == 0));

        let added_again = table.rebuild(&catalog, &layers);
        assert!(added_again.is_empty());
        assert_eq!(table.entries().len(), 4);
    }

    #[test]
    fn test_rebuild_keeps_existing_assignment() {
        let mut table = LayerTable::new();
        table.set_layer(&HandlerKind::new("GROUND"), 8).unwrap();

        table.rebuild(&HandlerCatalog::builtin(), &LayerNames::builtin());

        assert_eq!(table.layer_for(&HandlerKind::new("GROUND")), Some(8));
        assert_eq!(table.entries()[0].handler, HandlerKind::new("GROUND"));
        assert_eq!(table.entries()[1].handler, HandlerKind::none());
    }

    #[test]
    fn test_rebuild_never_removes_stale_entries() {
        let water = HandlerDefinition::new("WATER", "", true).unwrap();
        let extended = HandlerCatalog::with_custom(&[water]).unwrap();
        let mut table = LayerTable::new();
        table.rebuild(&extended, &LayerNames::builtin());

        table.rebuild(&HandlerCatalog::builtin(), &LayerNames::builtin());
        assert_eq!(table.layer_for(&HandlerKind::new("WATER")), Some(0));
    }

    #[test]
    fn test_prune_removes_stale_and_repeated() {
        let mut table = LayerTable::new();
        table.rebuild(&HandlerCatalog::builtin(), &LayerNames::builtin());
        table.set_layer(&HandlerKind::new("LAVA"), 3).unwrap();

        let removed = table.prune(&HandlerCatalog::builtin());
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].handler, HandlerKind::new("LAVA"));
        assert_eq!(table.entries().len(), 4);
    }

    #[test]
    fn test_set_layer_validates_range() {
        let mut table = LayerTable::new();
        assert!(table.set_layer(&HandlerKind::new("GROUND"), 32).is_err());
        assert!(table.set_layer(&HandlerKind::new("GROUND"), -1).is_err());
        assert!(table.entries().is_empty());
    }
}
