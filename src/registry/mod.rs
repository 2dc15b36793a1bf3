//! Keyword registry and handler layer table.
//!
//! Both lists are owned by an [`ImportSession`](crate::models::ImportSession)
//! and edited through the operations here.

pub mod keywords;
pub mod layers;

pub use keywords::{KeywordRegistry, RegistryOutcome};
pub use layers::LayerTable;
