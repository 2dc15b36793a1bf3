//! Data models for import settings, keywords, handlers and layers.
//!
//! Models are independent of the prompt boundary and of file I/O.

pub mod handler;
pub mod handler_layer;
pub mod import_config;
pub mod keyword;
pub mod session;

// Re-export all model types
pub use handler::{HandlerCatalog, HandlerDefinition, HandlerKind};
pub use handler_layer::{HandlerLayer, LayerNames};
pub use import_config::ImportConfiguration;
pub use keyword::KeywordEntry;
pub use session::{ImportSession, SessionMetadata};
