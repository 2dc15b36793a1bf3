//! Service layer for file I/O.
//!
//! Services keep file handling out of the models and the CLI commands.

pub mod sessions;

pub use sessions::SessionService;
