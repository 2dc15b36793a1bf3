//! CLI command handlers for KeyScene.
//!
//! Each subcommand loads a session file, applies one operation and writes it
//! back. Prompts are answered on the terminal or from `--answers`.

pub mod common;
pub mod config;
pub mod handler;
pub mod keyword;
pub mod layer;
pub mod session;
pub mod validate;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use handler::HandlerArgs;
pub use keyword::KeywordArgs;
pub use layer::LayerArgs;
pub use session::SessionArgs;
pub use validate::ValidateArgs;
