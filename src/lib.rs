//! KeyScene Importer Library
//!
//! Validates the settings of a tile-map import into a Unity project and
//! manages the keyword, handler and layer tables that decide how imported
//! objects are placed in the scene.

pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod prompt;
pub mod registry;
pub mod services;
pub mod validator;
