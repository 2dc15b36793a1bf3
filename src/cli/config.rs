//! Configuration management CLI commands.

use crate::cli::common::{load_config, CliError, CliResult};
use crate::config::Config;
use crate::constants::APP_NAME;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug, Clone)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug, Clone)]
pub struct ConfigSetArgs {
    /// Path segment that marks the project root (e.g. Assets)
    #[arg(long, value_name = "NAME")]
    root_marker: Option<String>,

    /// Project data directory used for the default image path
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Print the keyword list after interactive changes (true or false)
    #[arg(long, value_name = "BOOL")]
    echo_keywords: Option<bool>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput<'a> {
    config_file: String,
    #[serde(flatten)]
    config: &'a Config,
    resolved_data_dir: String,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;

        if self.json {
            output_json(&config)?;
        } else {
            output_human_readable(&config)?;
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.root_marker.is_none() && self.data_dir.is_none() && self.echo_keywords.is_none() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --root-marker, --data-dir, or --echo-keywords",
            ));
        }

        let mut config = load_config()?;

        if let Some(marker) = &self.root_marker {
            config.project.root_marker.clone_from(marker);
        }

        if let Some(path) = &self.data_dir {
            if !path.is_dir() {
                return Err(CliError::validation(format!(
                    "Data directory does not exist: {}",
                    path.display()
                )));
            }
            config.project.data_dir = Some(path.clone());
        }

        if let Some(echo) = self.echo_keywords {
            config.ui.echo_keywords = echo;
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        tracing::info!("configuration saved");
        println!("Configuration updated successfully.");

        Ok(())
    }
}

fn config_file_display() -> CliResult<String> {
    Config::config_file_path()
        .map(|p| p.display().to_string())
        .map_err(|e| CliError::io(format!("Failed to locate config file: {e:#}")))
}

fn resolved_data_dir(config: &Config) -> CliResult<String> {
    config
        .project
        .resolved_data_dir()
        .map(|p| p.display().to_string())
        .map_err(|e| CliError::io(format!("Failed to resolve data directory: {e:#}")))
}

/// Output configuration in JSON format
fn output_json(config: &Config) -> CliResult<()> {
    let output = ConfigOutput {
        config_file: config_file_display()?,
        config,
        resolved_data_dir: resolved_data_dir(config)?,
    };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::io(format!("Failed to serialize configuration to JSON: {e}")))?;

    println!("{json}");
    Ok(())
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) -> CliResult<()> {
    println!("{APP_NAME} Configuration");
    println!("==============================");
    println!("File: {}", config_file_display()?);
    if !Config::exists() {
        println!("(not created yet, showing defaults)");
    }
    println!();

    println!("Project:");
    println!("  Root Marker: {}", config.project.root_marker);
    match &config.project.data_dir {
        Some(dir) => println!("  Data Directory: {}", dir.display()),
        None => println!("  Data Directory: {} (default)", resolved_data_dir(config)?),
    }
    println!();

    println!("UI:");
    println!("  Echo Keywords: {}", config.ui.echo_keywords);
    println!();

    if !config.layers.is_empty() {
        println!("Layers:");
        for (name, id) in &config.layers {
            println!("  {name}: {id}");
        }
        println!();
    }

    if !config.handlers.is_empty() {
        println!("Custom Handlers:");
        for handler in &config.handlers {
            println!("  {}: {}", handler.name, handler.description);
        }
        println!();
    }

    Ok(())
}
