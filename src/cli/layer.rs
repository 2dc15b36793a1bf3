//! Handler layer table commands.

use crate::cli::common::{load_config, print_json, CliError, CliResult, SessionFileArg};
use crate::config::Config;
use crate::constants::APP_BINARY_NAME;
use crate::models::{HandlerCatalog, LayerNames};
use clap::{Args, Subcommand};
use serde::Serialize;

/// Manage the handler to layer table of a session
#[derive(Debug, Clone, Args)]
pub struct LayerArgs {
    #[command(subcommand)]
    command: LayerCommand,
}

#[derive(Debug, Clone, Subcommand)]
enum LayerCommand {
    /// List layer assignments
    List(ListLayersArgs),
    /// Add entries for handler kinds that have none
    Rebuild(RebuildLayersArgs),
    /// Remove entries for undeclared or repeated handler kinds
    Prune(PruneLayersArgs),
    /// Assign a layer to a handler kind
    Set(SetLayerArgs),
}

/// List layer assignments
#[derive(Debug, Clone, Args)]
pub struct ListLayersArgs {
    #[command(flatten)]
    session: SessionFileArg,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Add missing layer entries
#[derive(Debug, Clone, Args)]
pub struct RebuildLayersArgs {
    #[command(flatten)]
    session: SessionFileArg,
}

/// Remove stale layer entries
#[derive(Debug, Clone, Args)]
pub struct PruneLayersArgs {
    #[command(flatten)]
    session: SessionFileArg,
}

/// Assign a layer to a handler kind
#[derive(Debug, Clone, Args)]
pub struct SetLayerArgs {
    #[command(flatten)]
    session: SessionFileArg,

    /// Handler kind (e.g. GROUND)
    #[arg(value_name = "HANDLER")]
    handler: String,

    /// Layer name or numeric id (0-31)
    #[arg(value_name = "LAYER")]
    layer: String,
}

#[derive(Debug, Serialize)]
struct LayerItem {
    handler: String,
    layer: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    layer_name: Option<String>,
    declared: bool,
}

impl LayerArgs {
    /// Execute layer subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            LayerCommand::List(args) => args.execute(),
            LayerCommand::Rebuild(args) => args.execute(),
            LayerCommand::Prune(args) => args.execute(),
            LayerCommand::Set(args) => args.execute(),
        }
    }
}

fn catalog_and_layers(config: &Config) -> CliResult<(HandlerCatalog, LayerNames)> {
    let catalog = config
        .handler_catalog()
        .map_err(|e| CliError::io(format!("Invalid handler configuration: {e:#}")))?;
    let layers = config
        .layer_names()
        .map_err(|e| CliError::io(format!("Invalid layer configuration: {e:#}")))?;
    Ok((catalog, layers))
}

impl ListLayersArgs {
    /// Execute list command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let (catalog, layers) = catalog_and_layers(&config)?;
        let session = self.session.load()?;

        let items: Vec<LayerItem> = session
            .layers
            .entries()
            .iter()
            .map(|entry| LayerItem {
                handler: entry.handler.to_string(),
                layer: entry.layer,
                layer_name: layers.name_of(entry.layer).map(str::to_string),
                declared: catalog.contains(&entry.handler),
            })
            .collect();

        if self.json {
            return print_json(&items);
        }

        if items.is_empty() {
            println!("No layer assignments. Run '{APP_BINARY_NAME} layer rebuild' to add them.");
            return Ok(());
        }

        println!("Layer assignments ({}):", items.len());
        println!();
        for item in items {
            let name = item.layer_name.unwrap_or_default();
            let stale = if item.declared { "" } else { " (undeclared)" };
            println!("  {:<12} {:>2} {name}{stale}", item.handler, item.layer);
        }
        Ok(())
    }
}

impl RebuildLayersArgs {
    /// Execute rebuild command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let (catalog, layers) = catalog_and_layers(&config)?;
        let mut session = self.session.load()?;

        let added = session.layers.rebuild(&catalog, &layers);
        if added.is_empty() {
            println!("Layer table is up to date.");
            return Ok(());
        }

        self.session.save(&mut session)?;
        let names: Vec<String> = added.iter().map(ToString::to_string).collect();
        println!("Added layer entries for: {}", names.join(", "));
        Ok(())
    }
}

impl PruneLayersArgs {
    /// Execute prune command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let (catalog, _) = catalog_and_layers(&config)?;
        let mut session = self.session.load()?;

        let removed = session.layers.prune(&catalog);
        if removed.is_empty() {
            println!("Nothing to prune.");
            return Ok(());
        }

        self.session.save(&mut session)?;
        println!("Removed {} layer entries:", removed.len());
        for entry in removed {
            println!("  {} ({})", entry.handler, entry.layer);
        }
        Ok(())
    }
}

impl SetLayerArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let (catalog, layers) = catalog_and_layers(&config)?;

        let handler = catalog.str_to_type(&self.handler);
        if handler.is_none() && !self.handler.eq_ignore_ascii_case(handler.as_str()) {
            return Err(CliError::validation(format!(
                "Unknown handler '{}'",
                self.handler
            )));
        }

        let layer = layers
            .resolve(&self.layer)
            .map_err(|e| CliError::validation(e.to_string()))?;

        let mut session = self.session.load()?;
        session
            .layers
            .set_layer(&handler, layer)
            .map_err(|e| CliError::validation(e.to_string()))?;
        self.session.save(&mut session)?;

        println!("{handler} now uses layer {layer}.");
        Ok(())
    }
}
