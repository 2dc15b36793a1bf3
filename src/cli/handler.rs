//! Handler catalog commands.

use crate::cli::common::{load_config, print_json, CliError, CliResult};
use crate::models::{HandlerCatalog, HandlerKind};
use clap::{Args, Subcommand};
use serde::Serialize;

/// Inspect declared handler kinds
#[derive(Debug, Clone, Args)]
pub struct HandlerArgs {
    #[command(subcommand)]
    command: HandlerCommand,
}

#[derive(Debug, Clone, Subcommand)]
enum HandlerCommand {
    /// List built-in and configured handler kinds
    List(ListHandlersArgs),
    /// Show which handler kind a name resolves to
    Parse(ParseHandlerArgs),
}

/// List handler kinds
#[derive(Debug, Clone, Args)]
pub struct ListHandlersArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Resolve a handler name
#[derive(Debug, Clone, Args)]
pub struct ParseHandlerArgs {
    /// Handler name (case-insensitive)
    #[arg(value_name = "NAME")]
    name: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct HandlerItem {
    name: String,
    description: String,
    places_in_scene: bool,
    builtin: bool,
}

#[derive(Debug, Serialize)]
struct ParseHandlerResponse {
    input: String,
    handler: String,
    declared: bool,
}

impl HandlerArgs {
    /// Execute handler subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            HandlerCommand::List(args) => args.execute(),
            HandlerCommand::Parse(args) => args.execute(),
        }
    }
}

fn load_catalog() -> CliResult<HandlerCatalog> {
    load_config()?
        .handler_catalog()
        .map_err(|e| CliError::io(format!("Invalid handler configuration: {e:#}")))
}

fn handler_items(catalog: &HandlerCatalog) -> Vec<HandlerItem> {
    let builtin = HandlerCatalog::builtin();
    catalog
        .definitions()
        .iter()
        .map(|definition| HandlerItem {
            name: definition.name.clone(),
            description: definition.description.clone(),
            places_in_scene: definition.places_in_scene,
            builtin: builtin.contains(&definition.kind()),
        })
        .collect()
}

impl ListHandlersArgs {
    /// Execute list command
    pub fn execute(&self) -> CliResult<()> {
        let items = handler_items(&load_catalog()?);

        if self.json {
            return print_json(&items);
        }

        println!("Handlers ({}):", items.len());
        println!();
        for item in items {
            let origin = if item.builtin { "built-in" } else { "custom" };
            let scene = if item.places_in_scene { "" } else { " [files only]" };
            println!("  {:<12} {:<9} {}{scene}", item.name, origin, item.description);
        }
        Ok(())
    }
}

impl ParseHandlerArgs {
    /// Execute parse command
    pub fn execute(&self) -> CliResult<()> {
        let catalog = load_catalog()?;
        let handler = catalog.str_to_type(&self.name);
        let response = ParseHandlerResponse {
            input: self.name.clone(),
            declared: catalog.contains(&HandlerKind::new(&self.name)),
            handler: HandlerCatalog::type_to_str(&handler),
        };

        if self.json {
            print_json(&response)?;
        } else if response.declared {
            println!("{}", response.handler);
        } else {
            println!("{} (unknown name '{}')", response.handler, response.input);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HandlerDefinition;

    #[test]
    fn test_handler_items_mark_custom() {
        let custom = vec![HandlerDefinition::new("LADDER", "Climbable", true).unwrap()];
        let catalog = HandlerCatalog::with_custom(&custom).unwrap();

        let items = handler_items(&catalog);
        assert_eq!(items.len(), 5);
        assert!(items[0].builtin);
        assert!(!items[0].places_in_scene);
        assert_eq!(items[4].name, "LADDER");
        assert!(!items[4].builtin);
    }
}
