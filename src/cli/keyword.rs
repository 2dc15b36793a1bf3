//! Keyword management commands.
//!
//! Provides commands to list, add, remove, edit and look up keywords in a
//! session file.

use crate::cli::common::{
    load_config, print_json, AnswerArgs, CliError, CliResult, SessionFileArg,
};
use crate::config::Config;
use crate::models::handler::NONE_HANDLER;
use crate::models::{HandlerCatalog, HandlerKind};
use crate::registry::RegistryOutcome;
use clap::{Args, Subcommand};
use serde::Serialize;

/// Manage keywords in a session
#[derive(Debug, Clone, Args)]
pub struct KeywordArgs {
    /// Keyword subcommand
    #[command(subcommand)]
    pub command: KeywordCommand,
}

/// Keyword management subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum KeywordCommand {
    /// List all keywords
    List(ListKeywordsArgs),
    /// Insert a new keyword at a position
    Add(AddKeywordArgs),
    /// Remove the keyword at a position
    Remove(RemoveKeywordArgs),
    /// Edit the keyword at a position
    Set(SetKeywordArgs),
    /// Show the handler a keyword maps to
    Find(FindKeywordArgs),
}

/// List all keywords
#[derive(Debug, Clone, Args)]
pub struct ListKeywordsArgs {
    #[command(flatten)]
    pub session: SessionFileArg,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Insert a new keyword
#[derive(Debug, Clone, Args)]
pub struct AddKeywordArgs {
    #[command(flatten)]
    pub session: SessionFileArg,

    #[command(flatten)]
    pub answers: AnswerArgs,

    /// Position to insert at (defaults to the end of the list)
    #[arg(long, allow_negative_numbers = true)]
    pub index: Option<i64>,

    /// Keyword text for the new entry
    #[arg(long, value_name = "WORD")]
    pub keyword: Option<String>,

    /// Handler for the new entry (e.g. GROUND)
    #[arg(long, value_name = "HANDLER")]
    pub handler: Option<String>,
}

/// Remove a keyword
#[derive(Debug, Clone, Args)]
pub struct RemoveKeywordArgs {
    #[command(flatten)]
    pub session: SessionFileArg,

    #[command(flatten)]
    pub answers: AnswerArgs,

    /// Position to remove
    #[arg(long, allow_negative_numbers = true)]
    pub index: i64,
}

/// Edit a keyword in place
#[derive(Debug, Clone, Args)]
pub struct SetKeywordArgs {
    #[command(flatten)]
    pub session: SessionFileArg,

    /// Position to edit
    #[arg(long)]
    pub index: usize,

    /// New keyword text
    #[arg(long, value_name = "WORD")]
    pub keyword: Option<String>,

    /// New handler (e.g. GROUND)
    #[arg(long, value_name = "HANDLER")]
    pub handler: Option<String>,
}

/// Look up the handler for a keyword
#[derive(Debug, Clone, Args)]
pub struct FindKeywordArgs {
    #[command(flatten)]
    pub session: SessionFileArg,

    /// Keyword to look up (exact match)
    #[arg(value_name = "WORD")]
    pub keyword: String,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct KeywordItem {
    index: usize,
    keyword: String,
    handler: String,
}

#[derive(Debug, Serialize)]
struct ListKeywordsResponse {
    keywords: Vec<KeywordItem>,
    count: usize,
}

#[derive(Debug, Serialize)]
struct FindKeywordResponse {
    keyword: String,
    handler: String,
    found: bool,
}

impl KeywordArgs {
    /// Execute the keyword command
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            KeywordCommand::List(args) => args.execute(),
            KeywordCommand::Add(args) => args.execute(),
            KeywordCommand::Remove(args) => args.execute(),
            KeywordCommand::Set(args) => args.execute(),
            KeywordCommand::Find(args) => args.execute(),
        }
    }
}

impl ListKeywordsArgs {
    /// Execute the list command
    pub fn execute(&self) -> CliResult<()> {
        let session = self.session.load()?;

        let keywords: Vec<KeywordItem> = session
            .keywords
            .entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| KeywordItem {
                index,
                keyword: entry.keyword.clone(),
                handler: HandlerCatalog::type_to_str(&entry.handler),
            })
            .collect();

        let response = ListKeywordsResponse {
            count: keywords.len(),
            keywords,
        };

        if self.json {
            print_json(&response)?;
        } else if response.count == 0 {
            println!("No keywords defined.");
        } else {
            println!("Keywords ({}):", response.count);
            println!();
            for item in response.keywords {
                let keyword = if item.keyword.is_empty() {
                    "(empty)".to_string()
                } else {
                    item.keyword
                };
                println!("  {:>3}  {:<24} {}", item.index, keyword, item.handler);
            }
        }

        Ok(())
    }
}

impl AddKeywordArgs {
    /// Execute the add command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let mut session = self.session.load()?;
        let handler = self
            .handler
            .as_deref()
            .map(|text| parse_handler(&config, text))
            .transpose()?;

        let index = self.index.unwrap_or(session.keywords.len() as i64);
        let mut decider = self.answers.decider(&config);
        let outcome = session
            .keywords
            .add_keyword(index, &mut decider)
            .map_err(|e| CliError::io(format!("Failed to add keyword: {e:#}")))?;

        let RegistryOutcome::Added(position) = outcome else {
            println!("No keyword added.");
            return Ok(());
        };

        if self.keyword.is_some() || handler.is_some() {
            session
                .keywords
                .set_entry(position, self.keyword.as_deref(), handler)
                .map_err(|e| CliError::validation(e.to_string()))?;
        }

        self.session.save(&mut session)?;
        println!("Keyword added at index {position}.");
        Ok(())
    }
}

impl RemoveKeywordArgs {
    /// Execute the remove command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let mut session = self.session.load()?;

        let mut decider = self.answers.decider(&config);
        let outcome = session
            .keywords
            .remove_keyword(self.index, &mut decider)
            .map_err(|e| CliError::io(format!("Failed to remove keyword: {e:#}")))?;

        match outcome {
            RegistryOutcome::Removed { index, entry } => {
                self.session.save(&mut session)?;
                println!("Keyword '{}' removed from index {index}.", entry.keyword);
                Ok(())
            }
            RegistryOutcome::Empty => Err(CliError::validation(
                "There are no keywords to remove",
            )),
            RegistryOutcome::Declined | RegistryOutcome::Added(_) => {
                println!("No keyword removed.");
                Ok(())
            }
        }
    }
}

impl SetKeywordArgs {
    /// Execute the set command
    pub fn execute(&self) -> CliResult<()> {
        if self.keyword.is_none() && self.handler.is_none() {
            return Err(CliError::validation(
                "At least one of --keyword or --handler must be specified",
            ));
        }

        let config = load_config()?;
        let mut session = self.session.load()?;
        let handler = self
            .handler
            .as_deref()
            .map(|text| parse_handler(&config, text))
            .transpose()?;

        let entry = session
            .keywords
            .set_entry(self.index, self.keyword.as_deref(), handler)
            .map_err(|e| CliError::validation(e.to_string()))?;
        println!(
            "Keyword {} is now '{}' -> {}.",
            self.index, entry.keyword, entry.handler
        );

        self.session.save(&mut session)?;
        Ok(())
    }
}

impl FindKeywordArgs {
    /// Execute the find command
    pub fn execute(&self) -> CliResult<()> {
        let session = self.session.load()?;
        let handler = session.keywords.find_handler(&self.keyword);
        let found = session
            .keywords
            .entries()
            .iter()
            .any(|entry| entry.keyword == self.keyword);

        let response = FindKeywordResponse {
            keyword: self.keyword.clone(),
            handler: HandlerCatalog::type_to_str(&handler),
            found,
        };

        if self.json {
            print_json(&response)?;
        } else if found {
            println!("{} -> {}", response.keyword, response.handler);
        } else {
            println!("{} -> {} (no matching keyword)", response.keyword, response.handler);
        }

        Ok(())
    }
}

/// Parses a handler name strictly: unknown names are rejected here so that
/// typos on the command line are not silently turned into NONE.
fn parse_handler(config: &Config, text: &str) -> CliResult<HandlerKind> {
    let catalog = config
        .handler_catalog()
        .map_err(|e| CliError::io(format!("Invalid handler configuration: {e:#}")))?;
    let kind = catalog.str_to_type(text);
    if kind.is_none() && !text.eq_ignore_ascii_case(NONE_HANDLER) {
        let known: Vec<String> = catalog.kinds().map(|k| k.to_string()).collect();
        return Err(CliError::validation(format!(
            "Unknown handler '{text}'. Known handlers: {}",
            known.join(", ")
        )));
    }
    Ok(kind)
}
