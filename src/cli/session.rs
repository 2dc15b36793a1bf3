//! Session file commands.

use crate::cli::common::{load_config, print_json, CliError, CliResult, SessionFileArg};
use crate::models::ImportSession;
use crate::services::SessionService;
use clap::{Args, Subcommand};

/// Create and inspect session files
#[derive(Debug, Clone, Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Debug, Clone, Subcommand)]
enum SessionCommand {
    /// Create a new session file
    New(NewSessionArgs),
    /// Display a session file
    Show(ShowSessionArgs),
}

/// Create a new session file
#[derive(Debug, Clone, Args)]
pub struct NewSessionArgs {
    #[command(flatten)]
    session: SessionFileArg,

    /// Session name (defaults to the file stem)
    #[arg(long)]
    name: Option<String>,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

/// Display a session file
#[derive(Debug, Clone, Args)]
pub struct ShowSessionArgs {
    #[command(flatten)]
    session: SessionFileArg,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl SessionArgs {
    /// Execute session subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            SessionCommand::New(args) => args.execute(),
            SessionCommand::Show(args) => args.execute(),
        }
    }
}

impl NewSessionArgs {
    /// Execute new command
    pub fn execute(&self) -> CliResult<()> {
        let path = &self.session.session;
        if path.exists() && !self.force {
            return Err(CliError::validation(format!(
                "Session file already exists: {} (use --force to overwrite)",
                path.display()
            )));
        }

        let config = load_config()?;
        let catalog = config
            .handler_catalog()
            .map_err(|e| CliError::io(format!("Invalid handler configuration: {e:#}")))?;
        let layers = config
            .layer_names()
            .map_err(|e| CliError::io(format!("Invalid layer configuration: {e:#}")))?;

        let name = self.name.clone().unwrap_or_else(|| {
            path.file_stem()
                .map_or_else(|| "Untitled".to_string(), |s| s.to_string_lossy().to_string())
        });

        let mut session = SessionService::create(&name, &catalog, &layers);
        self.session.save(&mut session)?;

        println!("Created session '{name}' at {}", path.display());
        Ok(())
    }
}

impl ShowSessionArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let session = self.session.load()?;

        if self.json {
            print_json(&session)?;
        } else {
            output_human_readable(&session);
        }

        Ok(())
    }
}

struct FieldLine {
    label: &'static str,
    value: String,
}

fn describe_text(value: &str) -> String {
    if value.is_empty() {
        "(empty)".to_string()
    } else {
        value.to_string()
    }
}

fn import_fields(session: &ImportSession) -> Vec<FieldLine> {
    let import = &session.import;
    vec![
        FieldLine {
            label: "Base Path",
            value: describe_text(&import.base_file_path),
        },
        FieldLine {
            label: "Use Folders",
            value: import.use_folders.to_string(),
        },
        FieldLine {
            label: "XML Folder",
            value: describe_text(&import.xml_folder),
        },
        FieldLine {
            label: "Scene Path",
            value: describe_text(&import.scene_file_path),
        },
        FieldLine {
            label: "Image Path",
            value: describe_text(&import.image_file_path),
        },
        FieldLine {
            label: "Custom Names",
            value: import.use_custom_names.to_string(),
        },
        FieldLine {
            label: "Scene Name",
            value: describe_text(&import.custom_scene_name),
        },
        FieldLine {
            label: "Image Name",
            value: describe_text(&import.custom_image_name),
        },
    ]
}

fn output_human_readable(session: &ImportSession) {
    println!("Session: {}", session.metadata.name);
    println!("====================");
    println!(
        "Created:  {}",
        session.metadata.created.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "Modified: {}",
        session.metadata.modified.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    println!("Import:");
    for field in import_fields(session) {
        println!("  {:<14} {}", format!("{}:", field.label), field.value);
    }
    println!();

    println!("Keywords ({}):", session.keywords.len());
    for (index, entry) in session.keywords.entries().iter().enumerate() {
        println!("  {index:>3}  {:<24} {}", describe_text(&entry.keyword), entry.handler);
    }
    println!();

    println!("Layers ({}):", session.layers.entries().len());
    for entry in session.layers.entries() {
        println!("  {:<12} {}", entry.handler, entry.layer);
    }
}
