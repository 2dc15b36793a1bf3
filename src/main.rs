//! KeyScene Importer - import settings validator and keyword registry
//!
//! Checks import settings before a tile-map import and edits the keyword,
//! handler and layer tables stored in a session file.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use keyscene::cli::{
    CliResult, ConfigArgs, HandlerArgs, KeywordArgs, LayerArgs, SessionArgs, ValidateArgs,
};

/// KeyScene Importer - validate import settings and manage keywords
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create and inspect session files
    Session(SessionArgs),
    /// Validate a session's import settings
    Validate(ValidateArgs),
    /// Manage keywords
    Keyword(KeywordArgs),
    /// Inspect handler kinds
    Handler(HandlerArgs),
    /// Manage handler layers
    Layer(LayerArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

impl Commands {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::Session(args) => args.execute(),
            Self::Validate(args) => args.execute(),
            Self::Keyword(args) => args.execute(),
            Self::Handler(args) => args.execute(),
            Self::Layer(args) => args.execute(),
            Self::Config(args) => args.execute(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for --json output
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = cli.command.execute() {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
