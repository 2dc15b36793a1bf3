//! Shared CLI types: errors, exit codes and common arguments.

use crate::config::Config;
use crate::models::{ImportSession, KeywordEntry};
use crate::prompt::{DecisionProvider, Prompt, ScriptedDecider, TerminalDecider};
use crate::services::SessionService;
use clap::Args;
use std::fmt;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Validation failed or the user declined to continue
    ValidationFailed = 1,
    /// File, parse or terminal error
    IoError = 2,
}

/// Error returned by CLI commands.
#[derive(Debug, Clone)]
pub struct CliError {
    /// Exit code to report
    pub code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// An I/O, parse or terminal error.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// A validation failure or rejected input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::ValidationFailed,
            message: message.into(),
        }
    }

    /// Numeric process exit code.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.code as i32
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Session file argument shared by the session-based commands.
#[derive(Debug, Clone, Args)]
pub struct SessionFileArg {
    /// Path to the session file
    #[arg(short, long, value_name = "FILE")]
    pub session: PathBuf,
}

impl SessionFileArg {
    /// Loads the session file.
    pub fn load(&self) -> CliResult<ImportSession> {
        load_session(&self.session)
    }

    /// Saves the session file.
    pub fn save(&self, session: &mut ImportSession) -> CliResult<()> {
        SessionService::save(session, &self.session)
            .map_err(|e| CliError::io(format!("Failed to save session: {e:#}")))
    }
}

/// How prompts are answered.
#[derive(Debug, Clone, Default, Args)]
pub struct AnswerArgs {
    /// Answer prompts from this list of option indices (0-based, comma-separated)
    /// instead of asking on the terminal
    #[arg(long, value_name = "N,N,...", value_delimiter = ',')]
    pub answers: Option<Vec<usize>>,
}

impl AnswerArgs {
    /// Builds the decision provider for this invocation.
    ///
    /// Without `--answers` the terminal is used when stdin is one; otherwise
    /// every prompt fails with exit code 2.
    pub fn decider(&self, config: &Config) -> CliDecider {
        match &self.answers {
            Some(answers) => CliDecider::Scripted(ScriptedDecider::new(answers.iter().copied())),
            None if std::io::stdin().is_terminal() => CliDecider::Terminal(TerminalDecider {
                echo_keywords: config.ui.echo_keywords,
            }),
            None => {
                tracing::debug!("stdin is not a terminal, prompts will not be answered");
                CliDecider::Scripted(ScriptedDecider::silent())
            }
        }
    }
}

/// Decision provider used by the CLI.
#[derive(Debug)]
pub enum CliDecider {
    /// Interactive terminal prompts
    Terminal(TerminalDecider),
    /// Answers given with `--answers`
    Scripted(ScriptedDecider),
}

impl DecisionProvider for CliDecider {
    fn choose(&mut self, prompt: &Prompt) -> anyhow::Result<usize> {
        match self {
            Self::Terminal(decider) => decider.choose(prompt),
            Self::Scripted(decider) => decider.choose(prompt),
        }
    }

    fn notify(&mut self, title: &str, message: &str) -> anyhow::Result<()> {
        match self {
            Self::Terminal(decider) => decider.notify(title, message),
            Self::Scripted(decider) => {
                eprintln!("{title}: {message}");
                decider.notify(title, message)
            }
        }
    }

    fn keywords_changed(&mut self, entries: &[KeywordEntry]) {
        match self {
            Self::Terminal(decider) => decider.keywords_changed(entries),
            Self::Scripted(decider) => decider.keywords_changed(entries),
        }
    }
}

/// Loads a session file, mapping errors to exit code 2.
pub fn load_session(path: &Path) -> CliResult<ImportSession> {
    SessionService::load(path).map_err(|e| CliError::io(format!("Failed to load session: {e:#}")))
}

/// Loads the app configuration, mapping errors to exit code 2.
pub fn load_config() -> CliResult<Config> {
    Config::load().map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))
}

/// Prints a value as JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}
