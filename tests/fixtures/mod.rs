//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test file uses every fixture

use keyscene::models::{
    HandlerCatalog, HandlerKind, ImportConfiguration, ImportSession, KeywordEntry, LayerNames,
};
use keyscene::services::SessionService;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the keyscene binary
pub fn keyscene_bin() -> &'static str {
    env!("CARGO_BIN_EXE_keyscene")
}

/// Isolated workspace: config dir, an export folder to import from, and a
/// session file path. Everything lives in one temp dir.
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub config_dir: PathBuf,
    pub export_dir: PathBuf,
    pub data_dir: PathBuf,
    pub session_path: PathBuf,
}

impl TestEnv {
    /// Creates the workspace and a config pointing the data dir into it.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_dir = temp_dir.path().join("config");
        let export_dir = temp_dir.path().join("export");
        let data_dir = temp_dir.path().join("game").join("Assets");
        fs::create_dir_all(&config_dir).unwrap();
        fs::create_dir_all(&export_dir).unwrap();
        fs::create_dir_all(&data_dir).unwrap();

        let env = Self {
            session_path: temp_dir.path().join("level.toml"),
            temp_dir,
            config_dir,
            export_dir,
            data_dir,
        };
        env.write_config("");
        env
    }

    /// Writes `config.toml`, always setting the project data dir first.
    pub fn write_config(&self, extra: &str) {
        let content = format!(
            "[project]\nroot_marker = \"Assets\"\ndata_dir = {:?}\n\n{extra}",
            self.data_dir.to_string_lossy()
        );
        fs::write(self.config_dir.join("config.toml"), content).unwrap();
    }

    /// Builds a command with the isolated config dir.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(keyscene_bin());
        cmd.env("KEYSCENE_CONFIG_DIR", &self.config_dir);
        cmd.env_remove("RUST_LOG");
        cmd.args(args);
        cmd
    }

    /// Runs a command against the session file.
    ///
    /// `args` are placed after the subcommand path, followed by `--session`.
    pub fn run(&self, args: &[&str]) -> Output {
        let session = self.session_arg();
        let mut full: Vec<&str> = args.to_vec();
        full.extend(["--session", session.as_str()]);
        self.command(&full)
            .output()
            .expect("Failed to execute command")
    }

    /// The session path as a string argument.
    pub fn session_arg(&self) -> String {
        self.session_path.to_string_lossy().to_string()
    }

    /// Export dir as a string, without a trailing separator.
    pub fn export_arg(&self) -> String {
        self.export_dir.to_string_lossy().to_string()
    }

    /// Writes a session to the session path.
    pub fn write_session(&self, session: &mut ImportSession) {
        SessionService::save(session, &self.session_path).expect("Failed to save session");
    }

    /// Reads the session back from disk.
    pub fn read_session(&self) -> ImportSession {
        SessionService::load(&self.session_path).expect("Failed to load session")
    }
}

/// Session with a layer table and no keywords.
pub fn empty_session() -> ImportSession {
    SessionService::create("Level", &HandlerCatalog::builtin(), &LayerNames::builtin())
}

/// Session with settings that pass every check without prompting.
pub fn valid_session(export_dir: &Path) -> ImportSession {
    let mut session = empty_session();
    session.import = ImportConfiguration::new()
        .with_base_path(export_dir.to_string_lossy())
        .with_destinations("Assets/Scenes/", "Assets/Images/");
    session.keywords = vec![
        KeywordEntry::new("ground", HandlerKind::new("GROUND")),
        KeywordEntry::new("platform", HandlerKind::new("PLATFORM")),
        KeywordEntry::new("tree", HandlerKind::new("SCENERY")),
    ]
    .into();
    session
}

/// Session whose keyword list holds the given words, all with handler GROUND.
pub fn session_with_keywords(words: &[&str]) -> ImportSession {
    let mut session = empty_session();
    session.keywords = words
        .iter()
        .map(|word| KeywordEntry::new(*word, HandlerKind::new("GROUND")))
        .collect::<Vec<_>>()
        .into();
    session
}

/// Parses stdout as JSON.
pub fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| {
        panic!(
            "Should parse JSON output ({e}). stdout: {stdout} stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

/// Keyword texts of a session, in order.
pub fn keyword_texts(session: &ImportSession) -> Vec<String> {
    session
        .keywords
        .entries()
        .iter()
        .map(|entry| entry.keyword.clone())
        .collect()
}
