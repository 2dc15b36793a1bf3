//! Validation command for import sessions.

use crate::cli::common::{
    load_config, print_json, AnswerArgs, CliError, CliResult, SessionFileArg,
};
use crate::models::ImportConfiguration;
use crate::validator::{CheckKind, ImportValidator, ValidationReport};
use clap::Args;
use serde::Serialize;

/// Validate a session's import settings before an import
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub session: SessionFileArg,

    #[command(flatten)]
    pub answers: AnswerArgs,

    /// Write the normalized settings back to the session file
    #[arg(long)]
    pub save: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ValidateResponse<'a> {
    valid: bool,
    #[serde(flatten)]
    report: &'a ValidationReport,
    import: &'a ImportConfiguration,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let mut session = self.session.load()?;
        let project = config
            .project_paths()
            .map_err(|e| CliError::io(format!("Failed to resolve project paths: {e:#}")))?;

        let mut decider = self.answers.decider(&config);
        let report = ImportValidator::new(
            &mut session.import,
            &session.keywords,
            &project,
            &mut decider,
        )
        .validate()
        .map_err(|e| CliError::io(format!("Validation aborted: {e:#}")))?;

        if self.save {
            self.session.save(&mut session)?;
        }

        if self.json {
            print_json(&ValidateResponse {
                valid: report.is_valid(),
                report: &report,
                import: &session.import,
            })?;
        } else {
            print_human_readable(&report, self.save);
        }

        if !report.is_valid() {
            return Err(CliError::validation("Validation failed"));
        }

        Ok(())
    }
}

fn check_status(report: &ValidationReport, check: CheckKind) -> &'static str {
    if report.passed.contains(&check) {
        "passed"
    } else if report.skipped.contains(&check) {
        "skipped"
    } else if report.failure.as_ref().is_some_and(|f| f.kind == check) {
        "failed"
    } else {
        "not run"
    }
}

fn print_human_readable(report: &ValidationReport, saved: bool) {
    if report.is_valid() {
        println!("✓ Validation passed");
    } else {
        println!("✗ Validation failed");
    }

    println!("\nChecks:");
    for check in CheckKind::ORDER {
        println!("  {:<18} {}", format!("{check}:"), check_status(report, check));
    }

    if !report.notes.is_empty() {
        println!("\nChanges:");
        for note in &report.notes {
            println!("  • {}", note.message);
        }
        if saved {
            println!("  (saved to session)");
        }
    }

    if let Some(failure) = &report.failure {
        println!("\nIssue:");
        println!("  ✗ {failure}");
    }
}
