//! Pre-import validation of the user's import settings.
//!
//! The checks run in a fixed order and stop at the first failure. Several of
//! them repair the settings in place (trailing separators, default paths) or
//! ask the user how to continue through a [`DecisionProvider`].

pub mod paths;

use crate::models::{ImportConfiguration, KeywordEntry};
use crate::prompt::{DecisionProvider, Prompt};
use crate::registry::KeywordRegistry;
use anyhow::Result;
use serde::Serialize;
use std::fmt;
use std::path::Path;

use paths::{ensure_trailing_separator, normalize_project_path};

/// The individual checks, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Base path is set and exists
    BasePath,
    /// XML subfolder settings (only when folders are enabled)
    UseFolders,
    /// Keyword list is usable
    KeywordHandling,
    /// Scene destination path
    ScenePath,
    /// Image destination path
    ImagePath,
    /// Custom name settings (only when custom names are enabled)
    CustomNames,
}

impl CheckKind {
    /// All checks in execution order.
    pub const ORDER: [Self; 6] = [
        Self::BasePath,
        Self::UseFolders,
        Self::KeywordHandling,
        Self::ScenePath,
        Self::ImagePath,
        Self::CustomNames,
    ];
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BasePath => write!(f, "Base Path"),
            Self::UseFolders => write!(f, "Use Folders"),
            Self::KeywordHandling => write!(f, "Keyword Handling"),
            Self::ScenePath => write!(f, "Scene Path"),
            Self::ImagePath => write!(f, "Image Path"),
            Self::CustomNames => write!(f, "Custom Names"),
        }
    }
}

/// Why validation stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    /// Check that failed
    pub kind: CheckKind,
    /// Human-readable message
    pub message: String,
    /// True when the user chose to stop rather than a hard blocker
    pub declined: bool,
    /// Optional hint for fixing the settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationFailure {
    /// A blocking problem with the settings.
    pub fn blocked(kind: CheckKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            declined: false,
            suggestion: None,
        }
    }

    /// The user chose to return and fix the settings.
    pub fn declined(kind: CheckKind, message: impl Into<String>) -> Self {
        Self {
            declined: true,
            ..Self::blocked(kind, message)
        }
    }

    /// Sets a suggestion for fixing the failure.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n    → {suggestion}")?;
        }
        Ok(())
    }
}

/// A change the validator made to the settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationNote {
    /// Check that made the change
    pub check: CheckKind,
    /// What changed
    pub message: String,
}

/// Outcome of a validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Checks that ran and passed
    pub passed: Vec<CheckKind>,
    /// Checks that did not apply (their setting is off)
    pub skipped: Vec<CheckKind>,
    /// The failure that stopped validation, if any
    pub failure: Option<ValidationFailure>,
    /// Changes made to the settings, in order
    pub notes: Vec<ValidationNote>,
}

impl ValidationReport {
    /// Returns true if the settings are ready for import.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failure.is_none()
    }
}

/// Project-level values the destination checks fall back on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    /// Path segment marking the project asset root (e.g. "Assets")
    pub root_marker: String,
    /// Absolute project data directory, the image path default
    pub data_dir: String,
}

impl ProjectPaths {
    /// Creates project paths.
    pub fn new(root_marker: impl Into<String>, data_dir: impl Into<String>) -> Self {
        Self {
            root_marker: root_marker.into(),
            data_dir: data_dir.into(),
        }
    }
}

/// Answer to the "custom name is empty" question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MissingNameChoice {
    /// Go back and enter a name
    Return,
    /// Disable custom names entirely
    TurnOff,
    /// Keep custom names on, but leave this one empty
    DontUse,
}

impl MissingNameChoice {
    fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Return),
            1 => Some(Self::TurnOff),
            2 => Some(Self::DontUse),
            _ => None,
        }
    }
}

type CheckOutcome = std::result::Result<(), ValidationFailure>;

/// Runs the pre-import checks over an import configuration.
///
/// # Example
///
/// ```
/// use keyscene::models::{HandlerKind, ImportConfiguration, KeywordEntry};
/// use keyscene::prompt::ScriptedDecider;
/// use keyscene::registry::KeywordRegistry;
/// use keyscene::validator::{ImportValidator, ProjectPaths};
///
/// let dir = std::env::temp_dir();
/// let mut config = ImportConfiguration::new()
///     .with_base_path(dir.to_string_lossy())
///     .with_destinations("/game/Assets/Scenes", "Assets/Art");
/// let keywords: KeywordRegistry =
///     vec![KeywordEntry::new("ground", HandlerKind::new("GROUND"))].into();
/// let project = ProjectPaths::new("Assets", "/game/Assets");
/// let mut decider = ScriptedDecider::silent();
///
/// let report = ImportValidator::new(&mut config, &keywords, &project, &mut decider)
///     .validate()?;
///
/// assert!(report.is_valid());
/// assert_eq!(config.scene_file_path, "Assets/Scenes/");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct ImportValidator<'a> {
    config: &'a mut ImportConfiguration,
    keywords: &'a KeywordRegistry,
    project: &'a ProjectPaths,
    provider: &'a mut dyn DecisionProvider,
    notes: Vec<ValidationNote>,
}

impl<'a> ImportValidator<'a> {
    /// Creates a validator.
    pub fn new(
        config: &'a mut ImportConfiguration,
        keywords: &'a KeywordRegistry,
        project: &'a ProjectPaths,
        provider: &'a mut dyn DecisionProvider,
    ) -> Self {
        Self {
            config,
            keywords,
            project,
            provider,
            notes: Vec::new(),
        }
    }

    /// Runs all checks in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns an error only if the decision provider fails.
    pub fn validate(mut self) -> Result<ValidationReport> {
        let mut report = ValidationReport::default();

        for check in CheckKind::ORDER {
            if !self.applies(check) {
                report.skipped.push(check);
                continue;
            }

            let outcome = match check {
                CheckKind::BasePath => self.check_base_path()?,
                CheckKind::UseFolders => self.check_use_folders()?,
                CheckKind::KeywordHandling => self.check_keyword_handling()?,
                CheckKind::ScenePath | CheckKind::ImagePath => self.check_destination(check)?,
                CheckKind::CustomNames => self.check_custom_names()?,
            };

            match outcome {
                Ok(()) => report.passed.push(check),
                Err(failure) => {
                    tracing::debug!(check = %check, declined = failure.declined, "validation stopped");
                    report.failure = Some(failure);
                    break;
                }
            }
        }

        report.notes = self.notes;
        Ok(report)
    }

    fn applies(&self, check: CheckKind) -> bool {
        match check {
            CheckKind::UseFolders => self.config.use_folders,
            CheckKind::CustomNames => self.config.use_custom_names,
            _ => true,
        }
    }

    fn note(&mut self, check: CheckKind, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(check = %check, "{message}");
        self.notes.push(ValidationNote { check, message });
    }

    /// Shows a blocking error to the user and fails the check.
    fn block(
        &mut self,
        failure: ValidationFailure,
        title: &str,
    ) -> Result<CheckOutcome> {
        self.provider.notify(title, &failure.message)?;
        Ok(Err(failure))
    }

    fn check_base_path(&mut self) -> Result<CheckOutcome> {
        if self.config.base_file_path.is_empty() {
            return self.block(
                ValidationFailure::blocked(
                    CheckKind::BasePath,
                    "The file path field is empty! Cannot continue import!",
                ),
                "Error: File Path Empty",
            );
        }

        if !Path::new(&self.config.base_file_path).is_dir() {
            let failure = ValidationFailure::blocked(
                CheckKind::BasePath,
                format!(
                    "The file path specified for import does not exist: {}",
                    self.config.base_file_path
                ),
            )
            .with_suggestion("Point the base path at the folder containing the exported files");
            return self.block(failure, "Error: File Path Does Not Exist");
        }

        if ensure_trailing_separator(&mut self.config.base_file_path) {
            self.note(CheckKind::BasePath, "Added separator to the end of the base path");
        }

        Ok(Ok(()))
    }

    fn check_use_folders(&mut self) -> Result<CheckOutcome> {
        if self.config.xml_folder.is_empty() {
            let prompt = Prompt::confirm(
                "Error: Use Folders True But XML Folder Empty",
                "'Use Folders' is on but the XML folder field is empty. Do you want to use folders?\n\n\
                 Yes: Return to importer\nNo: Continue import without folders",
                "Yes",
                "No",
            );

            if self.provider.confirm(&prompt)? {
                return Ok(Err(ValidationFailure::declined(
                    CheckKind::UseFolders,
                    "XML folder is empty",
                )
                .with_suggestion("Enter the XML subfolder or turn off 'Use Folders'")));
            }

            self.config.use_folders = false;
            self.note(CheckKind::UseFolders, "Turned off 'Use Folders'");
            return Ok(Ok(()));
        }

        if ensure_trailing_separator(&mut self.config.xml_folder) {
            self.note(CheckKind::UseFolders, "Added separator to the end of the XML folder");
        }

        Ok(Ok(()))
    }

    fn check_keyword_handling(&mut self) -> Result<CheckOutcome> {
        if self.keywords.is_empty() {
            return self.block(
                ValidationFailure::blocked(
                    CheckKind::KeywordHandling,
                    "There are no keywords specified in the importer! Cannot continue import!",
                )
                .with_suggestion("Add at least one keyword"),
                "Error: No Keywords",
            );
        }

        // Set once the user accepts NONE handlers; lasts for this pass only.
        let mut ignore_none_handlers = false;
        let registry = self.keywords;
        let keywords: &[KeywordEntry] = registry.entries();

        for (idx, entry) in keywords.iter().enumerate() {
            if entry.is_blank() {
                return self.block(
                    ValidationFailure::blocked(
                        CheckKind::KeywordHandling,
                        "Not all keyword fields have words specified! Cannot continue import!",
                    )
                    .with_suggestion(format!("Keyword #{idx} is empty")),
                    "Error: Not All Keywords Valid",
                );
            }

            if entry.handler.is_none() && !ignore_none_handlers {
                let prompt = Prompt::confirm(
                    "Error: Not All Handlers Valid",
                    format!(
                        "Keyword '{}' has no handler. Would you like to continue the import?\n\n\
                         NOTE: Keywords with handler 'NONE' only have their files saved; they are \
                         not created in the scene and get no components.\n\n\
                         Yes: Continue import\nNo: Stop import",
                        entry.keyword
                    ),
                    "Yes",
                    "No",
                );

                if !self.provider.confirm(&prompt)? {
                    return Ok(Err(ValidationFailure::declined(
                        CheckKind::KeywordHandling,
                        format!("Keyword '{}' has no handler", entry.keyword),
                    )));
                }

                ignore_none_handlers = true;
                self.note(
                    CheckKind::KeywordHandling,
                    "Accepted keywords without a handler (files only)",
                );
            }
        }

        Ok(Ok(()))
    }

    fn check_destination(&mut self, check: CheckKind) -> Result<CheckOutcome> {
        let (label, current) = match check {
            CheckKind::ScenePath => ("Scene", self.config.scene_file_path.clone()),
            _ => ("Image", self.config.image_file_path.clone()),
        };
        tracing::debug!("{label} file path before check: {current}");

        let project = self.project;
        let marker = project.root_marker.as_str();

        let updated = if current.is_empty() {
            let default = match check {
                CheckKind::ScenePath => format!("{marker}/"),
                _ => {
                    let mut data_dir = project.data_dir.clone();
                    ensure_trailing_separator(&mut data_dir);
                    data_dir
                }
            };

            let prompt = Prompt::confirm(
                format!("Error: {label} File Path is Empty"),
                format!(
                    "The {} file path field is empty! Do you want to save everything to the '{marker}' folder?\n\n\
                     Yes: Save to '{default}'\nNo: Return to importer",
                    label.to_lowercase()
                ),
                "Yes",
                "No",
            );

            if !self.provider.confirm(&prompt)? {
                return Ok(Err(ValidationFailure::declined(
                    check,
                    format!("{label} file path is empty"),
                )));
            }

            self.note(check, format!("{label} file path defaulted to '{default}'"));
            default
        } else {
            let normalized = normalize_project_path(&current, marker);
            if normalized != current {
                self.note(
                    check,
                    format!("{label} file path normalized from '{current}' to '{normalized}'"),
                );
            }
            normalized
        };

        match check {
            CheckKind::ScenePath => self.config.scene_file_path = updated,
            _ => self.config.image_file_path = updated,
        }

        Ok(Ok(()))
    }

    fn check_custom_names(&mut self) -> Result<CheckOutcome> {
        if self.config.custom_scene_name.is_empty() {
            if let Some(outcome) = self.resolve_missing_name("Scene")? {
                return Ok(outcome);
            }
        }

        if self.config.use_custom_names && self.config.custom_image_name.is_empty() {
            if let Some(outcome) = self.resolve_missing_name("Image")? {
                return Ok(outcome);
            }
        }

        Ok(Ok(()))
    }

    /// Asks what to do about an empty custom name.
    ///
    /// Returns `Some` when the answer settles the whole check. Only an
    /// unrecognized answer falls through to the next name.
    fn resolve_missing_name(&mut self, label: &str) -> Result<Option<CheckOutcome>> {
        let lower = label.to_lowercase();
        let prompt = Prompt::choice(
            format!("Error: Use Custom Names True But Custom {label} Name Empty"),
            format!(
                "'Use Custom Names' is on but the custom {lower} name field is empty.\n\n\
                 Do you want to:\nAdd a custom {lower} name (Return)\n\
                 Turn off 'Use Custom Names' (Turn Off)\nNot use a custom {lower} name (Don't Use)"
            ),
            ["Return", "Turn Off", "Don't Use"],
        );

        let answer = self.provider.choose(&prompt)?;
        match MissingNameChoice::from_index(answer) {
            Some(MissingNameChoice::Return) => Ok(Some(Err(ValidationFailure::declined(
                CheckKind::CustomNames,
                format!("Custom {lower} name is empty"),
            )))),
            Some(MissingNameChoice::TurnOff) => {
                self.config.use_custom_names = false;
                self.note(CheckKind::CustomNames, "Turned off 'Use Custom Names'");
                Ok(Some(Ok(())))
            }
            Some(MissingNameChoice::DontUse) => {
                self.note(
                    CheckKind::CustomNames,
                    format!("Continuing without a custom {lower} name"),
                );
                Ok(Some(Ok(())))
            }
            None => {
                tracing::warn!(answer, "unrecognized answer to custom name prompt");
                Ok(None)
            }
        }
    }
}
