//! Handler kinds and the catalog that declares them.
//!
//! A handler kind describes what scene setup an imported, keyword-matched
//! asset receives. Kinds are string-keyed so that new ones can be declared in
//! the configuration file without recompiling.

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the "unset" handler kind.
pub const NONE_HANDLER: &str = "NONE";

/// A handler kind, stored as its upper-case name (e.g. "GROUND").
///
/// Deserialization goes through [`HandlerKind::new`], so names read from
/// files are upper-cased too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct HandlerKind(String);

impl HandlerKind {
    /// The "unset" kind. Keywords with this handler only have their files saved.
    #[must_use]
    pub fn none() -> Self {
        Self(NONE_HANDLER.to_string())
    }

    /// Creates a kind from a name, upper-casing it.
    ///
    /// This does not check that the kind is declared anywhere; use
    /// [`HandlerCatalog::str_to_type`] for lookups.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().to_uppercase())
    }

    /// Returns the textual name of the kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the "unset" kind.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.0 == NONE_HANDLER
    }
}

impl Default for HandlerKind {
    fn default() -> Self {
        Self::none()
    }
}

impl From<String> for HandlerKind {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<HandlerKind> for String {
    fn from(kind: HandlerKind) -> Self {
        kind.0
    }
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Declaration of a handler kind with its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerDefinition {
    /// Upper-case name (e.g. "PLATFORM")
    pub name: String,
    /// Short description shown in listings
    #[serde(default)]
    pub description: String,
    /// Whether matched assets are created in the scene (false = files only)
    #[serde(default = "default_places_in_scene")]
    pub places_in_scene: bool,
}

fn default_places_in_scene() -> bool {
    true
}

impl HandlerDefinition {
    /// Creates a new definition with validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not upper-case snake case
    /// (`^[A-Z][A-Z0-9_]*$`).
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        places_in_scene: bool,
    ) -> Result<Self> {
        let definition = Self {
            name: name.into(),
            description: description.into(),
            places_in_scene,
        };
        definition.validate()?;
        Ok(definition)
    }

    /// Checks the name format.
    pub fn validate(&self) -> Result<()> {
        let name_regex = Regex::new(r"^[A-Z][A-Z0-9_]*$")?;
        if !name_regex.is_match(&self.name) {
            anyhow::bail!(
                "Handler name '{}' must be upper-case letters, digits and underscores, starting with a letter",
                self.name
            );
        }
        Ok(())
    }

    /// Returns the kind this definition declares.
    #[must_use]
    pub fn kind(&self) -> HandlerKind {
        HandlerKind::new(&self.name)
    }

    fn builtin(name: &str, description: &str, places_in_scene: bool) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            places_in_scene,
        }
    }
}

/// Ordered catalog of declared handler kinds.
///
/// Declaration order matters: the layer table is rebuilt in this order.
/// The built-in kinds always come first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerCatalog {
    definitions: Vec<HandlerDefinition>,
}

impl HandlerCatalog {
    /// Creates a catalog containing only the built-in kinds.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            definitions: vec![
                HandlerDefinition::builtin(
                    NONE_HANDLER,
                    "No handler; files are saved but not placed in the scene",
                    false,
                ),
                HandlerDefinition::builtin("PLATFORM", "One-way platform with an edge collider", true),
                HandlerDefinition::builtin("GROUND", "Solid ground with a polygon collider", true),
                HandlerDefinition::builtin("SCENERY", "Decoration without a collider", true),
            ],
        }
    }

    /// Creates a catalog of built-ins extended with custom definitions.
    ///
    /// # Errors
    ///
    /// Returns an error if a custom name is malformed or already declared.
    pub fn with_custom(custom: &[HandlerDefinition]) -> Result<Self> {
        let mut catalog = Self::builtin();
        for definition in custom {
            catalog.declare(definition.clone())?;
        }
        Ok(catalog)
    }

    /// Appends a new handler kind to the catalog.
    pub fn declare(&mut self, definition: HandlerDefinition) -> Result<()> {
        definition.validate()?;
        if self.contains(&definition.kind()) {
            anyhow::bail!("Handler '{}' is already declared", definition.name);
        }
        self.definitions.push(definition);
        Ok(())
    }

    /// Returns true if the kind is declared.
    #[must_use]
    pub fn contains(&self, kind: &HandlerKind) -> bool {
        self.get(kind).is_some()
    }

    /// Looks up the definition of a kind.
    #[must_use]
    pub fn get(&self, kind: &HandlerKind) -> Option<&HandlerDefinition> {
        self.definitions.iter().find(|d| d.name == kind.as_str())
    }

    /// Iterates over the declared kinds in declaration order.
    pub fn kinds(&self) -> impl Iterator<Item = HandlerKind> + '_ {
        self.definitions.iter().map(HandlerDefinition::kind)
    }

    /// Returns all definitions in declaration order.
    #[must_use]
    pub fn definitions(&self) -> &[HandlerDefinition] {
        &self.definitions
    }

    /// Returns the textual name of a kind.
    #[must_use]
    pub fn type_to_str(kind: &HandlerKind) -> String {
        kind.as_str().to_string()
    }

    /// Parses a kind from text, case-insensitively.
    ///
    /// Unrecognized text, including names with surrounding whitespace, maps
    /// to the "unset" kind rather than an error.
    #[must_use]
    pub fn str_to_type(&self, text: &str) -> HandlerKind {
        let candidate = HandlerKind::new(text);
        if self.contains(&candidate) {
            candidate
        } else {
            HandlerKind::none()
        }
    }
}

impl Default for HandlerCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
