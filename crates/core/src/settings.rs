use crate::error::{GalahError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_LANGUAGE_ID: &str = "galah";
pub const DEFAULT_KEYWORDS: [&str; 3] = ["enum", "struct", "class"];
pub const FILE_EXTENSION: &str = ".galah";

/// How a `>` without an open `<` before it is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnmatchedClose {
    /// A `>` with no open `<` emits nothing, and emitting a token closes its
    /// `<`, so `<a> b>` yields only `a`. A `<` is never reused.
    #[default]
    Ignore,
    /// Delimit from column 0 and keep reusing the last `<`. This is the
    /// behavior of the first galah editor extension.
    LineStart,
}

/// Which declarations on a single line take part in resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeclarationsPerLine {
    #[default]
    First,
    All,
}

/// Runtime options, read from a JSON file, `initializationOptions`, or
/// `workspace/didChangeConfiguration`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Settings {
    pub language_id: String,
    pub keywords: Vec<String>,
    pub unmatched_close: UnmatchedClose,
    pub declarations_per_line: DeclarationsPerLine,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language_id: DEFAULT_LANGUAGE_ID.to_string(),
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            unmatched_close: UnmatchedClose::default(),
            declarations_per_line: DeclarationsPerLine::default(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&raw)?;
        settings.validate()
    }

    /// Layers the fields present in `overrides` on top of `self`.
    /// `null` leaves the settings unchanged.
    pub fn merged(&self, overrides: &serde_json::Value) -> Result<Self> {
        let overrides = match overrides {
            serde_json::Value::Null => return Ok(self.clone()),
            serde_json::Value::Object(map) => map,
            other => {
                return Err(GalahError::Config(format!(
                    "expected a settings object, got {}",
                    other
                )));
            }
        };

        let mut base = serde_json::to_value(self)?;
        if let serde_json::Value::Object(fields) = &mut base {
            for (key, value) in overrides {
                fields.insert(key.clone(), value.clone());
            }
        }

        let settings: Settings = serde_json::from_value(base)?;
        settings.validate()
    }

    pub fn validate(self) -> Result<Self> {
        if self.language_id.trim().is_empty() {
            return Err(GalahError::Config("languageId must not be empty".into()));
        }
        if self.keywords.is_empty() {
            return Err(GalahError::Config("keywords must not be empty".into()));
        }
        if let Some(bad) = self
            .keywords
            .iter()
            .find(|k| k.is_empty() || k.contains(char::is_whitespace) || k.contains('"'))
        {
            return Err(GalahError::Config(format!(
                "invalid keyword {:?}: keywords must be non-empty and contain no spaces or quotes",
                bad
            )));
        }
        Ok(self)
    }

    /// Whether a document belongs to this server.
    pub fn accepts(&self, language_id: &str, uri: &str) -> bool {
        language_id == self.language_id || uri.ends_with(FILE_EXTENSION)
    }
}
