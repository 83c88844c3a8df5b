//! Domain types for template materialization.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed name for the project being generated.
///
/// Becomes the last component of the destination root, so it must be a single
/// normal path component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectName(pub String);

impl ProjectName {
    /// Reject names that are empty, contain separators, or are `.` / `..`.
    pub fn validate(&self) -> Result<(), CoreError> {
        let invalid = || CoreError::InvalidProjectName {
            name: self.0.clone(),
        };
        if self.0.is_empty() || self.0.contains('/') || self.0.contains('\\') {
            return Err(invalid());
        }
        let mut components = Path::new(&self.0).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(()),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProjectName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// How a single file's bytes are turned into destination bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Expand placeholders against the render context.
    #[default]
    Template,
    /// Byte-for-byte copy.
    Verbatim,
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::Template => write!(f, "template"),
            RenderMode::Verbatim => write!(f, "verbatim"),
        }
    }
}

// ---------------------------------------------------------------------------
// Render context
// ---------------------------------------------------------------------------

/// Named string values available to templates.
///
/// Ordered so that serialized output (and error messages listing keys) is
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderContext(BTreeMap<String, String>);

impl RenderContext {
    pub const NAME: &'static str = "Name";
    pub const LOCATION: &'static str = "Location";

    /// An empty context. Any placeholder rendered against it is undefined.
    pub fn new() -> Self {
        Self::default()
    }

    /// The minimal context for a target: `{Name, Location}`.
    pub fn for_target(target: &MaterializationTarget) -> Self {
        let mut vars = BTreeMap::new();
        vars.insert(Self::NAME.to_string(), target.name.0.clone());
        vars.insert(
            Self::LOCATION.to_string(),
            target.location.display().to_string(),
        );
        Self(vars)
    }

    /// Insert a raw value, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Add a user-supplied variable. Reserved and malformed names are rejected.
    pub fn add_var(&mut self, key: &str, value: impl Into<String>) -> Result<(), CoreError> {
        if key == Self::NAME || key == Self::LOCATION {
            return Err(CoreError::ReservedVariable {
                name: key.to_string(),
            });
        }
        if !is_identifier(key) {
            return Err(CoreError::InvalidVariableName {
                name: key.to_string(),
            });
        }
        self.0.insert(key.to_string(), value.into());
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ---------------------------------------------------------------------------
// Target
// ---------------------------------------------------------------------------

/// Where a project is generated: `<location>/<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterializationTarget {
    /// Absolute or relative parent directory.
    pub location: PathBuf,
    pub name: ProjectName,
}

impl MaterializationTarget {
    pub fn new(location: impl Into<PathBuf>, name: ProjectName) -> Result<Self, CoreError> {
        name.validate()?;
        Ok(Self {
            location: location.into(),
            name,
        })
    }

    /// `join(location, name)`.
    pub fn destination_root(&self) -> PathBuf {
        self.location.join(&self.name.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
