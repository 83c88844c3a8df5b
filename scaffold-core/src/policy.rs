//! Render policy: which template files are copied verbatim.
//!
//! # Storage layout
//!
//! ```text
//! ~/.scaffold/
//!   policy.yaml   (optional; defaults apply when absent)
//! ```
//!
//! ```yaml
//! verbatim_extensions: [png, ico, woff2]
//! verbatim_paths:
//!   - assets/logo.svg
//! ```
//!
//! # API pattern
//!
//! - `load_at(home: &Path)` — explicit home; used in tests with `TempDir`
//! - `load()` — derives home from `dirs::home_dir()`, delegates to `load_at`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::RenderMode;

/// Extensions that are never parsed as templates unless a policy says otherwise.
pub const DEFAULT_VERBATIM_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "ico", "webp", "bmp", "pdf", "zip", "gz", "tgz", "tar", "jar",
    "woff", "woff2", "ttf", "otf", "eot", "wasm", "so", "dll", "dylib", "exe", "bin",
];

/// Decides the [`RenderMode`] of each template file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderPolicy {
    /// File extensions (without the dot, case-insensitive) copied byte-for-byte.
    pub verbatim_extensions: Vec<String>,
    /// Exact tree-relative paths copied byte-for-byte.
    pub verbatim_paths: Vec<PathBuf>,
}

impl Default for RenderPolicy {
    fn default() -> Self {
        Self {
            verbatim_extensions: DEFAULT_VERBATIM_EXTENSIONS
                .iter()
                .map(|e| (*e).to_string())
                .collect(),
            verbatim_paths: Vec::new(),
        }
    }
}

impl RenderPolicy {
    /// A policy that renders every file as a template.
    pub fn template_everything() -> Self {
        Self {
            verbatim_extensions: Vec::new(),
            verbatim_paths: Vec::new(),
        }
    }

    /// Append an extension; a leading `.` is ignored.
    pub fn add_verbatim_extension(&mut self, ext: &str) {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        if !ext.is_empty() && !self.verbatim_extensions.contains(&ext) {
            self.verbatim_extensions.push(ext);
        }
    }

    /// Mode for a file at `rel_path` (relative to the template root).
    pub fn mode_for(&self, rel_path: &Path) -> RenderMode {
        if self.verbatim_paths.iter().any(|p| p == rel_path) {
            return RenderMode::Verbatim;
        }
        let ext = rel_path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext {
            Some(ext)
                if self
                    .verbatim_extensions
                    .iter()
                    .any(|v| v.trim_start_matches('.').eq_ignore_ascii_case(&ext)) =>
            {
                RenderMode::Verbatim
            }
            _ => RenderMode::Template,
        }
    }
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// `<home>/.scaffold/policy.yaml` — pure, no I/O.
pub fn policy_path_at(home: &Path) -> PathBuf {
    home.join(".scaffold").join("policy.yaml")
}

/// Load a policy from an explicit YAML file.
///
/// Returns `CoreError::PolicyNotFound` if absent,
/// `CoreError::Parse` (with path + line context) if malformed YAML.
pub fn load_from(path: &Path) -> Result<RenderPolicy, CoreError> {
    if !path.exists() {
        return Err(CoreError::PolicyNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(|e| CoreError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load `<home>/.scaffold/policy.yaml`, falling back to defaults when absent.
pub fn load_at(home: &Path) -> Result<RenderPolicy, CoreError> {
    let path = policy_path_at(home);
    if !path.exists() {
        return Ok(RenderPolicy::default());
    }
    load_from(&path)
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<RenderPolicy, CoreError> {
    load_at(&home()?)
}

fn home() -> Result<PathBuf, CoreError> {
    dirs::home_dir().ok_or(CoreError::HomeNotFound)
}
