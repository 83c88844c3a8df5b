//! Error types for scaffold-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from building or loading core scaffold data.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse render policy at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// An explicitly requested policy file did not exist.
    #[error("render policy not found at {path}")]
    PolicyNotFound { path: PathBuf },

    /// `dirs::home_dir()` returned `None` — cannot locate `~/.scaffold/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// A template entry path would escape the tree (absolute, `..`, or empty).
    #[error("template path {path} is not a relative path inside the tree")]
    UnsafePath { path: PathBuf },

    /// The project name cannot be used as a single directory name.
    #[error("invalid project name '{name}': must be a single non-empty path component")]
    InvalidProjectName { name: String },

    /// `Name` and `Location` are derived from the target and cannot be overridden.
    #[error("context variable '{name}' is reserved")]
    ReservedVariable { name: String },

    /// A context variable name that templates could never reference.
    #[error("invalid context variable name '{name}'")]
    InvalidVariableName { name: String },

    /// Traversal of the template directory failed.
    #[error("failed to walk template tree at {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A template file could not be read.
    #[error("failed to read template file {path}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
