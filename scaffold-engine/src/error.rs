//! Error types for scaffold-engine.

use std::path::{Path, PathBuf};

use thiserror::Error;

use scaffold_core::CoreError;
use scaffold_renderer::RenderError;

/// All errors that can arise from validating or materializing a project.
///
/// The first four variants are pre-flight failures; nothing has been written
/// when they are returned. The materialization variants carry the
/// tree-relative path of the entry being processed (`.` for the root).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("template source {path} does not exist")]
    SourceNotFound { path: PathBuf },

    #[error("template source {path} is not a directory")]
    SourceNotADirectory { path: PathBuf },

    #[error("destination {path} already exists")]
    DestinationAlreadyExists { path: PathBuf },

    #[error("destination parent {path} is not an existing directory")]
    DestinationParentInvalid { path: PathBuf },

    /// Unexpected failure while inspecting a path during pre-flight.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory '{path}': {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create file '{path}': {source}")]
    FileCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render '{path}': {source}")]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The render context could not be prepared; no entry was processed.
    #[error("render context error: {0}")]
    Context(#[source] RenderError),

    /// Moving a staged tree into place failed.
    #[error("failed to move staged tree into {path}: {source}")]
    Staging {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template scanning or target construction failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl EngineError {
    /// Tree-relative path at which materialization stopped, if any.
    pub fn relative_path(&self) -> Option<&Path> {
        match self {
            EngineError::DirectoryCreate { path, .. }
            | EngineError::FileCreate { path, .. }
            | EngineError::Render { path, .. }
            | EngineError::FileWrite { path, .. } => Some(path),
            _ => None,
        }
    }

    /// `true` for the variable-lookup failure of a template file.
    pub fn is_undefined_variable(&self) -> bool {
        matches!(
            self,
            EngineError::Render {
                source: RenderError::UndefinedVariable { .. },
                ..
            }
        )
    }
}

/// Convenience constructor for [`EngineError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> EngineError {
    EngineError::Io {
        path: path.into(),
        source,
    }
}
