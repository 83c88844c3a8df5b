//! Pre-flight checks run before materialization starts.
//!
//! The checks are advisory: no lock is held between validation and the first
//! write, so a destination created in between surfaces later as
//! [`EngineError::DirectoryCreate`] instead.

use std::io;
use std::path::Path;

use crate::error::{io_err, EngineError};

/// Validate a (source, destination) pair.
///
/// Checks, in order:
/// 1. `source_root` exists and is a directory.
/// 2. `destination_root` does not exist (any type, dangling symlinks included).
/// 3. The parent of `destination_root` exists and is a directory.
pub fn validate(source_root: &Path, destination_root: &Path) -> Result<(), EngineError> {
    match std::fs::metadata(source_root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(EngineError::SourceNotADirectory {
                path: source_root.to_path_buf(),
            })
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(EngineError::SourceNotFound {
                path: source_root.to_path_buf(),
            })
        }
        Err(e) => return Err(io_err(source_root, e)),
    }

    match std::fs::symlink_metadata(destination_root) {
        Ok(_) => {
            return Err(EngineError::DestinationAlreadyExists {
                path: destination_root.to_path_buf(),
            })
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            // ENOTDIR: some parent component is not a directory.
            check_parent(destination_root)?;
            return Err(io_err(destination_root, e));
        }
    }

    check_parent(destination_root)
}

fn check_parent(destination_root: &Path) -> Result<(), EngineError> {
    let parent = match destination_root.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        Some(_) => Path::new("."),
        None => {
            return Err(EngineError::DestinationParentInvalid {
                path: destination_root.to_path_buf(),
            })
        }
    };
    match std::fs::metadata(parent) {
        Ok(meta) if meta.is_dir() => Ok(()),
        _ => Err(EngineError::DestinationParentInvalid {
            path: parent.to_path_buf(),
        }),
    }
}
