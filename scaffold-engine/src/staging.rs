//! Staged (all-or-nothing) materialization.
//!
//! 1. Materialize into `<parent>/.<name>.scaffold.tmp`.
//! 2. On success, rename the staging directory to the destination root
//!    (same parent, so same filesystem).
//! 3. On failure, remove the staging directory; the destination root is
//!    never created.

use std::io;
use std::path::{Path, PathBuf};

use scaffold_core::{RenderContext, TemplateTree};

use crate::error::{io_err, EngineError};
use crate::materialize::{materialize, MaterializationReport, MaterializeOptions, ROOT_PATH};

/// `<parent>/.<name>.scaffold.tmp` — pure, no I/O.
pub fn staging_path(destination_root: &Path) -> PathBuf {
    let name = destination_root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string());
    destination_root.with_file_name(format!(".{name}.scaffold.tmp"))
}

/// Materialize `tree` so that `destination_root` either appears fully
/// populated or not at all.
pub fn materialize_staged(
    tree: &TemplateTree,
    destination_root: &Path,
    ctx: &RenderContext,
) -> Result<MaterializationReport, EngineError> {
    let staging = staging_path(destination_root);
    reject_existing(&staging)?;

    let mut report = match materialize(tree, &staging, ctx, MaterializeOptions::default()) {
        Ok(report) => report,
        Err(err) => {
            // A failed root create means the staging dir is not ours to remove.
            if err.relative_path() != Some(Path::new(ROOT_PATH)) {
                remove_staging(&staging);
            }
            return Err(err);
        }
    };

    if let Err(err) = reject_existing(destination_root) {
        remove_staging(&staging);
        return Err(err);
    }
    if let Err(e) = std::fs::rename(&staging, destination_root) {
        remove_staging(&staging);
        return Err(EngineError::Staging {
            path: destination_root.to_path_buf(),
            source: e,
        });
    }

    tracing::info!(
        staging = %staging.display(),
        destination = %destination_root.display(),
        "staged tree moved into place"
    );
    report.destination_root = destination_root.to_path_buf();
    Ok(report)
}

fn reject_existing(path: &Path) -> Result<(), EngineError> {
    match std::fs::symlink_metadata(path) {
        Ok(_) => Err(EngineError::DestinationAlreadyExists {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(io_err(path, e)),
    }
}

fn remove_staging(staging: &Path) {
    match std::fs::remove_dir_all(staging) {
        Ok(()) => tracing::debug!(path = %staging.display(), "staging directory removed"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(path = %staging.display(), error = %e, "failed to remove staging directory")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaffold_core::RenderMode;
    use std::fs;
    use tempfile::TempDir;

    fn tree(body: &str) -> TemplateTree {
        let mut tree = TemplateTree::new();
        tree.push_dir("cmd").unwrap();
        tree.push_file("cmd/main.go", body, RenderMode::Template).unwrap();
        tree
    }

    fn ctx() -> RenderContext {
        let mut ctx = RenderContext::new();
        ctx.insert("Name", "widget");
        ctx
    }

    #[test]
    fn staging_path_is_hidden_sibling() {
        assert_eq!(
            staging_path(Path::new("/out/widget")),
            PathBuf::from("/out/.widget.scaffold.tmp")
        );
    }

    #[test]
    fn success_moves_tree_into_place() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("widget");
        let report = materialize_staged(&tree("// {{ .Name }}"), &dest, &ctx()).expect("staged");

        assert_eq!(report.destination_root, dest);
        assert_eq!(fs::read_to_string(dest.join("cmd/main.go")).unwrap(), "// widget");
        assert!(!staging_path(&dest).exists(), "staging dir must be gone");
    }

    #[test]
    fn failure_leaves_nothing_behind() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("widget");
        let err = materialize_staged(&tree("// {{ .Missing }}"), &dest, &ctx()).unwrap_err();

        assert!(err.is_undefined_variable(), "got: {err}");
        assert_eq!(err.relative_path(), Some(Path::new("cmd/main.go")));
        assert!(!dest.exists());
        assert!(!staging_path(&dest).exists());
    }

    #[test]
    fn leftover_staging_dir_is_rejected_and_kept() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("widget");
        let staging = staging_path(&dest);
        fs::create_dir(&staging).unwrap();
        fs::write(staging.join("keep.txt"), "mine").unwrap();

        let err = materialize_staged(&tree("x"), &dest, &ctx()).unwrap_err();
        assert!(matches!(err, EngineError::DestinationAlreadyExists { .. }), "got: {err}");
        assert!(staging.join("keep.txt").exists());
    }
}
