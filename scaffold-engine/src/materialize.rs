//! Tree materialization.
//!
//! ## Per-entry protocol
//!
//! 1. Map the tree-relative path onto the destination root.
//! 2. Directory: `create_dir` (never `create_dir_all`; the parent was created
//!    by an earlier entry or the run fails).
//! 3. File: render, `create_new` the destination, write all bytes, apply the
//!    source permission bits. The handle is dropped before the next entry.
//! 4. First error stops the walk. Nothing is rolled back: whatever was created
//!    before the failing entry stays on disk.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use scaffold_core::{RenderContext, RenderMode, TemplateEntry, TemplateTree};
use scaffold_renderer::ContentRenderer;

use crate::error::EngineError;
use crate::path_map::PathMapper;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Outcome of an individual tree entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EntryResult {
    /// Directory was created.
    CreatedDir { path: PathBuf },
    /// File was created with `bytes` of rendered content.
    CreatedFile {
        path: PathBuf,
        bytes: usize,
        mode: RenderMode,
    },
    /// Dry-run: the directory *would* have been created.
    WouldCreateDir { path: PathBuf },
    /// Dry-run: the file *would* have been created.
    WouldCreateFile {
        path: PathBuf,
        bytes: usize,
        mode: RenderMode,
    },
}

impl EntryResult {
    /// Tree-relative path of the entry.
    pub fn path(&self) -> &Path {
        match self {
            EntryResult::CreatedDir { path }
            | EntryResult::CreatedFile { path, .. }
            | EntryResult::WouldCreateDir { path }
            | EntryResult::WouldCreateFile { path, .. } => path,
        }
    }
}

/// Successful materialization: every tree entry in visit order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterializationReport {
    pub destination_root: PathBuf,
    pub dry_run: bool,
    pub entries: Vec<EntryResult>,
}

impl MaterializationReport {
    pub fn file_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    EntryResult::CreatedFile { .. } | EntryResult::WouldCreateFile { .. }
                )
            })
            .count()
    }
}

/// Knobs for a single [`materialize`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeOptions {
    /// Render every file but write nothing.
    pub dry_run: bool,
}

// ---------------------------------------------------------------------------
// materialize
// ---------------------------------------------------------------------------

/// Relative path reported for failures on the destination root itself.
pub const ROOT_PATH: &str = ".";

/// Recreate `tree` under `destination_root`, rendering files against `ctx`.
///
/// `destination_root` itself is created first and must not exist. Returns the
/// first error together with the tree-relative path being processed.
pub fn materialize(
    tree: &TemplateTree,
    destination_root: &Path,
    ctx: &RenderContext,
    options: MaterializeOptions,
) -> Result<MaterializationReport, EngineError> {
    let renderer = ContentRenderer::new(ctx).map_err(EngineError::Context)?;
    let mapper = PathMapper::new(destination_root);

    tracing::info!(
        destination = %destination_root.display(),
        entries = tree.len(),
        dry_run = options.dry_run,
        "materializing template tree"
    );

    if !options.dry_run {
        std::fs::create_dir(mapper.root()).map_err(|e| EngineError::DirectoryCreate {
            path: PathBuf::from(ROOT_PATH),
            source: e,
        })?;
    }

    let mut entries = Vec::with_capacity(tree.len());
    for entry in tree {
        let result = materialize_entry(entry, &mapper, &renderer, options)?;
        tracing::debug!(path = %result.path().display(), "entry done");
        entries.push(result);
    }

    tracing::info!(destination = %destination_root.display(), "materialization complete");
    Ok(MaterializationReport {
        destination_root: destination_root.to_path_buf(),
        dry_run: options.dry_run,
        entries,
    })
}

fn materialize_entry(
    entry: &TemplateEntry,
    mapper: &PathMapper,
    renderer: &ContentRenderer,
    options: MaterializeOptions,
) -> Result<EntryResult, EngineError> {
    match entry {
        TemplateEntry::Directory { path } => {
            if options.dry_run {
                return Ok(EntryResult::WouldCreateDir { path: path.clone() });
            }
            std::fs::create_dir(mapper.map(path)).map_err(|e| EngineError::DirectoryCreate {
                path: path.clone(),
                source: e,
            })?;
            Ok(EntryResult::CreatedDir { path: path.clone() })
        }
        TemplateEntry::File {
            path,
            contents,
            permissions,
            render,
        } => {
            let rendered = renderer
                .render(contents, *render)
                .map_err(|e| EngineError::Render {
                    path: path.clone(),
                    source: e,
                })?;
            if options.dry_run {
                return Ok(EntryResult::WouldCreateFile {
                    path: path.clone(),
                    bytes: rendered.len(),
                    mode: *render,
                });
            }
            write_new_file(&mapper.map(path), path, &rendered, *permissions)?;
            Ok(EntryResult::CreatedFile {
                path: path.clone(),
                bytes: rendered.len(),
                mode: *render,
            })
        }
    }
}

/// Create `dest` (which must not exist), write `bytes`, apply `permissions`.
///
/// `rel` is only used for error reporting.
fn write_new_file(
    dest: &Path,
    rel: &Path,
    bytes: &[u8],
    permissions: u32,
) -> Result<(), EngineError> {
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dest)
        .map_err(|e| EngineError::FileCreate {
            path: rel.to_path_buf(),
            source: e,
        })?;

    let write_err = |e| EngineError::FileWrite {
        path: rel.to_path_buf(),
        source: e,
    };
    file.write_all(bytes).map_err(write_err)?;
    apply_permissions(&file, permissions).map_err(write_err)?;
    Ok(())
}

#[cfg(unix)]
fn apply_permissions(file: &std::fs::File, permissions: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(permissions))
}

#[cfg(not(unix))]
fn apply_permissions(_file: &std::fs::File, _permissions: u32) -> std::io::Result<()> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
