//! The read-only template tree.
//!
//! Entries are kept in visit order: a directory always precedes everything
//! beneath it, and siblings are sorted by file name. Materialization walks the
//! entries front to back, so this order decides both the destination layout and
//! the point of failure when a run aborts.

use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::error::CoreError;
use crate::policy::RenderPolicy;
use crate::types::RenderMode;

/// Permission bits applied to files that carry no mode of their own.
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o644;

/// One directory or file of a [`TemplateTree`]. Paths are tree-relative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateEntry {
    Directory {
        path: PathBuf,
    },
    File {
        path: PathBuf,
        contents: Vec<u8>,
        /// Unix permission bits (`0o7777` mask).
        permissions: u32,
        render: RenderMode,
    },
}

impl TemplateEntry {
    pub fn path(&self) -> &Path {
        match self {
            TemplateEntry::Directory { path } | TemplateEntry::File { path, .. } => path,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, TemplateEntry::Directory { .. })
    }
}

/// Ordered sequence of template entries, root excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateTree {
    entries: Vec<TemplateEntry>,
}

impl TemplateTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a directory entry.
    pub fn push_dir(&mut self, path: impl AsRef<Path>) -> Result<(), CoreError> {
        let path = tree_relative(path.as_ref())?;
        self.entries.push(TemplateEntry::Directory { path });
        Ok(())
    }

    /// Append a file entry with [`DEFAULT_FILE_PERMISSIONS`].
    pub fn push_file(
        &mut self,
        path: impl AsRef<Path>,
        contents: impl Into<Vec<u8>>,
        render: RenderMode,
    ) -> Result<(), CoreError> {
        self.push_file_with_permissions(path, contents, DEFAULT_FILE_PERMISSIONS, render)
    }

    pub fn push_file_with_permissions(
        &mut self,
        path: impl AsRef<Path>,
        contents: impl Into<Vec<u8>>,
        permissions: u32,
        render: RenderMode,
    ) -> Result<(), CoreError> {
        let path = tree_relative(path.as_ref())?;
        self.entries.push(TemplateEntry::File {
            path,
            contents: contents.into(),
            permissions: permissions & 0o7777,
            render,
        });
        Ok(())
    }

    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TemplateEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a tree from a directory on disk.
    ///
    /// Symlinks are not followed; they and other special files are skipped.
    /// Every regular file is read fully and tagged with the mode `policy`
    /// chooses for its relative path.
    pub fn scan(root: &Path, policy: &RenderPolicy) -> Result<Self, CoreError> {
        let mut tree = TemplateTree::new();
        let walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| CoreError::Walk {
                path: e.path().unwrap_or(root).to_path_buf(),
                source: e,
            })?;
            let rel = entry
                .path()
                .strip_prefix(root)
                .map_err(|_| CoreError::UnsafePath {
                    path: entry.path().to_path_buf(),
                })?;
            let file_type = entry.file_type();

            if file_type.is_dir() {
                tree.push_dir(rel)?;
            } else if file_type.is_file() {
                let contents = std::fs::read(entry.path()).map_err(|e| CoreError::SourceRead {
                    path: entry.path().to_path_buf(),
                    source: e,
                })?;
                let metadata = entry.metadata().map_err(|e| CoreError::Walk {
                    path: entry.path().to_path_buf(),
                    source: e,
                })?;
                tree.push_file_with_permissions(
                    rel,
                    contents,
                    permissions_of(&metadata),
                    policy.mode_for(rel),
                )?;
            } else {
                tracing::warn!(path = %entry.path().display(), "skipping non-regular template entry");
            }
        }

        tracing::debug!(root = %root.display(), entries = tree.len(), "scanned template tree");
        Ok(tree)
    }
}

impl<'a> IntoIterator for &'a TemplateTree {
    type Item = &'a TemplateEntry;
    type IntoIter = std::slice::Iter<'a, TemplateEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Normalise `path` to a tree-internal relative path.
///
/// `.` components are dropped; absolute paths, prefixes, `..` and paths that
/// normalise to nothing are rejected.
pub fn tree_relative(path: &Path) -> Result<PathBuf, CoreError> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(CoreError::UnsafePath {
                    path: path.to_path_buf(),
                })
            }
        }
    }
    if out.as_os_str().is_empty() {
        return Err(CoreError::UnsafePath {
            path: path.to_path_buf(),
        });
    }
    Ok(out)
}

#[cfg(unix)]
fn permissions_of(metadata: &std::fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn permissions_of(_metadata: &std::fs::Metadata) -> u32 {
    DEFAULT_FILE_PERMISSIONS
}
