//! Source-relative to destination path mapping.

use std::path::{Component, Path, PathBuf};

/// Maps tree-relative paths onto a destination root, preserving hierarchy.
///
/// Pure: no I/O, no failure. Relative paths come from a
/// [`TemplateTree`](scaffold_core::TemplateTree), which only admits
/// tree-internal paths.
#[derive(Debug, Clone)]
pub struct PathMapper {
    root: PathBuf,
}

impl PathMapper {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        PathMapper { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `join(destination_root, rel)`.
    pub fn map(&self, rel: &Path) -> PathBuf {
        debug_assert!(
            rel.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir)),
            "non tree-internal path handed to PathMapper: {}",
            rel.display()
        );
        self.root.join(rel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_nested_paths_under_root() {
        let mapper = PathMapper::new("./out/widget");
        assert_eq!(
            mapper.map(Path::new("cmd/main.go")),
            PathBuf::from("./out/widget/cmd/main.go")
        );
        assert_eq!(mapper.map(Path::new("cmd")), PathBuf::from("./out/widget/cmd"));
    }

    #[test]
    fn absolute_root_is_preserved() {
        let mapper = PathMapper::new("/srv/api");
        assert_eq!(mapper.map(Path::new("go.mod")), PathBuf::from("/srv/api/go.mod"));
        assert_eq!(mapper.root(), Path::new("/srv/api"));
    }
}
