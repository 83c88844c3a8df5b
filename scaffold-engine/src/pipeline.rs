//! Shared scaffold pipeline entrypoint: validate, scan, materialize.

use std::path::PathBuf;

use scaffold_core::{MaterializationTarget, RenderContext, RenderPolicy, TemplateTree};

use crate::materialize::{materialize, MaterializationReport, MaterializeOptions};
use crate::staging::materialize_staged;
use crate::validate::validate;
use crate::EngineError;

/// How the destination is populated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Staging {
    /// Write straight into the destination; partial output stays on failure.
    #[default]
    InPlace,
    /// Write into a sibling staging directory and rename on success.
    Atomic,
}

/// Everything one scaffold run needs.
#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    pub template_root: PathBuf,
    pub target: MaterializationTarget,
    pub context: RenderContext,
    pub policy: RenderPolicy,
    pub staging: Staging,
    pub dry_run: bool,
}

impl ScaffoldRequest {
    /// Request with the `{Name, Location}` context, default policy, in place.
    pub fn new(template_root: impl Into<PathBuf>, target: MaterializationTarget) -> Self {
        let context = RenderContext::for_target(&target);
        ScaffoldRequest {
            template_root: template_root.into(),
            target,
            context,
            policy: RenderPolicy::default(),
            staging: Staging::default(),
            dry_run: false,
        }
    }
}

/// Run the pipeline for one request.
///
/// Dry runs validate and render everything but never touch the destination,
/// regardless of `staging`.
pub fn run(request: &ScaffoldRequest) -> Result<MaterializationReport, EngineError> {
    let destination_root = request.target.destination_root();
    validate(&request.template_root, &destination_root)?;

    let tree = TemplateTree::scan(&request.template_root, &request.policy)?;

    if request.dry_run {
        return materialize(
            &tree,
            &destination_root,
            &request.context,
            MaterializeOptions { dry_run: true },
        );
    }
    match request.staging {
        Staging::InPlace => materialize(
            &tree,
            &destination_root,
            &request.context,
            MaterializeOptions::default(),
        ),
        Staging::Atomic => materialize_staged(&tree, &destination_root, &request.context),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use scaffold_core::ProjectName;
    use tempfile::TempDir;

    use super::*;

    fn template(root: &TempDir) -> PathBuf {
        let dir = root.path().join("template");
        fs::create_dir_all(dir.join("cmd")).expect("mkdir");
        fs::write(dir.join("cmd/main.go"), "package main // {{ .Name }} in {{ .Location }}")
            .expect("write");
        dir
    }

    #[test]
    fn run_in_place_populates_destination() {
        let root = TempDir::new().expect("root");
        let target = MaterializationTarget::new(root.path(), ProjectName::from("widget")).unwrap();
        let request = ScaffoldRequest::new(template(&root), target);

        let report = run(&request).expect("run");
        assert_eq!(report.file_count(), 1);
        let main = fs::read_to_string(root.path().join("widget/cmd/main.go")).unwrap();
        assert_eq!(
            main,
            format!("package main // widget in {}", root.path().display())
        );
    }

    #[test]
    fn run_rejects_existing_destination_before_writing() {
        let root = TempDir::new().expect("root");
        fs::create_dir(root.path().join("widget")).unwrap();
        let target = MaterializationTarget::new(root.path(), ProjectName::from("widget")).unwrap();
        let err = run(&ScaffoldRequest::new(template(&root), target)).unwrap_err();

        assert!(matches!(err, EngineError::DestinationAlreadyExists { .. }), "got: {err}");
        assert!(!root.path().join("widget/cmd").exists());
    }

    #[test]
    fn dry_run_ignores_staging_and_writes_nothing() {
        let root = TempDir::new().expect("root");
        let target = MaterializationTarget::new(root.path(), ProjectName::from("widget")).unwrap();
        let mut request = ScaffoldRequest::new(template(&root), target);
        request.dry_run = true;
        request.staging = Staging::Atomic;

        let report = run(&request).expect("run");
        assert!(report.dry_run);
        assert!(!root.path().join("widget").exists());
    }
}
