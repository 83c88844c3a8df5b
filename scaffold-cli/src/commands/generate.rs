//! `scaffold <location> <name>` — validate, then materialize the template.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use scaffold_core::{
    policy, CoreError, MaterializationTarget, ProjectName, RenderContext, RenderPolicy,
};
use scaffold_engine::{pipeline, EntryResult, MaterializationReport, ScaffoldRequest, Staging};

/// Arguments for project generation.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Directory the project is created in.
    pub location: PathBuf,

    /// Project name; becomes `<location>/<name>` and the `Name` variable.
    pub name: String,

    /// Template directory to copy.
    #[arg(
        long,
        short = 't',
        env = "SCAFFOLD_TEMPLATE",
        default_value = "templates/go/server"
    )]
    pub template: PathBuf,

    /// YAML render policy (defaults to ~/.scaffold/policy.yaml when present).
    #[arg(long, value_name = "FILE")]
    pub policy: Option<PathBuf>,

    /// Extra file extension to copy verbatim instead of rendering.
    #[arg(long = "verbatim-ext", value_name = "EXT")]
    pub verbatim_ext: Vec<String>,

    /// Extra template variable.
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_var)]
    pub vars: Vec<(String, String)>,

    /// Render everything and list what would be created, without writing.
    #[arg(long)]
    pub dry_run: bool,

    /// With `--dry-run`, print the plan as JSON.
    #[arg(long, requires = "dry_run")]
    pub json: bool,

    /// Build in a staging directory and move it into place only on success.
    #[arg(long)]
    pub atomic: bool,
}

impl GenerateArgs {
    pub fn run(self) -> Result<()> {
        let target = MaterializationTarget::new(&self.location, ProjectName::from(self.name.clone()))
            .context("invalid project name")?;

        let mut context = RenderContext::for_target(&target);
        for (key, value) in &self.vars {
            context
                .add_var(key, value.clone())
                .with_context(|| format!("invalid --var '{key}'"))?;
        }

        let mut render_policy = load_policy(self.policy.as_deref())?;
        for ext in &self.verbatim_ext {
            render_policy.add_verbatim_extension(ext);
        }

        let request = ScaffoldRequest {
            template_root: self.template.clone(),
            target,
            context,
            policy: render_policy,
            staging: if self.atomic {
                Staging::Atomic
            } else {
                Staging::InPlace
            },
            dry_run: self.dry_run,
        };

        let report = pipeline::run(&request).with_context(|| {
            format!(
                "failed to generate '{}' in '{}'",
                self.name,
                self.location.display()
            )
        })?;

        if self.dry_run {
            if self.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_plan(&report);
            }
        }
        Ok(())
    }
}

fn load_policy(explicit: Option<&Path>) -> Result<RenderPolicy> {
    if let Some(path) = explicit {
        return policy::load_from(path)
            .with_context(|| format!("failed to load policy '{}'", path.display()));
    }
    match policy::load() {
        Ok(p) => Ok(p),
        Err(CoreError::HomeNotFound) => Ok(RenderPolicy::default()),
        Err(e) => Err(e).context("failed to load ~/.scaffold/policy.yaml"),
    }
}

fn parse_var(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

fn print_plan(report: &MaterializationReport) {
    println!(
        "[dry-run] {} ({} entries, {} files)",
        report.destination_root.display(),
        report.entries.len(),
        report.file_count()
    );
    for entry in &report.entries {
        match entry {
            EntryResult::WouldCreateDir { path } | EntryResult::CreatedDir { path } => {
                println!("[dry-run]   dir   {}/", path.display())
            }
            EntryResult::WouldCreateFile { path, bytes, mode }
            | EntryResult::CreatedFile { path, bytes, mode } => {
                println!("[dry-run]   file  {} ({bytes} bytes, {mode})", path.display())
            }
        }
    }
}
