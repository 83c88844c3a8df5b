//! Binary-level tests for `scaffold <location> <name>`.

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::path::PathBuf;

fn scaffold(home: &assert_fs::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("scaffold").expect("scaffold binary");
    cmd.env("HOME", home.path())
        .env("USERPROFILE", home.path())
        .env_remove("SCAFFOLD_TEMPLATE")
        .env_remove("SCAFFOLD_LOG");
    cmd
}

fn go_template() -> assert_fs::TempDir {
    let template = assert_fs::TempDir::new().unwrap();
    template.child("cmd/main.go").write_str("package main // {{ .Name }}").unwrap();
    template
}

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("workspace root")
        .to_path_buf()
}

#[test]
fn success_is_silent_and_creates_project() {
    let home = assert_fs::TempDir::new().unwrap();
    let template = go_template();
    let out = assert_fs::TempDir::new().unwrap();

    scaffold(&home)
        .arg(out.path())
        .arg("widget")
        .arg("--template")
        .arg(template.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    out.child("widget/cmd").assert(predicate::path::is_dir());
    out.child("widget/cmd/main.go").assert("package main // widget");
}

#[test]
fn wrong_argument_count_is_rejected() {
    let home = assert_fs::TempDir::new().unwrap();
    let out = assert_fs::TempDir::new().unwrap();

    scaffold(&home).arg(out.path()).assert().failure();
    scaffold(&home)
        .arg(out.path())
        .arg("a")
        .arg("b")
        .assert()
        .failure();

    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn existing_destination_fails_without_touching_it() {
    let home = assert_fs::TempDir::new().unwrap();
    let template = go_template();
    let out = assert_fs::TempDir::new().unwrap();
    out.child("widget/keep.txt").write_str("mine").unwrap();

    scaffold(&home)
        .arg(out.path())
        .arg("widget")
        .arg("--template")
        .arg(template.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    out.child("widget/keep.txt").assert("mine");
    out.child("widget/cmd").assert(predicate::path::missing());
}

#[test]
fn missing_template_fails() {
    let home = assert_fs::TempDir::new().unwrap();
    let out = assert_fs::TempDir::new().unwrap();

    scaffold(&home)
        .arg(out.path())
        .arg("widget")
        .arg("--template")
        .arg(out.path().join("no-such-template"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn undefined_variable_reports_path_and_keeps_partial_output() {
    let home = assert_fs::TempDir::new().unwrap();
    let template = assert_fs::TempDir::new().unwrap();
    template.child("cmd/main.go").write_str("// {{ .Owner }}").unwrap();
    let out = assert_fs::TempDir::new().unwrap();

    scaffold(&home)
        .arg(out.path())
        .arg("widget")
        .arg("--template")
        .arg(template.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("cmd/main.go").and(predicate::str::contains("Owner")));

    out.child("widget/cmd").assert(predicate::path::is_dir());
    out.child("widget/cmd/main.go").assert(predicate::path::missing());
}

#[test]
fn atomic_failure_leaves_nothing() {
    let home = assert_fs::TempDir::new().unwrap();
    let template = assert_fs::TempDir::new().unwrap();
    template.child("cmd/main.go").write_str("// {{ .Owner }}").unwrap();
    let out = assert_fs::TempDir::new().unwrap();

    scaffold(&home)
        .arg(out.path())
        .arg("widget")
        .arg("--template")
        .arg(template.path())
        .arg("--atomic")
        .assert()
        .failure();

    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn var_flag_extends_context() {
    let home = assert_fs::TempDir::new().unwrap();
    let template = assert_fs::TempDir::new().unwrap();
    template.child("go.mod").write_str("module {{ .Module }}/{{ .Name }}\n").unwrap();
    let out = assert_fs::TempDir::new().unwrap();

    scaffold(&home)
        .arg(out.path())
        .arg("widget")
        .arg("--template")
        .arg(template.path())
        .arg("--var")
        .arg("Module=github.com/acme")
        .assert()
        .success();

    out.child("widget/go.mod").assert("module github.com/acme/widget\n");
}

#[test]
fn reserved_var_is_rejected() {
    let home = assert_fs::TempDir::new().unwrap();
    let template = go_template();
    let out = assert_fs::TempDir::new().unwrap();

    scaffold(&home)
        .arg(out.path())
        .arg("widget")
        .arg("--template")
        .arg(template.path())
        .arg("--var")
        .arg("Name=other")
        .assert()
        .failure()
        .stderr(predicate::str::contains("reserved"));

    out.child("widget").assert(predicate::path::missing());
}

#[test]
fn dry_run_lists_plan_and_writes_nothing() {
    let home = assert_fs::TempDir::new().unwrap();
    let template = go_template();
    let out = assert_fs::TempDir::new().unwrap();

    scaffold(&home)
        .arg(out.path())
        .arg("widget")
        .arg("--template")
        .arg(template.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("[dry-run]").and(predicate::str::contains("cmd/main.go")));

    out.child("widget").assert(predicate::path::missing());
}

#[test]
fn dry_run_json_is_machine_readable() {
    let home = assert_fs::TempDir::new().unwrap();
    let template = go_template();
    let out = assert_fs::TempDir::new().unwrap();

    let output = scaffold(&home)
        .arg(out.path())
        .arg("widget")
        .arg("--template")
        .arg(template.path())
        .arg("--dry-run")
        .arg("--json")
        .output()
        .expect("run scaffold");
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(plan["dry_run"], true);
    assert_eq!(plan["entries"].as_array().map(Vec::len), Some(2));
}

#[test]
fn verbatim_ext_flag_copies_bytes() {
    let home = assert_fs::TempDir::new().unwrap();
    let template = assert_fs::TempDir::new().unwrap();
    template.child("notes.tpl").write_str("{{ .Unset }}").unwrap();
    let out = assert_fs::TempDir::new().unwrap();

    scaffold(&home)
        .arg(out.path())
        .arg("widget")
        .arg("--template")
        .arg(template.path())
        .arg("--verbatim-ext")
        .arg("tpl")
        .assert()
        .success();

    out.child("widget/notes.tpl").assert("{{ .Unset }}");
}

#[test]
fn home_policy_is_honoured() {
    let home = assert_fs::TempDir::new().unwrap();
    home.child(".scaffold/policy.yaml")
        .write_str("verbatim_paths: [raw.txt]\n")
        .unwrap();
    let template = assert_fs::TempDir::new().unwrap();
    template.child("raw.txt").write_str("{{ .Name }}").unwrap();
    let out = assert_fs::TempDir::new().unwrap();

    scaffold(&home)
        .arg(out.path())
        .arg("widget")
        .arg("--template")
        .arg(template.path())
        .assert()
        .success();

    out.child("widget/raw.txt").assert("{{ .Name }}");
}

#[test]
fn bundled_go_server_template_renders() {
    let home = assert_fs::TempDir::new().unwrap();
    let out = assert_fs::TempDir::new().unwrap();

    scaffold(&home)
        .current_dir(workspace_root())
        .arg(out.path())
        .arg("widget")
        .assert()
        .success();

    out.child("widget/go.mod").assert(predicate::str::starts_with("module widget\n"));
    out.child("widget/cmd/main.go")
        .assert(predicate::str::contains("\"widget/internal/api\""));
    out.child("widget/internal/api/router.go")
        .assert(predicate::str::contains("mux.HandleFunc(\"GET /{$}\", h.Get)"));
    out.child("widget/internal/api/handler.go").assert(predicate::path::is_file());
}
