//! BDD test harness using cucumber-rs.
//!
//! Executes Gherkin feature files from `tests/features/` against the r19guard CLI.
//!
//! Run with: `cargo test --test bdd`

use assert_cmd::Command;
use cucumber::gherkin::Step;
use cucumber::{World, given, then, when};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tempfile::TempDir;

/// Test world that holds state between steps.
#[derive(Debug, Default, World)]
pub struct R19guardWorld {
    /// Scratch project directory (kept alive for the whole scenario).
    project: Option<TempDir>,

    exit_code: Option<i32>,
    stdout: String,
    stderr: String,

    /// Parsed JSON envelope from the last `--format json` run.
    report: Option<Value>,
}

impl R19guardWorld {
    #[allow(deprecated)]
    fn r19guard_cmd() -> Command {
        Command::cargo_bin("r19guard").expect("r19guard binary not found")
    }

    fn project_dir(&self) -> PathBuf {
        self.project
            .as_ref()
            .expect("no project set up; use a Given step first")
            .path()
            .to_path_buf()
    }

    fn write_manifest(&mut self, deps: Map<String, Value>) {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let manifest = serde_json::json!({
            "name": "bdd-project",
            "version": "1.0.0",
            "dependencies": deps,
        });
        let text = serde_json::to_string_pretty(&manifest).expect("serialize manifest");
        std::fs::write(tmp.path().join("package.json"), text + "\n")
            .expect("Failed to write package.json");
        self.project = Some(tmp);
    }

    fn run(&mut self, args: &[&str]) {
        let output = Self::r19guard_cmd()
            .arg("--project-path")
            .arg(self.project_dir())
            .args(args)
            .output()
            .expect("Failed to run r19guard");
        self.exit_code = output.status.code();
        self.stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        self.stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    }

    fn report(&self) -> &Value {
        self.report.as_ref().expect("no JSON report captured")
    }

    fn fixes(&self) -> &Vec<Value> {
        self.report()["report"]["fixes"]
            .as_array()
            .expect("fixes should be an array")
    }

    fn read_project_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.project_dir().join(name))
            .unwrap_or_else(|e| panic!("Failed to read {name}: {e}"))
    }
}

// =============================================================================
// Given steps - Setup
// =============================================================================

#[given(expr = "a project declaring react {string}")]
fn given_react_range(world: &mut R19guardWorld, range: String) {
    let mut deps = Map::new();
    deps.insert("react".to_string(), Value::String(range));
    world.write_manifest(deps);
}

#[given(expr = "a project with dependencies:")]
fn given_dependencies(world: &mut R19guardWorld, step: &Step) {
    let table = step.table.as_ref().expect("dependency table required");
    let mut deps = Map::new();
    for row in table.rows.iter().skip(1) {
        deps.insert(row[0].clone(), Value::String(row[1].clone()));
    }
    world.write_manifest(deps);
}

#[given(expr = "an r19guard.toml:")]
fn given_config(world: &mut R19guardWorld, step: &Step) {
    let config = step.docstring.as_ref().expect("config docstring required");
    std::fs::write(world.project_dir().join("r19guard.toml"), config)
        .expect("Failed to write r19guard.toml");
}

// =============================================================================
// When steps - Actions
// =============================================================================

#[when(expr = "I run r19guard check with json output")]
fn when_check_json(world: &mut R19guardWorld) {
    world.run(&["check", "--format", "json"]);
    let report = serde_json::from_str(&world.stdout)
        .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}\n{}", world.stdout, world.stderr));
    world.report = Some(report);
}

#[when(expr = "I run r19guard check with fixes applied")]
fn when_check_fix(world: &mut R19guardWorld) {
    world.run(&["check", "--fix"]);
}

// =============================================================================
// Then steps - Assertions
// =============================================================================

#[then(expr = "the exit code is {int}")]
fn then_exit_code(world: &mut R19guardWorld, code: i32) {
    assert_eq!(
        world.exit_code,
        Some(code),
        "stdout:\n{}\nstderr:\n{}",
        world.stdout,
        world.stderr
    );
}

#[then(expr = "the react status is {string}")]
fn then_react_status(world: &mut R19guardWorld, status: String) {
    assert_eq!(world.report()["report"]["react"]["status"], Value::String(status));
}

#[then(expr = "there is a finding for {string}")]
fn then_finding(world: &mut R19guardWorld, package: String) {
    let found = world.report()["report"]["dependencies"]
        .as_array()
        .expect("dependencies array")
        .iter()
        .any(|f| f["package"] == package.as_str());
    assert!(found, "no finding for {package}");
}

#[then(expr = "there is a finding for {string} whose issue contains {string}")]
fn then_finding_issue(world: &mut R19guardWorld, package: String, needle: String) {
    let finding = world.report()["report"]["dependencies"]
        .as_array()
        .expect("dependencies array")
        .iter()
        .find(|f| f["package"] == package.as_str())
        .unwrap_or_else(|| panic!("no finding for {package}"));
    let issue = finding["issue"].as_str().expect("issue string");
    assert!(issue.contains(&needle), "issue '{issue}' lacks '{needle}'");
}

#[then(expr = "there are no findings")]
fn then_no_findings(world: &mut R19guardWorld) {
    let findings = world.report()["report"]["dependencies"]
        .as_array()
        .expect("dependencies array");
    assert!(findings.is_empty(), "unexpected findings: {findings:?}");
}

#[then(expr = "there is an {string} fix whose command contains {string}")]
fn then_fix_command(world: &mut R19guardWorld, kind: String, needle: String) {
    let found = world.fixes().iter().any(|f| {
        f["type"] == kind.as_str()
            && f["command"]
                .as_str()
                .is_some_and(|c| c.contains(needle.as_str()))
    });
    assert!(found, "no {kind} fix containing '{needle}' in {:?}", world.fixes());
}

#[then(expr = "there is a {string} fix targeting {string}")]
fn then_fix_target(world: &mut R19guardWorld, kind: String, file: String) {
    let found = world
        .fixes()
        .iter()
        .any(|f| f["type"] == kind.as_str() && f["file"] == file.as_str());
    assert!(found, "no {kind} fix for {file} in {:?}", world.fixes());
}

#[then(expr = "the file {string} contains {string}")]
fn then_file_contains(world: &mut R19guardWorld, name: String, needle: String) {
    let text = world.read_project_file(&name);
    assert!(text.contains(&needle), "{name} does not contain '{needle}':\n{text}");
}

#[then(expr = "the file {string} contains {string} exactly once")]
fn then_file_contains_once(world: &mut R19guardWorld, name: String, needle: String) {
    let text = world.read_project_file(&name);
    assert_eq!(
        text.lines().filter(|l| l.trim() == needle).count(),
        1,
        "{name}:\n{text}"
    );
}

#[then(expr = "package.json overrides {string} is {string}")]
fn then_override(world: &mut R19guardWorld, key: String, version: String) {
    let manifest: Value =
        serde_json::from_str(&world.read_project_file("package.json")).expect("package.json json");
    assert_eq!(manifest["overrides"][key.as_str()], Value::String(version));
}

#[then(expr = "stderr contains {string}")]
fn then_stderr_contains(world: &mut R19guardWorld, needle: String) {
    assert!(world.stderr.contains(&needle), "stderr:\n{}", world.stderr);
}

// =============================================================================
// Main entry point
// =============================================================================

fn main() {
    let features_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("cli crate should have parent")
        .parent()
        .expect("crates should have parent")
        .join("tests")
        .join("features");

    futures::executor::block_on(<R19guardWorld as World>::run(features_dir));
}
