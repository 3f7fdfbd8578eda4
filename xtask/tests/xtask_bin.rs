use std::process::Command;

fn xtask(arg: &str) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_xtask"))
        .arg(arg)
        .output()
        .expect("run xtask")
}

#[test]
fn xtask_help_runs() {
    let output = xtask("help");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("xtask commands"));
}

#[test]
fn schema_ids_are_listed() {
    let output = xtask("print-schema-ids");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("r19guard.report.v1"));
    assert!(stdout.contains("r19guard.config.v1"));
}

#[test]
fn golden_reports_conform() {
    let output = xtask("conform");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn builtin_rules_are_explained() {
    assert!(xtask("explain-coverage").status.success());
}

#[test]
fn unknown_command_fails() {
    assert!(!xtask("frobnicate").status.success());
}
