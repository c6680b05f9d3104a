//! Integration tests for the CLI surface
//!
//! These run the compiled binary and assert on exit codes and error
//! messages. Only paths that fail before any installer subprocess is
//! spawned are exercised here, so the tests do not need pip, npm, or
//! the AWS CLI on PATH.

mod common;

use std::process::{Command, Output};

use common::{TestProject, MACOS_METADATA, MANYLINUX_X86_64_METADATA};

/// Run the lambda-layer binary with the given arguments
fn run(project: &TestProject, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lambda-layer"));
    cmd.current_dir(project.path());
    for arg in args {
        cmd.arg(arg);
    }
    cmd.output().expect("Failed to execute lambda-layer")
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_help_lists_commands() {
    let project = TestProject::new();
    let output = run(&project, &["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("python"));
    assert!(stdout.contains("node"));
    assert!(stdout.contains("publish"));
}

#[test]
fn test_no_arguments_shows_help() {
    let project = TestProject::new();
    let output = run(&project, &[]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"));
}

#[test]
fn test_version_flag() {
    let project = TestProject::new();
    let output = run(&project, &["--version"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_python_without_specs_fails() {
    let project = TestProject::new();
    let output = run(&project, &["python"]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Nothing to package"));
}

#[test]
fn test_node_without_specs_fails() {
    let project = TestProject::new();
    let output = run(&project, &["node"]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Nothing to package"));
}

#[test]
fn test_python_rejects_malformed_version() {
    let project = TestProject::new();
    let output = run(&project, &["python", "requests", "--python-version", "banana"]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Invalid version"));
}

#[test]
fn test_python_rejects_unknown_architecture() {
    let project = TestProject::new();
    let output = run(&project, &["python", "requests", "--architecture", "sparc"]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Unknown architecture"));
}

#[test]
fn test_node_rejects_non_numeric_version() {
    let project = TestProject::new();
    let output = run(&project, &["node", "left-pad", "--node-version", "lts"]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Invalid version"));
}

#[test]
fn test_python_missing_wheel_file_fails() {
    let project = TestProject::new();
    let output = run(&project, &["python", "ghost-1.0-py3-none-any.whl"]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("not found"));
}

#[test]
fn test_renamed_macos_wheel_is_rejected() {
    // Filename claims manylinux, embedded metadata says macOS; the
    // build must fail before any installer runs
    let project = TestProject::new();
    project.write_wheel(
        "pkg-1.0-cp312-cp312-manylinux_2_28_x86_64.whl",
        Some(MACOS_METADATA),
    );

    let output = run(
        &project,
        &["python", "pkg-1.0-cp312-cp312-manylinux_2_28_x86_64.whl"],
    );
    assert!(!output.status.success());
    let stderr = stderr_of(&output);
    assert!(stderr.contains("not built for Linux"), "stderr: {stderr}");
}

#[test]
fn test_wheel_flag_conflict_is_reported() {
    let project = TestProject::new();
    project.write_wheel(
        "pkg-1.0-cp312-cp312-manylinux_2_28_x86_64.whl",
        Some(MANYLINUX_X86_64_METADATA),
    );

    let output = run(
        &project,
        &[
            "python",
            "pkg-1.0-cp312-cp312-manylinux_2_28_x86_64.whl",
            "--python-version",
            "3.9",
        ],
    );
    assert!(!output.status.success());
    let stderr = stderr_of(&output);
    assert!(stderr.contains("3.12"), "stderr: {stderr}");
    assert!(stderr.contains("3.9"), "stderr: {stderr}");
}

#[test]
fn test_publish_missing_archive_fails() {
    let project = TestProject::new();
    let output = run(&project, &["publish", "missing.zip", "--layer-name", "deps"]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("not found"));
}

#[test]
fn test_layer_name_requires_publish_flag() {
    let project = TestProject::new();
    let output = run(&project, &["python", "requests", "--layer-name", "deps"]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("--publish"));
}

#[test]
fn test_json_mode_emits_json_error() {
    let project = TestProject::new();
    let output = run(&project, &["--json", "python"]);
    assert!(!output.status.success());

    let stderr = stderr_of(&output);
    let payload: serde_json::Value =
        serde_json::from_str(stderr.trim()).expect("stderr should be a JSON object");
    assert!(payload["error"]
        .as_str()
        .expect("error field should be a string")
        .contains("Nothing to package"));
}
