//! Integration tests for the `soldeps` binary.
//!
//! Each test creates a throwaway project tree and drives the compiled
//! binary against it.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

fn soldeps() -> Command {
    Command::new(env!("CARGO_BIN_EXE_soldeps"))
}

/// A project with one installed package and a two-file contract chain.
fn create_project() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let root = fs::canonicalize(dir.path()).unwrap();

    fs::write(
        root.join("package.json"),
        r#"{"name": "proj", "version": "1.0.0"}"#,
    )
    .unwrap();

    fs::create_dir_all(root.join("contracts")).unwrap();
    fs::write(
        root.join("contracts/Token.sol"),
        "import \"./Utils.sol\";\nimport \"dep/Math.sol\";\ncontract Token {}",
    )
    .unwrap();
    fs::write(root.join("contracts/Utils.sol"), "library Utils {}").unwrap();

    let dep = root.join("node_modules/dep");
    fs::create_dir_all(&dep).unwrap();
    fs::write(
        dep.join("package.json"),
        r#"{"name": "dep", "version": "2.0.0"}"#,
    )
    .unwrap();
    fs::write(dep.join("Math.sol"), "library Math {}").unwrap();

    (dir, root)
}

#[test]
fn resolve_prints_sources_and_remappings() {
    let (_dir, root) = create_project();

    let output = soldeps()
        .args(["--cwd"])
        .arg(&root)
        .args(["resolve", "contracts/Token.sol"])
        .output()
        .expect("failed to run soldeps");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("contracts/Token.sol"));
    assert!(stdout.contains("contracts/Utils.sol"));
    assert!(stdout.contains("npm/dep@2.0.0/Math.sol"));
    assert!(stdout.contains("dep/=npm/dep@2.0.0/"));
    assert!(stdout.contains("npm/:npm/=npm/"));
}

#[test]
fn resolve_json_output() {
    let (_dir, root) = create_project();

    let output = soldeps()
        .args(["--cwd"])
        .arg(&root)
        .args(["--json", "resolve", "contracts/Token.sol"])
        .output()
        .expect("failed to run soldeps");

    assert!(output.status.success());

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");

    let files = parsed["files"].as_array().unwrap();
    let names: Vec<&str> = files
        .iter()
        .map(|f| f["source_name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "contracts/Token.sol",
            "contracts/Utils.sol",
            "npm/dep@2.0.0/Math.sol"
        ]
    );

    let remappings = parsed["remappings"].as_array().unwrap();
    assert!(remappings
        .iter()
        .any(|r| r["prefix"] == "dep/" && r["target"] == "npm/dep@2.0.0/"));
}

#[test]
fn remappings_subcommand_prints_table_only() {
    let (_dir, root) = create_project();

    let output = soldeps()
        .args(["--cwd"])
        .arg(&root)
        .args(["remappings", "contracts/Token.sol"])
        .output()
        .expect("failed to run soldeps");

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["npm/:npm/=npm/", "dep/=npm/dep@2.0.0/"]);
}

#[test]
fn invalid_remapping_fails() {
    let (_dir, root) = create_project();

    let output = soldeps()
        .args(["--cwd"])
        .arg(&root)
        .args([
            "resolve",
            "contracts/Token.sol",
            "--remap",
            "x/=npm/ghost@1.0.0/",
        ])
        .output()
        .expect("failed to run soldeps");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ghost"));
}
