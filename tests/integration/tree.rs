//! Integration tests for `buildinfo tree`.

use buildinfo_cli::test_utils::SnapshotBuilder;
use predicates::prelude::*;

use super::common::TestProject;

fn layered() -> SnapshotBuilder {
    SnapshotBuilder::new("com.example", "app", "1.0.0")
        .configuration("compile", &["com.x:web:3.0", "com.x:lib:1.0"])
        .module("com.x:web:3.0", &["com.x:core:2.1"])
        .module("com.x:lib:1.0", &["com.x:core:2.1"])
        .module("com.x:core:2.1", &[])
}

#[test]
fn test_tree_marks_shared_modules() {
    let project = TestProject::new();
    let snapshot = project.snapshot("app", &layered());

    project
        .cmd()
        .args(["tree", "-p", snapshot.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("com.example:app:1.0.0\n"))
        .stdout(predicate::str::contains("├── com.x:web:3.0\n│   └── com.x:core:2.1\n"))
        .stdout(predicate::str::contains("└── com.x:lib:1.0\n    └── com.x:core:2.1 (*)\n"))
        .stdout(predicate::str::contains("(*) = shown in full above"));
}

#[test]
fn test_tree_depth_limit() {
    let project = TestProject::new();
    let snapshot = project.snapshot("app", &layered());

    project
        .cmd()
        .args(["tree", "-p", snapshot.as_str(), "--depth", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("com.x:web:3.0"))
        .stdout(predicate::str::contains("core").not());
}

#[test]
fn test_tree_json_format() {
    let project = TestProject::new();
    let snapshot = project.snapshot("app", &layered());

    let output = project
        .cmd()
        .args(["tree", "-p", snapshot.as_str(), "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let tree: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tree["artifact"], "app");
    assert_eq!(tree["children"][0]["children"][0]["artifact"], "core");
    assert_eq!(tree["children"][1]["children"][0]["artifact"], "core");
}

#[test]
fn test_tree_rejects_zero_depth() {
    let project = TestProject::new();
    let snapshot = project.snapshot("app", &layered());

    project
        .cmd()
        .args(["tree", "-p", snapshot.as_str(), "--depth", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Depth must be at least 1"));
}
