//! Integration tests for `buildinfo hub-output`.

use buildinfo_cli::test_utils::SnapshotBuilder;
use predicates::prelude::*;

use super::common::{TestProject, read_json};

fn diamond() -> SnapshotBuilder {
    SnapshotBuilder::new("com.example", "app", "1.0.0")
        .configuration("compile", &["g:a:1", "g:b:1"])
        .configuration("test", &["g:junit:4"])
        .module("g:a:1", &["g:d:1"])
        .module("g:b:1", &["g:d:1"])
        .module("g:d:1", &[])
        .module("g:junit:4", &[])
}

#[test]
fn test_writes_tree_without_manifest() {
    let project = TestProject::new();
    let snapshot = project.snapshot("app", &diamond());

    project
        .cmd()
        .args(["hub-output", "-p", snapshot.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("app_bdio.json"));

    let tree = read_json(&project.output_dir().join("app_bdio.json"));
    assert_eq!(tree["group"], "com.example");
    assert_eq!(tree["artifact"], "app");
    assert_eq!(tree["version"], "1.0.0");

    let children: Vec<&str> =
        tree["children"].as_array().unwrap().iter().map(|c| c["artifact"].as_str().unwrap()).collect();
    assert_eq!(children, vec!["a", "b", "junit"]);
    // the shared module is listed under both parents, expanded only under the first
    assert_eq!(tree["children"][0]["children"][0]["artifact"], "d");
    assert_eq!(tree["children"][1]["children"][0]["artifact"], "d");
    assert_eq!(tree["children"][1]["children"][0]["children"].as_array().unwrap().len(), 0);

    assert!(!project.output_dir().join("build-info.json").exists());
}

#[test]
fn test_exclusions_shape_the_tree() {
    let project = TestProject::new();
    let snapshot = project.snapshot("app", &diamond());

    project
        .cmd()
        .args([
            "hub-output",
            "-p",
            snapshot.as_str(),
            "--exclude-scope",
            "test",
            "--exclude-module",
            "g:b",
            "--hub-project-name",
            "scanned",
        ])
        .assert()
        .success();

    let tree = read_json(&project.output_dir().join("scanned_bdio.json"));
    assert_eq!(tree["artifact"], "scanned");
    let children = tree["children"].as_array().unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0]["artifact"], "a");
}

#[test]
fn test_cycle_is_cut_in_tree_file() {
    let project = TestProject::new();
    let snapshot = project.snapshot(
        "app",
        &SnapshotBuilder::new("com.example", "app", "1.0.0")
            .configuration("compile", &["g:a:1"])
            .module("g:a:1", &["g:b:1"])
            .module("g:b:1", &["g:a:1"]),
    );

    project.cmd().args(["hub-output", "-p", snapshot.as_str()]).assert().success();

    let tree = read_json(&project.output_dir().join("app_bdio.json"));
    let back_edge = &tree["children"][0]["children"][0]["children"][0];
    assert_eq!(back_edge["artifact"], "a");
    assert_eq!(back_edge["children"].as_array().unwrap().len(), 0);
}
