//! Integration tests for `buildinfo build-info`.

use assert_cmd::cargo::cargo_bin;
use buildinfo_cli::constants::BUILD_ID_ENV;
use buildinfo_cli::test_utils::SnapshotBuilder;
use predicates::prelude::*;
use std::process::Stdio;

use super::common::{TestProject, read_json, recorded, single_lib};

fn deps(pairs: &[(&str, &[&str])]) -> Vec<(String, Vec<String>)> {
    pairs
        .iter()
        .map(|(id, scopes)| (id.to_string(), scopes.iter().map(|s| s.to_string()).collect()))
        .collect()
}

#[test]
fn test_sub_modules_of_one_build_merge_scopes() {
    let project = TestProject::new();
    let compile = project.snapshot("compile", &single_lib("compile"));
    let test = project.snapshot("test", &single_lib("test"));

    project
        .cmd()
        .args(["build-info", "--project", compile.as_str(), "--build-id", "B1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded 1 dependencies"));
    assert_eq!(recorded(&project.manifest()), deps(&[("com.x:lib:1.0", &["compile"])]));

    project.cmd().args(["build-info", "--project", test.as_str(), "--build-id", "B1"]).assert().success();
    assert_eq!(recorded(&project.manifest()), deps(&[("com.x:lib:1.0", &["compile", "test"])]));
}

#[test]
fn test_first_run_records_build_id_and_artifact() {
    let project = TestProject::new();
    let snapshot = project.snapshot("app", &single_lib("compile"));

    project
        .cmd()
        .args(["build-info", "-p", snapshot.as_str()])
        .env(BUILD_ID_ENV, "B1")
        .assert()
        .success();

    let manifest = project.manifest();
    assert_eq!(manifest["buildId"], "B1");
    assert_eq!(manifest["buildArtifact"]["type"], "org.gradle");
    assert_eq!(manifest["buildArtifact"]["group"], "com.example");
    assert_eq!(manifest["buildArtifact"]["artifact"], "app");
    assert_eq!(manifest["buildArtifact"]["version"], "1.0.0");
    assert!(project.output_dir().join("app_bdio.json").exists());
}

#[test]
fn test_new_build_discards_previous_build() {
    let project = TestProject::new();
    let first = project.snapshot(
        "first",
        &SnapshotBuilder::new("com.example", "first", "1.0")
            .configuration("compile", &["com.old:gone:1.0"])
            .module("com.old:gone:1.0", &[]),
    );
    let second = project.snapshot("second", &single_lib("runtime"));

    project.cmd().args(["build-info", "-p", first.as_str(), "--build-id", "B1"]).assert().success();
    project.cmd().args(["build-info", "-p", second.as_str(), "--build-id", "B2"]).assert().success();

    let manifest = project.manifest();
    assert_eq!(manifest["buildId"], "B2");
    assert_eq!(manifest["buildArtifact"]["artifact"], "app");
    assert_eq!(recorded(&manifest), deps(&[("com.x:lib:1.0", &["runtime"])]));
}

#[test]
fn test_missing_build_id_always_starts_fresh() {
    let project = TestProject::new();
    let compile = project.snapshot("compile", &single_lib("compile"));
    let test = project.snapshot("test", &single_lib("test"));

    project
        .cmd()
        .args(["build-info", "-p", compile.as_str()])
        .assert()
        .success()
        .stderr(predicate::str::contains("No build id supplied"));
    project.cmd().args(["build-info", "-p", test.as_str()]).assert().success();

    let manifest = project.manifest();
    assert!(manifest["buildId"].is_null());
    assert_eq!(recorded(&manifest), deps(&[("com.x:lib:1.0", &["test"])]));
}

#[test]
fn test_excluded_scope_is_not_recorded() {
    let project = TestProject::new();
    let snapshot = project.snapshot(
        "app",
        &SnapshotBuilder::new("com.example", "app", "1.0.0")
            .configuration("compile", &["com.x:lib:1.0"])
            .configuration("testCompile", &["com.x:lib:1.0", "org.junit:junit:4.13"])
            .module("com.x:lib:1.0", &[])
            .module("org.junit:junit:4.13", &[]),
    );

    project
        .cmd()
        .args(["build-info", "-p", snapshot.as_str(), "--build-id", "B1", "--exclude-scope", "testCompile"])
        .assert()
        .success();

    // lib was already known when testCompile was seen, so it keeps that scope
    assert_eq!(
        recorded(&project.manifest()),
        deps(&[("com.x:lib:1.0", &["compile", "testCompile"])])
    );
}

#[test]
fn test_transitive_modules_recorded_and_platforms_skipped() {
    let project = TestProject::new();
    let snapshot = project.snapshot(
        "app",
        &SnapshotBuilder::new("com.example", "app", "1.0.0")
            .configuration("compile", &["com.x:web:2.0", "com.x:bom:1.0"])
            .module("com.x:web:2.0", &["com.x:core:2.0", "com.x:bom:1.0"])
            .module("com.x:core:2.0", &[])
            .platform("com.x:bom:1.0", &[]),
    );

    project.cmd().args(["build-info", "-p", snapshot.as_str(), "--build-id", "B1"]).assert().success();

    assert_eq!(
        recorded(&project.manifest()),
        deps(&[
            ("com.x:web:2.0", &["compile"]),
            ("com.x:core:2.0", &["compile"]),
            ("com.x:bom:1.0", &["compile"]),
        ])
    );
}

#[test]
fn test_settings_file_controls_output() {
    let project = TestProject::new();
    let snapshot = project.snapshot("app", &single_lib("compile"));
    project.write(
        "buildinfo.toml",
        r#"
[output]
directory = "reports"

[hub]
project-name = "hub-app"
version-name = "9.9"
"#,
    );

    project.cmd().args(["build-info", "-p", snapshot.as_str(), "--build-id", "B1"]).assert().success();

    let tree = read_json(&project.path().join("reports").join("hub-app_bdio.json"));
    assert_eq!(tree["artifact"], "hub-app");
    assert_eq!(tree["version"], "9.9");
    assert_eq!(tree["children"][0]["artifact"], "lib");
    assert!(project.path().join("reports").join("build-info.json").exists());
    assert!(!project.output_dir().exists());
}

#[test]
fn test_concurrent_sub_modules_lose_no_scopes() {
    let project = TestProject::new();
    let scopes = ["compile", "runtime", "test", "provided", "annotation"];
    let snapshots: Vec<String> =
        scopes.iter().map(|scope| project.snapshot(scope, &single_lib(scope))).collect();

    let children: Vec<_> = snapshots
        .iter()
        .map(|snapshot| {
            std::process::Command::new(cargo_bin("buildinfo"))
                .current_dir(project.path())
                .env_remove("RUST_LOG")
                .args(["--quiet", "build-info", "-p", snapshot.as_str(), "--build-id", "B1"])
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
                .unwrap()
        })
        .collect();
    for mut child in children {
        assert!(child.wait().unwrap().success());
    }

    let recorded = recorded(&project.manifest());
    assert_eq!(recorded.len(), 1);
    let mut seen = recorded[0].1.clone();
    seen.sort();
    let mut expected: Vec<String> = scopes.iter().map(|s| s.to_string()).collect();
    expected.sort();
    assert_eq!(seen, expected);
}
