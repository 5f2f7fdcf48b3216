//! Integration tests for failure handling.

use predicates::prelude::*;

use super::common::{TestProject, recorded, single_lib};

#[test]
fn test_corrupt_manifest_fails_and_is_left_untouched() {
    let project = TestProject::new();
    let snapshot = project.snapshot("app", &single_lib("compile"));
    let manifest = project.write("build/BlackDuck/build-info.json", "{ not json");

    project
        .cmd()
        .args(["build-info", "-p", snapshot.as_str(), "--build-id", "B1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Existing build manifest is corrupt"))
        .stderr(predicate::str::contains("--recover-corrupt"));

    assert_eq!(std::fs::read_to_string(manifest).unwrap(), "{ not json");
}

#[test]
fn test_corrupt_manifest_recovered_on_request() {
    let project = TestProject::new();
    let snapshot = project.snapshot("app", &single_lib("compile"));
    project.write("build/BlackDuck/build-info.json", "{ not json");

    project
        .cmd()
        .args(["build-info", "-p", snapshot.as_str(), "--build-id", "B1", "--recover-corrupt"])
        .assert()
        .success()
        .stderr(predicate::str::contains("corrupt"));

    let manifest = project.manifest();
    assert_eq!(manifest["buildId"], "B1");
    assert_eq!(recorded(&manifest).len(), 1);
}

#[test]
fn test_empty_manifest_is_treated_as_absent() {
    let project = TestProject::new();
    let snapshot = project.snapshot("app", &single_lib("compile"));
    project.write("build/BlackDuck/build-info.json", "\n");

    project.cmd().args(["build-info", "-p", snapshot.as_str(), "--build-id", "B1"]).assert().success();
    assert_eq!(project.manifest()["buildId"], "B1");
}

#[test]
fn test_missing_snapshot_fails() {
    let project = TestProject::new();

    project
        .cmd()
        .args(["build-info", "-p", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.json"));
    assert!(!project.output_dir().exists());
}

#[test]
fn test_unparsable_snapshot_fails() {
    let project = TestProject::new();
    project.write("resolved.json", "[]");

    project
        .cmd()
        .args(["tree", "-p", "resolved.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot parse resolved project snapshot"));
}

#[test]
fn test_unresolved_module_reference_fails() {
    let project = TestProject::new();
    project.write(
        "resolved.json",
        r#"{
  "project": {"group": "com.example", "artifact": "app", "version": "1.0"},
  "configurations": [{"name": "compile", "dependencies": [{"group": "g", "artifact": "a", "version": "1"}]}],
  "modules": [
    {"group": "g", "artifact": "a", "version": "1",
     "dependencies": [{"group": "g", "artifact": "ghost", "version": "1"}]}
  ]
}"#,
    );

    project
        .cmd()
        .args(["build-info", "-p", "resolved.json", "--build-id", "B1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("g:ghost:1"));
    assert!(!project.output_dir().join("build-info.json").exists());
}

#[test]
fn test_invalid_module_pattern_fails() {
    let project = TestProject::new();
    let snapshot = project.snapshot("app", &single_lib("compile"));

    project
        .cmd()
        .args(["hub-output", "-p", snapshot.as_str(), "--exclude-module", "com.x:[lib"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid module exclusion pattern"));
}

#[test]
fn test_explicit_settings_file_must_exist() {
    let project = TestProject::new();
    let snapshot = project.snapshot("app", &single_lib("compile"));

    project
        .cmd()
        .args(["--config", "missing.toml", "tree", "-p", snapshot.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Settings file not found"));
}

#[test]
fn test_hub_project_name_cannot_escape_output_dir() {
    let project = TestProject::new();
    let snapshot = project.snapshot("app", &single_lib("compile"));

    project
        .cmd()
        .args(["build-info", "-p", snapshot.as_str(), "--build-id", "B1", "--hub-project-name", "../../x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid hub project name"));

    assert!(!project.path().join("x_bdio.json").exists());
    assert!(!project.output_dir().join("build-info.json").exists());
}
