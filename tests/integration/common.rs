//! Shared fixtures for the integration suite.

use assert_cmd::Command;
use buildinfo_cli::constants::BUILD_ID_ENV;
use buildinfo_cli::test_utils::SnapshotBuilder;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch working directory for one test.
pub struct TestProject {
    temp: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Default output directory relative to this project.
    pub fn output_dir(&self) -> PathBuf {
        self.path().join("build").join("BlackDuck")
    }

    /// Write `snapshot` as `<name>.json` and return its file name.
    pub fn snapshot(&self, name: &str, snapshot: &SnapshotBuilder) -> String {
        let file = format!("{name}.json");
        snapshot.write_to(&self.path().join(&file)).unwrap();
        file
    }

    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Parsed `build-info.json` from the default output directory.
    pub fn manifest(&self) -> Value {
        read_json(&self.output_dir().join("build-info.json"))
    }

    /// The binary, run from this directory with a clean environment.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("buildinfo").unwrap();
        cmd.current_dir(self.path()).env_remove(BUILD_ID_ENV).env_remove("RUST_LOG");
        cmd
    }
}

pub fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

/// Project `com.example:app:1.0.0` whose `scope` configuration has the single
/// module `com.x:lib:1.0` with no further dependencies.
pub fn single_lib(scope: &str) -> SnapshotBuilder {
    SnapshotBuilder::new("com.example", "app", "1.0.0")
        .configuration(scope, &["com.x:lib:1.0"])
        .module("com.x:lib:1.0", &[])
}

/// `(group:artifact:version, scopes)` pairs of a manifest, in recorded order.
pub fn recorded(manifest: &Value) -> Vec<(String, Vec<String>)> {
    manifest["dependencies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| {
            let id = format!(
                "{}:{}:{}",
                d["group"].as_str().unwrap(),
                d["artifact"].as_str().unwrap(),
                d["version"].as_str().unwrap()
            );
            let scopes =
                d["scopes"].as_array().unwrap().iter().map(|s| s.as_str().unwrap().to_string()).collect();
            (id, scopes)
        })
        .collect()
}
