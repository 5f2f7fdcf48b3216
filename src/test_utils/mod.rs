//! Test utilities for buildinfo
//!
//! Helpers shared by unit tests and the integration test suite (enable the
//! `test-utils` feature to use them outside this crate):
//!
//! - [`init_test_logging`] - once-guarded tracing setup
//! - [`SnapshotBuilder`] - fluent construction of resolved project snapshots
//!
//! # Example
//!
//! ```rust,no_run
//! use buildinfo_cli::test_utils::SnapshotBuilder;
//!
//! let snapshot = SnapshotBuilder::new("com.example", "app", "1.0.0")
//!     .configuration("compile", &["com.x:lib:1.0"])
//!     .module("com.x:lib:1.0", &[])
//!     .build()
//!     .unwrap();
//! ```

use anyhow::{Context, Result, bail};
use std::path::Path;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::manifest::BuildArtifact;
use crate::models::{ExternalId, ID_SEPARATOR};
use crate::project::{Configuration, ProjectSnapshot, ResolvedModule};

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG` when set, otherwise stays silent.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// Parse `group:artifact:version` test shorthand.
///
/// Test data never contains the separator inside a coordinate.
pub fn coords(encoded: &str) -> Result<ExternalId> {
    let parts: Vec<&str> = encoded.split(ID_SEPARATOR).collect();
    let [group, artifact, version] = parts.as_slice() else {
        bail!("expected group:artifact:version, got '{encoded}'");
    };
    Ok(ExternalId::new(*group, *artifact, *version))
}

/// Builds [`ProjectSnapshot`]s for tests.
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    project: BuildArtifact,
    configurations: Vec<(String, Vec<String>)>,
    modules: Vec<(String, Vec<String>, bool)>,
}

impl SnapshotBuilder {
    /// Start a snapshot for the given project coordinates.
    pub fn new(group: &str, artifact: &str, version: &str) -> Self {
        Self {
            project: BuildArtifact::new("org.gradle", group, artifact, version),
            configurations: Vec::new(),
            modules: Vec::new(),
        }
    }

    /// Add a configuration with first-level dependencies in `g:a:v` form.
    #[must_use]
    pub fn configuration(mut self, name: &str, dependencies: &[&str]) -> Self {
        self.configurations
            .push((name.to_string(), dependencies.iter().map(|d| (*d).to_string()).collect()));
        self
    }

    /// Add an artifact-bearing module with its dependencies in `g:a:v` form.
    #[must_use]
    pub fn module(mut self, id: &str, dependencies: &[&str]) -> Self {
        self.modules
            .push((id.to_string(), dependencies.iter().map(|d| (*d).to_string()).collect(), true));
        self
    }

    /// Add a module that carries no artifacts (a platform or BOM).
    #[must_use]
    pub fn platform(mut self, id: &str, dependencies: &[&str]) -> Self {
        self.modules
            .push((id.to_string(), dependencies.iter().map(|d| (*d).to_string()).collect(), false));
        self
    }

    /// Build and validate the snapshot.
    pub fn build(&self) -> Result<ProjectSnapshot> {
        let configurations = self
            .configurations
            .iter()
            .map(|(name, deps)| {
                Ok(Configuration {
                    name: name.clone(),
                    dependencies: deps.iter().map(|d| coords(d)).collect::<Result<_>>()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let modules = self
            .modules
            .iter()
            .map(|(id, deps, artifacts)| {
                Ok(ResolvedModule {
                    id: coords(id)?,
                    artifacts: *artifacts,
                    dependencies: deps.iter().map(|d| coords(d)).collect::<Result<_>>()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        ProjectSnapshot::new(self.project.clone(), configurations, modules)
    }

    /// Build the snapshot and write it as JSON to `path`.
    pub fn write_to(&self, path: &Path) -> Result<ProjectSnapshot> {
        let snapshot = self.build()?;
        let json = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;
        Ok(snapshot)
    }
}
