//! Build manifest (`build-info.json`) model.
//!
//! The build manifest records which resolved dependencies a build used and
//! under which scopes. One manifest exists per output directory; in a
//! multi-module build every sub-module invocation sharing the same build
//! identifier extends it instead of replacing it.
//!
//! # File Format
//!
//! ```json
//! {
//!   "buildId": "1234",
//!   "buildArtifact": { "type": "org.gradle", "group": "com.example", "artifact": "app", "version": "1.0.0" },
//!   "dependencies": [
//!     { "group": "com.x", "artifact": "lib", "version": "1.0", "scopes": ["compile", "test"] }
//!   ]
//! }
//! ```
//!
//! # Lifecycle
//!
//! - [`io`] loads an existing manifest and decides whether the current run
//!   continues it (same build identifier) or starts fresh.
//! - [`merge`] folds freshly observed `(scope, module)` pairs into its
//!   dependency set.
//! - [`io`] persists the result atomically.

pub mod io;
pub mod merge;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_ARTIFACT_TYPE;
use crate::models::ExternalId;

pub use io::{ManifestStore, reconcile};
pub use merge::{DependencyMerger, Observation, merge_dependencies, observe};

/// Identifies the project being built (the root of the build, not a dependency).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildArtifact {
    /// Build tool flavor, e.g. `org.gradle`
    #[serde(rename = "type", default = "default_artifact_type")]
    pub artifact_type: String,
    /// Project group
    pub group: String,
    /// Project name
    pub artifact: String,
    /// Project version
    pub version: String,
}

fn default_artifact_type() -> String {
    DEFAULT_ARTIFACT_TYPE.to_string()
}

impl BuildArtifact {
    /// Create a build artifact descriptor.
    pub fn new(
        artifact_type: impl Into<String>,
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            artifact_type: artifact_type.into(),
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }

    /// The project's own identity.
    #[must_use]
    pub fn external_id(&self) -> ExternalId {
        ExternalId::new(self.group.clone(), self.artifact.clone(), self.version.clone())
    }
}

/// A recorded dependency and every scope it was seen under.
///
/// Scopes keep first-seen order and never contain duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Dependency identity, serialized as flat `group`/`artifact`/`version` fields
    #[serde(flatten)]
    pub id: ExternalId,
    /// Scopes the dependency was recorded under
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl Dependency {
    /// A dependency seen under a single scope.
    pub fn new(id: ExternalId, scope: impl Into<String>) -> Self {
        Self {
            id,
            scopes: vec![scope.into()],
        }
    }

    /// Record an additional scope. Returns false when it was already present.
    pub fn add_scope(&mut self, scope: &str) -> bool {
        if self.scopes.iter().any(|s| s == scope) {
            return false;
        }
        self.scopes.push(scope.to_string());
        true
    }
}

/// The persisted build-info record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildManifest {
    /// Correlation token shared by all sub-module invocations of one build.
    ///
    /// `None` when the invoking environment supplied no build identifier.
    #[serde(default)]
    pub build_id: Option<String>,
    /// The project that created this manifest
    pub build_artifact: BuildArtifact,
    /// Recorded dependencies, unique by identity
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl BuildManifest {
    /// A fresh manifest with no dependencies.
    pub fn new(build_id: Option<String>, build_artifact: BuildArtifact) -> Self {
        Self {
            build_id,
            build_artifact,
            dependencies: Vec::new(),
        }
    }
}
