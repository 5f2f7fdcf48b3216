//! Resolved project model supplied by the host build tool.
//!
//! Dependency *resolution* (version negotiation, conflict handling) happens in
//! the host build tool. What arrives here is its result: for each named
//! configuration (scope) the first-level resolved modules, and for each module
//! its own resolved dependencies and whether it carries artifacts.
//!
//! [`ResolvedProject`] is the seam the rest of the crate consumes. The
//! [`ProjectSnapshot`] implementation reads that data from a JSON export:
//!
//! ```json
//! {
//!   "project": { "type": "org.gradle", "group": "com.example", "artifact": "app", "version": "1.0.0" },
//!   "configurations": [
//!     { "name": "compile", "dependencies": [ { "group": "com.x", "artifact": "lib", "version": "1.0" } ] }
//!   ],
//!   "modules": [
//!     { "group": "com.x", "artifact": "lib", "version": "1.0", "artifacts": true, "dependencies": [] }
//!   ]
//! }
//! ```
//!
//! The raw module graph is not guaranteed to be acyclic; every walk in this
//! crate carries its own visited set.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::debug;

use crate::core::BuildInfoError;
use crate::manifest::BuildArtifact;
use crate::models::ExternalId;

/// One resolved module of the host build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedModule {
    /// Module coordinates
    #[serde(flatten)]
    pub id: ExternalId,
    /// Whether the module contributes artifacts (platform/BOM modules do not)
    #[serde(default = "default_true")]
    pub artifacts: bool,
    /// Resolved dependencies, in the order the host reported them
    #[serde(default)]
    pub dependencies: Vec<ExternalId>,
}

const fn default_true() -> bool {
    true
}

/// A named configuration and its first-level resolved dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Configuration name, used as the scope name
    pub name: String,
    /// First-level resolved modules, in reported order
    #[serde(default)]
    pub dependencies: Vec<ExternalId>,
}

/// Interface to the host build tool's resolved dependency data.
pub trait ResolvedProject {
    /// Coordinates of the project being built.
    fn project(&self) -> &BuildArtifact;

    /// Configurations in the order the host reports them.
    fn configurations(&self) -> &[Configuration];

    /// Look up a resolved module by identity.
    fn module(&self, id: &ExternalId) -> Option<&ResolvedModule>;

    /// Look up a module that must exist, failing with a collaborator data error.
    fn require_module(&self, scope: &str, id: &ExternalId) -> Result<&ResolvedModule> {
        self.module(id).ok_or_else(|| {
            BuildInfoError::CollaboratorData {
                scope: scope.to_string(),
                module: id.encode(),
                reason: "module is referenced but was not reported as resolved".to_string(),
            }
            .into()
        })
    }

    /// Every module in the transitive closure of `root` (root included) that
    /// carries artifacts, in depth-first pre-order of reported dependencies.
    ///
    /// Each module appears once even when the raw data contains cycles.
    fn all_module_artifacts(&self, scope: &str, root: &ExternalId) -> Result<Vec<ExternalId>> {
        let mut found = Vec::new();
        let mut visited: HashSet<&ExternalId> = HashSet::new();
        let mut stack = vec![self.require_module(scope, root)?];

        while let Some(module) = stack.pop() {
            if !visited.insert(&module.id) {
                continue;
            }
            if module.artifacts {
                found.push(module.id.clone());
            }
            // Push in reverse so the first reported dependency is visited first
            for dep in module.dependencies.iter().rev() {
                if !visited.contains(dep) {
                    stack.push(self.require_module(scope, dep)?);
                }
            }
        }

        Ok(found)
    }
}

/// Resolved project data loaded from a JSON export of the host build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    /// The project being built
    pub project: BuildArtifact,
    /// Resolved configurations
    #[serde(default)]
    pub configurations: Vec<Configuration>,
    /// Every resolved module referenced from any configuration
    #[serde(default)]
    pub modules: Vec<ResolvedModule>,
    #[serde(skip)]
    index: HashMap<ExternalId, usize>,
}

impl ProjectSnapshot {
    /// Build a snapshot from in-memory parts, validating it.
    pub fn new(
        project: BuildArtifact,
        configurations: Vec<Configuration>,
        modules: Vec<ResolvedModule>,
    ) -> Result<Self> {
        let mut snapshot = Self {
            project,
            configurations,
            modules,
            index: HashMap::new(),
        };
        snapshot.reindex()?;
        Ok(snapshot)
    }

    /// Load and validate a snapshot file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read resolved project snapshot: {}", path.display()))?;

        let snapshot: Self =
            serde_json::from_str(&content).map_err(|e| BuildInfoError::SnapshotParseError {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let snapshot = Self::new(snapshot.project, snapshot.configurations, snapshot.modules)
            .with_context(|| format!("Invalid resolved project snapshot: {}", path.display()))?;

        debug!(
            path = %path.display(),
            configurations = snapshot.configurations.len(),
            modules = snapshot.modules.len(),
            "Loaded resolved project snapshot"
        );
        Ok(snapshot)
    }

    fn reindex(&mut self) -> Result<()> {
        let project_id = ExternalId::new(
            self.project.group.clone(),
            self.project.artifact.clone(),
            self.project.version.clone(),
        );
        if let Some(field) = project_id.missing_coordinate() {
            return Err(BuildInfoError::CollaboratorData {
                scope: "project".to_string(),
                module: project_id.encode(),
                reason: format!("project {field} is empty"),
            }
            .into());
        }

        self.index.clear();
        for (position, module) in self.modules.iter().enumerate() {
            if let Some(field) = module.id.missing_coordinate() {
                return Err(BuildInfoError::CollaboratorData {
                    scope: "modules".to_string(),
                    module: module.id.encode(),
                    reason: format!("module {field} is empty"),
                }
                .into());
            }
            if self.index.insert(module.id.clone(), position).is_some() {
                return Err(BuildInfoError::CollaboratorData {
                    scope: "modules".to_string(),
                    module: module.id.encode(),
                    reason: "module is listed more than once".to_string(),
                }
                .into());
            }
        }

        for configuration in &self.configurations {
            if configuration.name.trim().is_empty() {
                return Err(BuildInfoError::CollaboratorData {
                    scope: configuration.name.clone(),
                    module: String::new(),
                    reason: "configuration name is empty".to_string(),
                }
                .into());
            }
            for dep in &configuration.dependencies {
                if !self.index.contains_key(dep) {
                    return Err(BuildInfoError::CollaboratorData {
                        scope: configuration.name.clone(),
                        module: dep.encode(),
                        reason: "first-level dependency was not reported as resolved".to_string(),
                    }
                    .into());
                }
            }
        }

        Ok(())
    }
}

impl ResolvedProject for ProjectSnapshot {
    fn project(&self) -> &BuildArtifact {
        &self.project
    }

    fn configurations(&self) -> &[Configuration] {
        &self.configurations
    }

    fn module(&self, id: &ExternalId) -> Option<&ResolvedModule> {
        self.index.get(id).map(|&i| &self.modules[i])
    }
}
