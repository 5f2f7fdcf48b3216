//! End-to-end runs over a resolved project.
//!
//! [`write_build_info`] is the multi-module aware run:
//!
//! 1. Build the dependency tree ([`GraphBuilder`])
//! 2. Flatten configurations into `(scope, module)` observations
//! 3. Under the output directory lock: load the existing manifest, reconcile
//!    it with the current build id, merge the observations, and emit the
//!    manifest and tree files
//!
//! [`write_hub_output`] writes only the tree file and never touches the manifest.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::{HubSettings, Settings};
use crate::constants::default_lock_timeout;
use crate::graph::{DependencyTree, GraphBuilder};
use crate::manifest::{BuildManifest, ManifestStore, merge_dependencies, observe, reconcile};
use crate::models::ExternalId;
use crate::output::{EmittedFiles, emit, emit_tree, tree_file_name};
use crate::pattern::ModuleFilter;
use crate::project::ResolvedProject;
use crate::scope::ScopePolicy;
use crate::utils::OutputLock;

/// Everything a run needs besides the project itself.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory receiving `build-info.json` and the tree file
    pub output_dir: PathBuf,
    /// Correlation token of the current build, if the environment supplied one
    pub build_id: Option<String>,
    /// Scope policy for recording and tree roots
    pub policy: ScopePolicy,
    /// Modules left out of the tree
    pub modules: ModuleFilter,
    /// Tree root naming
    pub hub: HubSettings,
    /// Treat an unparsable manifest as absent
    pub recover_corrupt: bool,
    /// How long to wait for the output directory lock
    pub lock_timeout: Duration,
}

impl RunOptions {
    /// Options from loaded settings.
    pub fn from_settings(settings: &Settings, build_id: Option<String>) -> Result<Self> {
        Ok(Self {
            output_dir: settings.output_dir(),
            build_id,
            policy: settings.scopes.clone(),
            modules: settings.module_filter()?,
            hub: settings.hub.clone(),
            recover_corrupt: settings.manifest.recover_corrupt,
            lock_timeout: default_lock_timeout(),
        })
    }
}

/// Result of [`write_build_info`].
#[derive(Debug, Clone)]
pub struct BuildInfoReport {
    /// The manifest as written
    pub manifest: BuildManifest,
    /// Files written
    pub files: EmittedFiles,
    /// Distinct modules in the tree, root included
    pub tree_nodes: usize,
}

/// Identity of the synthetic tree root for `project`.
pub fn root_id<P: ResolvedProject + ?Sized>(project: &P, hub: &HubSettings) -> ExternalId {
    let artifact = project.project();
    ExternalId::new(
        artifact.group.clone(),
        hub.project_name_for(artifact),
        hub.version_name_for(artifact),
    )
}

/// Build the dependency tree of `project`.
pub fn build_tree<P: ResolvedProject + ?Sized>(
    project: &P,
    options: &RunOptions,
) -> Result<DependencyTree> {
    GraphBuilder::new(project, &options.policy, &options.modules)
        .build(root_id(project, &options.hub))
        .context("Failed to build dependency tree")
}

/// Record the project's dependencies in the shared build manifest and write
/// the dependency tree.
pub async fn write_build_info<P: ResolvedProject + ?Sized>(
    project: &P,
    options: &RunOptions,
) -> Result<BuildInfoReport> {
    let artifact = project.project();
    info!(project = %artifact.external_id(), output = %options.output_dir.display(), "Writing build info");

    let tree_file = tree_file_name(&options.hub.project_name_for(artifact))?;
    let tree = build_tree(project, options)?;
    let observations = observe(project)?;

    let build_id = options.build_id.as_deref().filter(|id| !id.trim().is_empty());
    if build_id.is_none() {
        warn!("No build id supplied; the build manifest will not be continued from earlier modules");
    }

    let _lock = OutputLock::acquire_with_timeout(&options.output_dir, options.lock_timeout).await?;

    let store = ManifestStore::new(&options.output_dir).recover_corrupt(options.recover_corrupt);
    let existing = store.load()?;
    let mut manifest = reconcile(existing, build_id, artifact.clone());
    let prior = std::mem::take(&mut manifest.dependencies);
    manifest.dependencies = merge_dependencies(prior, observations, &options.policy);

    let files = emit(&manifest, &tree, &options.output_dir, &tree_file)?;

    info!(
        build_id = ?manifest.build_id,
        dependencies = manifest.dependencies.len(),
        "Build info complete"
    );
    Ok(BuildInfoReport {
        manifest,
        files,
        tree_nodes: tree.node_count(),
    })
}

/// Write only the dependency tree file. Returns its path.
pub fn write_hub_output<P: ResolvedProject + ?Sized>(
    project: &P,
    options: &RunOptions,
) -> Result<PathBuf> {
    let tree_file = tree_file_name(&options.hub.project_name_for(project.project()))?;
    let tree = build_tree(project, options)?;
    emit_tree(&tree, &options.output_dir, &tree_file)
}
