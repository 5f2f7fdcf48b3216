//! Writing build outputs.
//!
//! Two files land in the output directory:
//!
//! - `build-info.json`, the [`BuildManifest`]
//! - `<hub-project-name>_bdio.json`, the dependency tree as nested
//!   `{group, artifact, version, children}` records
//!
//! Both are written atomically. Each module's children are listed once, at its
//! first occurrence in depth-first order. Later occurrences, including the back
//! edge of a dependency cycle, are rendered with no children, so the file grows
//! with the number of links rather than the number of paths.

pub mod text;

use anyhow::{Context, Result};
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::TREE_FILE_SUFFIX;
use crate::core::BuildInfoError;
use crate::graph::DependencyTree;
use crate::manifest::{BuildManifest, ManifestStore};
use crate::utils::fs::atomic_write;

pub use text::render_text;

/// One node of the serialized dependency tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeRecord {
    /// Module group
    pub group: String,
    /// Module name
    pub artifact: String,
    /// Module version
    pub version: String,
    /// Dependencies in reported order
    #[serde(default)]
    pub children: Vec<TreeRecord>,
}

impl TreeRecord {
    fn leaf(tree: &DependencyTree, node: NodeIndex) -> Self {
        let id = tree.id(node);
        Self {
            group: id.group.clone(),
            artifact: id.artifact.clone(),
            version: id.version.clone(),
            children: Vec::new(),
        }
    }

    /// Materialize `tree` as nested records.
    ///
    /// A node is expanded the first time it is reached; every later reference
    /// is a leaf. The walk uses an explicit stack, so deep trees do not exhaust
    /// the call stack.
    #[must_use]
    pub fn from_tree(tree: &DependencyTree) -> Self {
        struct Frame {
            record: TreeRecord,
            children: Vec<NodeIndex>,
            next: usize,
        }

        let root = tree.root();
        let mut expanded: HashSet<NodeIndex> = HashSet::from([root]);
        let mut stack = vec![Frame {
            record: Self::leaf(tree, root),
            children: tree.children(root),
            next: 0,
        }];

        let mut finished = None;
        while let Some(top) = stack.last_mut() {
            if let Some(&child) = top.children.get(top.next) {
                top.next += 1;
                if expanded.insert(child) {
                    stack.push(Frame {
                        record: Self::leaf(tree, child),
                        children: tree.children(child),
                        next: 0,
                    });
                } else {
                    top.record.children.push(Self::leaf(tree, child));
                }
                continue;
            }

            if let Some(done) = stack.pop() {
                match stack.last_mut() {
                    Some(parent) => parent.record.children.push(done.record),
                    None => finished = Some(done.record),
                }
            }
        }

        finished.unwrap_or_else(|| Self::leaf(tree, root))
    }
}

/// File name of the dependency tree for a hub project.
///
/// # Errors
///
/// Returns a configuration error when the name is empty, is `.` or `..`, or
/// contains a path separator, since the file must land in the output directory.
pub fn tree_file_name(hub_project_name: &str) -> Result<String> {
    if hub_project_name.is_empty()
        || hub_project_name == "."
        || hub_project_name == ".."
        || hub_project_name.contains(['/', '\\'])
    {
        return Err(BuildInfoError::ConfigError {
            message: format!("Invalid hub project name '{hub_project_name}': must be a plain file name"),
        }
        .into());
    }
    Ok(format!("{hub_project_name}{TREE_FILE_SUFFIX}"))
}

/// Paths written by [`emit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFiles {
    /// The build manifest
    pub manifest: PathBuf,
    /// The dependency tree
    pub tree: PathBuf,
}

/// Write only the dependency tree file. Returns its path.
pub fn emit_tree(tree: &DependencyTree, output_dir: &Path, file_name: &str) -> Result<PathBuf> {
    let path = output_dir.join(file_name);
    let record = TreeRecord::from_tree(tree);

    let mut content =
        serde_json::to_string_pretty(&record).context("Failed to serialize dependency tree")?;
    content.push('\n');
    atomic_write(&path, content.as_bytes())
        .with_context(|| format!("Cannot write dependency tree: {}", path.display()))?;

    info!(path = %path.display(), nodes = tree.node_count(), "Wrote dependency tree");
    Ok(path)
}

/// Write the manifest and the dependency tree to `output_dir`.
///
/// Each file is replaced atomically. The manifest is written first; if the
/// tree write fails the run fails, and the caller reports the error.
pub fn emit(
    manifest: &BuildManifest,
    tree: &DependencyTree,
    output_dir: &Path,
    tree_file: &str,
) -> Result<EmittedFiles> {
    let store = ManifestStore::new(output_dir);
    store.persist(manifest)?;
    let tree = emit_tree(tree, output_dir, tree_file)?;
    Ok(EmittedFiles {
        manifest: store.path(),
        tree,
    })
}
