//! Dependency graph construction.
//!
//! Builds a single tree rooted at a synthetic node for the project itself,
//! whose children are the first-level modules of every included configuration.
//!
//! # Structure
//!
//! Nodes live in a [`petgraph::graph::DiGraph`] arena and are addressed by
//! [`NodeIndex`]. Each [`ExternalId`] maps to exactly one node, so a module
//! reachable through several parents is one shared node with several incoming
//! edges. Edge weights record the child's position under its parent, which
//! keeps children in the order the host build reported them.
//!
//! # Cycles
//!
//! An identity is registered before its children are walked, so raw data in
//! which a module depends on itself (directly or indirectly) terminates. The
//! cycle stays in the arena as a back edge; renderers cut it when they meet a
//! node already on the current path.

use anyhow::Result;
use petgraph::Direction;
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::models::ExternalId;
use crate::pattern::ModuleFilter;
use crate::project::ResolvedProject;
use crate::scope::ScopePolicy;

/// A deduplicated dependency tree over an index arena.
#[derive(Debug, Clone)]
pub struct DependencyTree {
    graph: DiGraph<ExternalId, usize>,
    root: NodeIndex,
    node_map: HashMap<ExternalId, NodeIndex>,
}

impl DependencyTree {
    fn with_root(root_id: ExternalId) -> Self {
        let mut graph = DiGraph::new();
        // The root is not memoized: a resolved module with the project's own
        // coordinates gets a node of its own.
        let root = graph.add_node(root_id);
        Self {
            graph,
            root,
            node_map: HashMap::new(),
        }
    }

    /// Index of the synthetic project node.
    #[must_use]
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    /// Identity of a node.
    #[must_use]
    pub fn id(&self, node: NodeIndex) -> &ExternalId {
        &self.graph[node]
    }

    /// Children of a node in reported order.
    #[must_use]
    pub fn children(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<(usize, NodeIndex)> =
            self.graph.edges(node).map(|edge| (*edge.weight(), edge.target())).collect();
        edges.sort_unstable_by_key(|(position, _)| *position);
        edges.into_iter().map(|(_, child)| child).collect()
    }

    /// Node of a resolved module, if it is part of the tree. Never the root.
    #[must_use]
    pub fn node_for(&self, id: &ExternalId) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    /// Number of distinct nodes, the root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of parent-child links.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of distinct parents referencing `node`.
    #[must_use]
    pub fn parent_count(&self, node: NodeIndex) -> usize {
        self.graph.neighbors_directed(node, Direction::Incoming).count()
    }

    /// Whether the raw data contained a dependency cycle.
    #[must_use]
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Returns the node for `id`, creating it when unseen. The flag is true for new nodes.
    fn ensure_node(&mut self, id: &ExternalId) -> (NodeIndex, bool) {
        if let Some(&index) = self.node_map.get(id) {
            return (index, false);
        }
        let index = self.graph.add_node(id.clone());
        self.node_map.insert(id.clone(), index);
        (index, true)
    }

    /// Link `parent -> child` unless the link already exists.
    fn attach(&mut self, parent: NodeIndex, child: NodeIndex) -> bool {
        if self.graph.find_edge(parent, child).is_some() {
            return false;
        }
        let position = self.graph.edges(parent).count();
        self.graph.add_edge(parent, child, position);
        true
    }
}

/// Walks a [`ResolvedProject`] into a [`DependencyTree`].
pub struct GraphBuilder<'a, P: ResolvedProject + ?Sized> {
    project: &'a P,
    policy: &'a ScopePolicy,
    modules: &'a ModuleFilter,
}

impl<'a, P: ResolvedProject + ?Sized> GraphBuilder<'a, P> {
    /// Create a builder for `project`.
    ///
    /// Configurations rejected by `policy` do not become roots. Modules
    /// matched by `modules` are neither attached nor walked.
    pub fn new(project: &'a P, policy: &'a ScopePolicy, modules: &'a ModuleFilter) -> Self {
        Self {
            project,
            policy,
            modules,
        }
    }

    /// Build the tree under a synthetic root identified by `root_id`.
    ///
    /// # Errors
    ///
    /// Returns a collaborator data error when a module is referenced but was
    /// not reported as resolved.
    pub fn build(&self, root_id: ExternalId) -> Result<DependencyTree> {
        let mut tree = DependencyTree::with_root(root_id);
        let root = tree.root();
        // (scope that discovered the node, node) pairs still to expand
        let mut pending: Vec<(&str, NodeIndex)> = Vec::new();

        for configuration in self.project.configurations() {
            let scope = configuration.name.as_str();
            if !self.policy.should_include(scope) {
                debug!(scope, "Configuration excluded from dependency tree");
                continue;
            }

            for first_level in &configuration.dependencies {
                if let Some(node) = self.link(&mut tree, scope, root, first_level)? {
                    pending.push((scope, node));
                }
            }
        }

        while let Some((scope, node)) = pending.pop() {
            let id = tree.id(node).clone();
            let module = self.project.require_module(scope, &id)?;
            for child in &module.dependencies {
                if let Some(child_node) = self.link(&mut tree, scope, node, child)? {
                    pending.push((scope, child_node));
                }
            }
        }

        if tree.has_cycles() {
            warn!("Resolved dependencies contain a cycle; it will be cut in the rendered tree");
        }
        debug!(
            nodes = tree.node_count(),
            edges = tree.edge_count(),
            "Built dependency tree"
        );
        Ok(tree)
    }

    /// Attach `child` under `parent`. Returns the child's node when it is new
    /// and still needs its own dependencies walked.
    fn link(
        &self,
        tree: &mut DependencyTree,
        scope: &str,
        parent: NodeIndex,
        child: &ExternalId,
    ) -> Result<Option<NodeIndex>> {
        if self.modules.is_excluded(child) {
            return Ok(None);
        }
        // Fail early on references the host never resolved
        self.project.require_module(scope, child)?;

        let (node, created) = tree.ensure_node(child);
        if !tree.attach(parent, node) {
            debug!(parent = %tree.id(parent), child = %child, "Skipped duplicate dependency link");
        }
        Ok(created.then_some(node))
    }
}
