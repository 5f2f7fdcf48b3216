//! Dependency merging.
//!
//! Folds freshly observed `(scope, module)` pairs into a previously recorded
//! dependency set:
//!
//! - a known identity gains the scope (no-op when already present)
//! - an unknown identity is inserted only when its scope passes the
//!   [`ScopePolicy`]; otherwise the observation is dropped
//!
//! Each new identity is filtered at insertion only. A dependency recorded
//! by an earlier run is always kept, and a known identity picks up later
//! scopes even when the policy would exclude them. A sighting under an
//! excluded scope is simply lost: if the same module shows up later under an
//! included scope it is recorded with that scope alone, and the excluded
//! scope is not added back retroactively.

use anyhow::{Context, Result};
use std::collections::HashMap;
use tracing::debug;

use super::Dependency;
use crate::models::ExternalId;
use crate::project::ResolvedProject;
use crate::scope::ScopePolicy;

/// A module seen under a scope in the current run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Scope (configuration) name
    pub scope: String,
    /// Observed module
    pub id: ExternalId,
}

impl Observation {
    /// Create an observation.
    pub fn new(scope: impl Into<String>, id: ExternalId) -> Self {
        Self {
            scope: scope.into(),
            id,
        }
    }
}

/// Flatten a resolved project into observations.
///
/// For every configuration, in reported order, each first-level dependency
/// contributes every artifact-bearing module of its transitive closure. A
/// first-level module whose closure carries no artifacts contributes its own
/// coordinates instead.
pub fn observe<P: ResolvedProject + ?Sized>(project: &P) -> Result<Vec<Observation>> {
    let mut observations = Vec::new();

    for configuration in project.configurations() {
        let scope = configuration.name.as_str();
        for first_level in &configuration.dependencies {
            let artifacts = project
                .all_module_artifacts(scope, first_level)
                .with_context(|| format!("Failed to expand '{first_level}' in scope '{scope}'"))?;

            if artifacts.is_empty() {
                observations.push(Observation::new(scope, first_level.clone()));
            } else {
                observations.extend(artifacts.into_iter().map(|id| Observation::new(scope, id)));
            }
        }
    }

    Ok(observations)
}

/// Accumulates dependencies keyed by identity, preserving insertion order.
#[derive(Debug, Default)]
pub struct DependencyMerger {
    dependencies: Vec<Dependency>,
    index: HashMap<ExternalId, usize>,
}

impl DependencyMerger {
    /// Seed the merger with previously recorded dependencies.
    ///
    /// Duplicate identities in the prior set are collapsed into one entry with
    /// the union of their scopes.
    pub fn seeded(prior: impl IntoIterator<Item = Dependency>) -> Self {
        let mut merger = Self::default();
        for dependency in prior {
            match merger.index.get(&dependency.id) {
                Some(&i) => {
                    for scope in &dependency.scopes {
                        merger.dependencies[i].add_scope(scope);
                    }
                }
                None => {
                    merger.index.insert(dependency.id.clone(), merger.dependencies.len());
                    merger.dependencies.push(dependency);
                }
            }
        }
        merger
    }

    /// Apply one observation.
    pub fn observe(&mut self, observation: Observation, policy: &ScopePolicy) {
        let Observation { scope, id } = observation;

        if let Some(&i) = self.index.get(&id) {
            if self.dependencies[i].add_scope(&scope) {
                debug!(dependency = %id, scope = %scope, "Added scope to existing dependency");
            }
            return;
        }

        if policy.should_include(&scope) {
            debug!(dependency = %id, scope = %scope, "Recorded new dependency");
            self.index.insert(id.clone(), self.dependencies.len());
            self.dependencies.push(Dependency::new(id, scope));
        } else {
            debug!(dependency = %id, scope = %scope, "Skipped dependency in excluded scope");
        }
    }

    /// Number of distinct dependencies recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    /// True when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Finish merging.
    #[must_use]
    pub fn into_dependencies(self) -> Vec<Dependency> {
        self.dependencies
    }
}

/// Merge `fresh` observations into `prior` under `policy`.
pub fn merge_dependencies(
    prior: impl IntoIterator<Item = Dependency>,
    fresh: impl IntoIterator<Item = Observation>,
    policy: &ScopePolicy,
) -> Vec<Dependency> {
    let mut merger = DependencyMerger::seeded(prior);
    for observation in fresh {
        merger.observe(observation, policy);
    }
    merger.into_dependencies()
}
