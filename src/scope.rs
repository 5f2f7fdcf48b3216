//! Scope filtering.
//!
//! A scope is the host build tool's name for a dependency grouping
//! (a Gradle configuration such as `compile` or `testRuntime`). The
//! [`ScopePolicy`] decides whether dependencies first seen under a scope are
//! recorded at all.
//!
//! The decision is a pure function of the scope name and the static policy,
//! so the order in which the host reports its configurations never changes
//! the outcome.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Include/exclude policy over scope names.
///
/// - An empty include-list admits every scope.
/// - A non-empty include-list admits only the scopes it names.
/// - The exclude-list always wins over the include-list.
///
/// # Examples
///
/// ```rust
/// use buildinfo_cli::scope::ScopePolicy;
///
/// let policy = ScopePolicy::excluding(["testCompile"]);
/// assert!(policy.should_include("compile"));
/// assert!(!policy.should_include("testCompile"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScopePolicy {
    /// Scopes to record. Empty means all.
    pub include: BTreeSet<String>,
    /// Scopes never to record.
    pub exclude: BTreeSet<String>,
}

impl ScopePolicy {
    /// Policy admitting every scope.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Policy admitting every scope except the given ones.
    pub fn excluding<I, S>(excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: BTreeSet::new(),
            exclude: excluded.into_iter().map(Into::into).collect(),
        }
    }

    /// Restrict the policy to the given scopes.
    #[must_use]
    pub fn with_included<I, S>(mut self, included: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = included.into_iter().map(Into::into).collect();
        self
    }

    /// Whether dependencies found under `scope` should be recorded.
    #[must_use]
    pub fn should_include(&self, scope: &str) -> bool {
        if self.exclude.contains(scope) {
            return false;
        }
        self.include.is_empty() || self.include.contains(scope)
    }
}
