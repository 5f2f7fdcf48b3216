//! Module exclusion patterns.
//!
//! Excluded modules are configured as glob patterns over the
//! `group:artifact` key of a module (the version is not part of the key):
//!
//! - `com.internal:*` excludes every artifact of the `com.internal` group
//! - `*:*-test-fixtures` excludes test fixture artifacts of any group
//! - `org.example:legacy` excludes exactly one module
//!
//! The dependency graph builder neither attaches nor walks a module matching
//! any pattern, so its whole subtree is pruned from that point of the tree.

use anyhow::{Context, Result};
use glob::Pattern;
use tracing::debug;

use crate::models::ExternalId;

/// Compiled set of module exclusion patterns.
#[derive(Debug, Clone, Default)]
pub struct ModuleFilter {
    patterns: Vec<Pattern>,
}

impl ModuleFilter {
    /// Compile the given patterns.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first pattern that is not valid glob syntax.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                Pattern::new(p).with_context(|| format!("Invalid module exclusion pattern: {p}"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            patterns,
        })
    }

    /// Filter that excludes nothing.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether the module is excluded.
    #[must_use]
    pub fn is_excluded(&self, id: &ExternalId) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let key = id.module_key();
        let excluded = self.patterns.iter().any(|p| p.matches(&key));
        if excluded {
            debug!(module = %id, "Module excluded by pattern");
        }
        excluded
    }

    /// Number of configured patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True when no patterns are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
