//! Shared identity model for dependencies and graph nodes.
//!
//! Every dependency recorded in a build manifest and every node of the
//! dependency tree is identified by an [`ExternalId`]: the exact
//! `(group, artifact, version)` triple reported by the host build tool.
//!
//! # Canonical Form
//!
//! The human-readable canonical form is `group:artifact:version`. The
//! separator is not escaped, so coordinates that themselves contain `:`
//! render ambiguously:
//!
//! ```rust
//! use buildinfo_cli::models::ExternalId;
//!
//! let a = ExternalId::new("com.x:y", "lib", "1.0");
//! let b = ExternalId::new("com.x", "y:lib", "1.0");
//! assert_eq!(a.encode(), b.encode());
//! assert_ne!(a, b);
//! ```
//!
//! For that reason the encoded string is only ever used for display and log
//! output. Deduplication maps are keyed by the structured triple itself.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator used by [`ExternalId::encode`].
pub const ID_SEPARATOR: char = ':';

/// The `(group, artifact, version)` identity of a module.
///
/// Equality and hashing are exact and case-sensitive over all three fields;
/// no normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExternalId {
    /// Organization or group coordinate (e.g. `com.google.guava`)
    pub group: String,
    /// Artifact or module name (e.g. `guava`)
    pub artifact: String,
    /// Resolved version string (e.g. `31.1-jre`)
    pub version: String,
}

impl ExternalId {
    /// Create a new identity from its three coordinates.
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }

    /// Render the canonical `group:artifact:version` string.
    #[must_use]
    pub fn encode(&self) -> String {
        encode(&self.group, &self.artifact, &self.version)
    }

    /// `group:artifact`, the key module exclusion patterns are matched against.
    #[must_use]
    pub fn module_key(&self) -> String {
        format!("{}{ID_SEPARATOR}{}", self.group, self.artifact)
    }

    /// Returns the name of the first empty coordinate, if any.
    pub fn missing_coordinate(&self) -> Option<&'static str> {
        if self.group.trim().is_empty() {
            Some("group")
        } else if self.artifact.trim().is_empty() {
            Some("artifact")
        } else if self.version.trim().is_empty() {
            Some("version")
        } else {
            None
        }
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{ID_SEPARATOR}{}{ID_SEPARATOR}{}", self.group, self.artifact, self.version)
    }
}

/// Join coordinates into the canonical `group:artifact:version` form.
#[must_use]
pub fn encode(group: &str, artifact: &str, version: &str) -> String {
    format!("{group}{ID_SEPARATOR}{artifact}{ID_SEPARATOR}{version}")
}
