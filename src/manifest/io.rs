//! Loading, reconciling, and persisting the build manifest.
//!
//! The manifest file is the only state shared between sub-module invocations
//! of one build. Each invocation loads it, [`reconcile`]s it with the current
//! build identifier, merges its own dependencies, and persists it again.
//!
//! A missing file is an ordinary outcome (`Ok(None)`), detected from the read
//! itself rather than a separate existence check.

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::{BuildArtifact, BuildManifest};
use crate::constants::MANIFEST_FILE_NAME;
use crate::core::BuildInfoError;
use crate::utils::fs::{atomic_write, ensure_dir};

/// Reads and writes `build-info.json` in one output directory.
#[derive(Debug, Clone)]
pub struct ManifestStore {
    output_dir: PathBuf,
    recover_corrupt: bool,
}

impl ManifestStore {
    /// Store rooted at `output_dir`. Corrupt manifests are fatal.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            recover_corrupt: false,
        }
    }

    /// Treat an unparsable manifest as absent instead of failing.
    #[must_use]
    pub fn recover_corrupt(mut self, recover: bool) -> Self {
        self.recover_corrupt = recover;
        self
    }

    /// Output directory this store manages.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Full path of the manifest file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.output_dir.join(MANIFEST_FILE_NAME)
    }

    /// Load the existing manifest.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(manifest))` - a manifest was found and parsed
    /// * `Ok(None)` - no manifest file, or the file is empty/whitespace only
    ///
    /// # Errors
    ///
    /// * [`BuildInfoError::CorruptManifest`] when the file has content that does
    ///   not parse, unless corrupt recovery is enabled (then `Ok(None)` with a warning)
    /// * I/O errors other than "not found"
    pub fn load(&self) -> Result<Option<BuildManifest>> {
        let path = self.path();

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No existing build manifest");
                return Ok(None);
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Cannot read build manifest: {}", path.display())
                });
            }
        };

        if content.trim().is_empty() {
            debug!(path = %path.display(), "Existing build manifest is empty");
            return Ok(None);
        }

        match serde_json::from_str::<BuildManifest>(&content) {
            Ok(manifest) => {
                debug!(
                    path = %path.display(),
                    build_id = ?manifest.build_id,
                    dependencies = manifest.dependencies.len(),
                    "Loaded existing build manifest"
                );
                Ok(Some(manifest))
            }
            Err(e) if self.recover_corrupt => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Existing build manifest is corrupt; starting a fresh one"
                );
                Ok(None)
            }
            Err(e) => Err(BuildInfoError::CorruptManifest {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
            .into()),
        }
    }

    /// Write the manifest, replacing any previous content.
    ///
    /// Creates the output directory (and parents) if needed. The write goes
    /// through a temporary file and a rename, so readers see either the old or
    /// the new manifest, never a partial one.
    pub fn persist(&self, manifest: &BuildManifest) -> Result<()> {
        let path = self.path();
        ensure_dir(&self.output_dir)?;

        let mut content = serde_json::to_string_pretty(manifest)
            .context("Failed to serialize build manifest")?;
        content.push('\n');

        atomic_write(&path, content.as_bytes())
            .with_context(|| format!("Cannot write build manifest: {}", path.display()))?;

        info!(
            path = %path.display(),
            dependencies = manifest.dependencies.len(),
            "Wrote build manifest"
        );
        Ok(())
    }
}

/// Decide whether the current run continues `existing` or starts fresh.
///
/// - No existing manifest, no current build id, or a different build id:
///   a fresh manifest for `current_build_id` and `artifact` with no dependencies.
/// - Same build id: `existing` unchanged. Its artifact stays the one recorded
///   by the first sub-module of the build.
pub fn reconcile(
    existing: Option<BuildManifest>,
    current_build_id: Option<&str>,
    artifact: BuildArtifact,
) -> BuildManifest {
    match (existing, current_build_id) {
        (Some(existing), Some(current)) if existing.build_id.as_deref() == Some(current) => {
            info!(build_id = current, "Continuing build manifest of a multi-module build");
            existing
        }
        (Some(existing), current) => {
            info!(
                previous = ?existing.build_id,
                current = ?current,
                "Existing build manifest belongs to another build; starting a fresh one"
            );
            BuildManifest::new(current.map(str::to_string), artifact)
        }
        (None, current) => {
            info!(build_id = ?current, "Creating a new build manifest");
            BuildManifest::new(current.map(str::to_string), artifact)
        }
    }
}
