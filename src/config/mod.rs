//! Settings for buildinfo runs.
//!
//! Settings come from an optional TOML file. Command-line flags override
//! individual values after loading.
//!
//! # Settings File (`buildinfo.toml`)
//!
//! **Location:** passed with `--config`, otherwise `buildinfo.toml` in the
//! working directory when present. Every section and key is optional.
//!
//! ```toml
//! [scopes]
//! include = ["compile", "runtime"]   # empty or absent: every scope
//! exclude = ["testCompile"]          # always wins over include
//!
//! [modules]
//! exclude = ["com.internal:*"]       # glob over "group:artifact"
//!
//! [output]
//! directory = "build/BlackDuck"
//!
//! [hub]
//! project-name = "my-project"        # defaults to the project's artifact name
//! version-name = "1.0.0"             # defaults to the project's version
//!
//! [manifest]
//! recover-corrupt = false            # treat an unparsable build-info.json as absent
//! ```
//!
//! Unknown keys are rejected so that typos do not silently change the output.

mod parser;

pub use parser::parse_config;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{DEFAULT_OUTPUT_DIR, DEFAULT_SETTINGS_FILE};
use crate::core::BuildInfoError;
use crate::manifest::BuildArtifact;
use crate::pattern::ModuleFilter;
use crate::scope::ScopePolicy;

/// All settings of one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Which scopes are recorded and become tree roots
    pub scopes: ScopePolicy,
    /// Modules left out of the dependency tree
    pub modules: ModuleSettings,
    /// Where outputs are written
    pub output: OutputSettings,
    /// Naming of the dependency tree's root
    pub hub: HubSettings,
    /// Manifest loading behavior
    pub manifest: ManifestSettings,
}

/// `[modules]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModuleSettings {
    /// Glob patterns over `group:artifact`
    pub exclude: Vec<String>,
}

/// `[output]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    /// Output directory; `build/BlackDuck` when unset
    pub directory: Option<PathBuf>,
}

/// `[hub]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct HubSettings {
    /// Name of the tree root and prefix of the tree file
    pub project_name: Option<String>,
    /// Version of the tree root
    pub version_name: Option<String>,
}

impl HubSettings {
    /// Effective project name for `project`.
    #[must_use]
    pub fn project_name_for(&self, project: &BuildArtifact) -> String {
        self.project_name.clone().unwrap_or_else(|| project.artifact.clone())
    }

    /// Effective version name for `project`.
    #[must_use]
    pub fn version_name_for(&self, project: &BuildArtifact) -> String {
        self.version_name.clone().unwrap_or_else(|| project.version.clone())
    }
}

/// `[manifest]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ManifestSettings {
    /// Treat an unparsable manifest as absent (logged) instead of failing
    pub recover_corrupt: bool,
}

impl Settings {
    /// Load settings.
    ///
    /// With `explicit`, that file must exist. Otherwise `buildinfo.toml` in
    /// `working_dir` is used when present, and defaults when it is not.
    pub fn load(explicit: Option<&Path>, working_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(BuildInfoError::ConfigError {
                    message: format!("Settings file not found: {}", path.display()),
                }
                .into());
            }
            debug!(path = %path.display(), "Loading settings");
            return parse_config(path);
        }

        let default_path = working_dir.join(DEFAULT_SETTINGS_FILE);
        if default_path.is_file() {
            debug!(path = %default_path.display(), "Loading settings");
            parse_config(&default_path)
        } else {
            debug!("No settings file; using defaults");
            Ok(Self::default())
        }
    }

    /// Effective output directory.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.output.directory.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    /// Compile the module exclusion patterns.
    pub fn module_filter(&self) -> Result<ModuleFilter> {
        ModuleFilter::new(&self.modules.exclude)
    }
}
