//! Arguments and setup shared by the CLI commands.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::config::Settings;
use crate::project::ProjectSnapshot;

/// Global state passed from the root command to each subcommand.
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    /// Settings file given with `--config`
    pub settings_path: Option<PathBuf>,
    /// Suppress non-error output
    pub quiet: bool,
}

/// Project input and the settings every command can override.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Resolved project snapshot exported by the host build (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub project: PathBuf,

    /// Output directory (default: build/BlackDuck)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Record only these scopes (comma-separated, repeatable)
    #[arg(long = "include-scope", value_name = "SCOPE", value_delimiter = ',')]
    pub include_scopes: Vec<String>,

    /// Never record these scopes (comma-separated, repeatable)
    #[arg(long = "exclude-scope", value_name = "SCOPE", value_delimiter = ',')]
    pub exclude_scopes: Vec<String>,

    /// Leave modules matching this `group:artifact` glob out of the tree (repeatable)
    #[arg(long = "exclude-module", value_name = "PATTERN")]
    pub exclude_modules: Vec<String>,

    /// Name of the tree root and prefix of the tree file
    #[arg(long, value_name = "NAME")]
    pub hub_project_name: Option<String>,

    /// Version of the tree root
    #[arg(long, value_name = "VERSION")]
    pub hub_version_name: Option<String>,
}

impl ProjectArgs {
    /// Load settings and apply the command-line overrides on top.
    ///
    /// Scope and module lists given on the command line extend the lists from
    /// the settings file.
    pub fn settings(&self, ctx: &CommandContext) -> Result<Settings> {
        let working_dir = std::env::current_dir().context("Cannot determine working directory")?;
        let mut settings = Settings::load(ctx.settings_path.as_deref(), &working_dir)?;

        if let Some(dir) = &self.output_dir {
            settings.output.directory = Some(dir.clone());
        }
        settings.scopes.include.extend(self.include_scopes.iter().cloned());
        settings.scopes.exclude.extend(self.exclude_scopes.iter().cloned());
        settings.modules.exclude.extend(self.exclude_modules.iter().cloned());
        if let Some(name) = &self.hub_project_name {
            settings.hub.project_name = Some(name.clone());
        }
        if let Some(version) = &self.hub_version_name {
            settings.hub.version_name = Some(version.clone());
        }

        Ok(settings)
    }

    /// Load the resolved project snapshot.
    pub fn load_project(&self) -> Result<ProjectSnapshot> {
        ProjectSnapshot::load(&self.project)
    }
}
