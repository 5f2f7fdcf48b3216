//! Record a project's dependencies in the shared build manifest.
//!
//! Every sub-module of a multi-module build runs this command with the same
//! build id. The first run creates `build-info.json`; later runs with that id
//! merge their dependencies into it. A run with a different id (or none)
//! starts a fresh manifest.
//!
//! # Examples
//!
//! ```bash
//! buildinfo build-info --project build/resolved.json --build-id "$CI_PIPELINE_ID"
//! BUILDINFO_BUILD_ID=42 buildinfo build-info -p resolved.json --exclude-scope testCompile
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::common::{CommandContext, ProjectArgs};
use crate::constants::BUILD_ID_ENV;
use crate::generator::{RunOptions, write_build_info};

/// Write `build-info.json` and the dependency tree file.
#[derive(Args, Debug)]
pub struct BuildInfoCommand {
    #[command(flatten)]
    project: ProjectArgs,

    /// Build correlation token shared by all sub-modules of one build
    #[arg(long, env = BUILD_ID_ENV, value_name = "ID")]
    build_id: Option<String>,

    /// Treat an unparsable existing manifest as absent instead of failing
    #[arg(long)]
    recover_corrupt: bool,
}

impl BuildInfoCommand {
    /// Run the command.
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let mut settings = self.project.settings(ctx)?;
        if self.recover_corrupt {
            settings.manifest.recover_corrupt = true;
        }
        let snapshot = self.project.load_project()?;
        let options = RunOptions::from_settings(&settings, self.build_id)?;

        let report = write_build_info(&snapshot, &options).await?;

        if !ctx.quiet {
            println!(
                "{} Recorded {} dependencies in {}",
                "✓".green(),
                report.manifest.dependencies.len(),
                report.files.manifest.display()
            );
            println!("  Dependency tree: {}", report.files.tree.display());
        }
        Ok(())
    }
}
