//! Write only the dependency tree file.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::common::{CommandContext, ProjectArgs};
use crate::generator::{RunOptions, write_hub_output};

/// Write `<hub-project-name>_bdio.json` without touching `build-info.json`.
#[derive(Args, Debug)]
pub struct HubOutputCommand {
    #[command(flatten)]
    project: ProjectArgs,
}

impl HubOutputCommand {
    /// Run the command.
    pub fn execute(self, ctx: &CommandContext) -> Result<()> {
        let settings = self.project.settings(ctx)?;
        let snapshot = self.project.load_project()?;
        let options = RunOptions::from_settings(&settings, None)?;

        let path = write_hub_output(&snapshot, &options)?;

        if !ctx.quiet {
            println!("{} Wrote dependency tree to {}", "✓".green(), path.display());
        }
        Ok(())
    }
}
