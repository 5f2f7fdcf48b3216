//! Display the dependency tree.
//!
//! # Output
//!
//! ```text
//! com.example:app:1.0.0
//! ├── com.x:lib:1.0
//! │   └── com.x:core:2.1
//! └── com.y:web:3.0
//!     └── com.x:core:2.1 (*)
//!
//! (*) = shown in full above
//! ```
//!
//! `--format json` prints the same structure as the tree file: a shared module
//! lists its children only at its first occurrence.

use anyhow::{Result, bail};
use clap::{Args, ValueEnum};

use super::common::{CommandContext, ProjectArgs};
use crate::generator::{RunOptions, build_tree};
use crate::output::{TreeRecord, render_text};

/// Output format of the `tree` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TreeFormat {
    /// Box-drawing text
    #[default]
    Tree,
    /// Nested JSON records
    Json,
}

/// Print the dependency tree of a project.
#[derive(Args, Debug)]
pub struct TreeCommand {
    #[command(flatten)]
    project: ProjectArgs,

    /// Maximum depth below the root to display (unlimited if not specified)
    #[arg(short, long)]
    depth: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = TreeFormat::Tree)]
    format: TreeFormat,
}

impl TreeCommand {
    fn validate_arguments(&self) -> Result<()> {
        if self.depth == Some(0) {
            bail!("Depth must be at least 1");
        }
        if self.depth.is_some() && self.format == TreeFormat::Json {
            bail!("--depth applies to the tree format only");
        }
        Ok(())
    }

    /// Run the command.
    pub fn execute(self, ctx: &CommandContext) -> Result<()> {
        self.validate_arguments()?;

        let settings = self.project.settings(ctx)?;
        let snapshot = self.project.load_project()?;
        let options = RunOptions::from_settings(&settings, None)?;
        let tree = build_tree(&snapshot, &options)?;

        match self.format {
            TreeFormat::Tree => print!("{}", render_text(&tree, self.depth)),
            TreeFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&TreeRecord::from_tree(&tree))?);
            }
        }
        Ok(())
    }
}
