//! Command-line interface for buildinfo.
//!
//! # Commands
//!
//! - `build-info` - Record dependencies in `build-info.json` and write the tree file
//! - `hub-output` - Write only the dependency tree file
//! - `tree` - Print the dependency tree
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - Debug logging
//! - `--quiet` / `-q` - Errors only
//! - `--config` / `-c` - Settings file (default: `buildinfo.toml` if present)
//!
//! Logs go to stderr; command results go to stdout.

mod build_info;
mod common;
mod hub_output;
mod tree;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub use build_info::BuildInfoCommand;
pub use common::{CommandContext, ProjectArgs};
pub use hub_output::HubOutputCommand;
pub use tree::{TreeCommand, TreeFormat};

/// Root command.
#[derive(Parser, Debug)]
#[command(
    name = "buildinfo",
    about = "Record resolved build dependencies for multi-module builds",
    version,
    long_about = "buildinfo records which resolved dependencies a build used, under which scopes, \
                  merging the results of every sub-module of a multi-module build into one manifest."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Settings file (default: buildinfo.toml in the working directory, if present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record dependencies in build-info.json and write the dependency tree
    BuildInfo(BuildInfoCommand),
    /// Write only the dependency tree file
    HubOutput(HubOutputCommand),
    /// Print the dependency tree
    Tree(TreeCommand),
}

impl Cli {
    /// Log filter implied by the verbosity flags.
    ///
    /// `--verbose` and `--quiet` win over `RUST_LOG`; otherwise `RUST_LOG`
    /// is honored and defaults to `info`.
    #[must_use]
    pub fn log_filter(&self) -> EnvFilter {
        if self.verbose {
            EnvFilter::new("debug")
        } else if self.quiet {
            EnvFilter::new("error")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        }
    }

    /// Install the stderr log subscriber.
    pub fn init_logging(&self) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(self.log_filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .try_init();
    }

    /// Run the selected command.
    pub async fn execute(self) -> Result<()> {
        let ctx = CommandContext {
            settings_path: self.config,
            quiet: self.quiet,
        };

        match self.command {
            Commands::BuildInfo(cmd) => cmd.execute(&ctx).await,
            Commands::HubOutput(cmd) => cmd.execute(&ctx),
            Commands::Tree(cmd) => cmd.execute(&ctx),
        }
    }
}
