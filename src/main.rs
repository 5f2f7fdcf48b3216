//! buildinfo CLI entry point
//!
//! Parses arguments, installs logging, runs the command, and renders any
//! failure with context and suggestions before exiting with status 1.

use anyhow::Result;
use buildinfo_cli::cli;
use buildinfo_cli::core::user_friendly_error;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.init_logging();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
