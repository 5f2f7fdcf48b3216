//! buildinfo - resolved dependency recording for multi-module builds
//!
//! A host build tool (Gradle, Maven, ...) resolves each sub-module's
//! dependencies and exports them as a project snapshot. For every snapshot,
//! buildinfo:
//!
//! - records each resolved module and the scopes it was seen under in
//!   `build-info.json`, merging the results of all sub-modules that share a
//!   build id into one manifest
//! - writes a deduplicated dependency tree (`<project>_bdio.json`) for
//!   downstream scanning tools
//!
//! # Core Modules
//!
//! - [`models`] - Module identity ([`models::ExternalId`])
//! - [`scope`] - Scope include/exclude policy
//! - [`pattern`] - Module exclusion globs
//! - [`project`] - The host build's resolved data ([`project::ResolvedProject`])
//! - [`manifest`] - Build manifest model, merging, loading, and persisting
//! - [`graph`] - Dependency tree construction
//! - [`output`] - Tree rendering and output files
//! - [`generator`] - End-to-end runs
//!
//! ## Supporting Modules
//!
//! - [`config`] - `buildinfo.toml` settings
//! - [`core`] - Error types and user-facing error rendering
//! - [`utils`] - Atomic writes and the output directory lock
//! - [`cli`] - Command-line interface
//!
//! # Example
//!
//! ```rust,no_run
//! use buildinfo_cli::config::Settings;
//! use buildinfo_cli::generator::{RunOptions, write_build_info};
//! use buildinfo_cli::project::ProjectSnapshot;
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let project = ProjectSnapshot::load(Path::new("build/resolved.json"))?;
//! let options = RunOptions::from_settings(&Settings::default(), Some("build-42".to_string()))?;
//! let report = write_build_info(&project, &options).await?;
//! println!("{} dependencies recorded", report.manifest.dependencies.len());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod generator;
pub mod graph;
pub mod manifest;
pub mod models;
pub mod output;
pub mod pattern;
pub mod project;
pub mod scope;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
