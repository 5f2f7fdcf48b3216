//! File system helpers and output directory coordination.
//!
//! # Modules
//!
//! - [`fs`] - Directory creation and atomic file writes
//! - [`lock`] - Cross-process lock on the output directory
//!
//! # Example
//!
//! ```rust,no_run
//! use buildinfo_cli::utils::{atomic_write, ensure_dir};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! ensure_dir(Path::new("build/BlackDuck"))?;
//! atomic_write(Path::new("build/BlackDuck/build-info.json"), b"{}")?;
//! # Ok(())
//! # }
//! ```

pub mod fs;
pub mod lock;

pub use fs::{atomic_write, ensure_dir};
pub use lock::OutputLock;
