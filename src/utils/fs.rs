//! File system utilities.
//!
//! Output files are shared between concurrent sub-module invocations, so every
//! write goes through [`atomic_write`]: readers see the old content or the new
//! content, never a truncated file.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::core::BuildInfoError;

/// Creates a directory and all of its parents if they don't exist.
///
/// # Errors
///
/// - the path exists but is not a directory
/// - creation fails (permissions, read-only file system)
///
/// # Examples
///
/// ```rust
/// use buildinfo_cli::utils::fs::ensure_dir;
///
/// # fn example() -> anyhow::Result<()> {
/// let temp = tempfile::tempdir()?;
/// ensure_dir(&temp.path().join("build").join("BlackDuck"))?;
/// # Ok(())
/// # }
/// ```
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    if path.exists() {
        return Err(BuildInfoError::FileSystemError {
            operation: "create output directory (path exists but is not a directory)".to_string(),
            path: path.display().to_string(),
        }
        .into());
    }

    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory: {}", path.display()))
}

/// Atomically writes bytes to a file using a write-then-rename strategy.
///
/// 1. Write the content to a temporary file in the target's directory
/// 2. Sync it to disk
/// 3. Rename it over the target path
///
/// The temporary file lives next to the target so the rename never crosses
/// file systems. If any step fails the temporary file is removed.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(parent)?;

    let mut temp = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in: {}", parent.display()))?;
    temp.write_all(content)
        .with_context(|| format!("Failed to write temp file for: {}", path.display()))?;
    temp.as_file().sync_all().context("Failed to sync file to disk")?;

    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;
    Ok(())
}
