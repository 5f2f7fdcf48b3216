//! TOML parsing with file path context.
//!
//! Errors name the file that failed and whether reading or parsing failed:
//!
//! ```text
//! Failed to parse settings file: /path/to/buildinfo.toml
//! Caused by:
//!     unknown field `scope`, expected one of `scopes`, `modules`, `output`, `hub`, `manifest`
//! ```

use anyhow::{Context, Result};
use std::path::Path;

/// Parse a TOML file into `T`.
///
/// # Errors
///
/// - the file cannot be read
/// - the content is not valid TOML or does not match `T`
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

    let config: T = toml::from_str(&content)
        .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;

    Ok(config)
}
