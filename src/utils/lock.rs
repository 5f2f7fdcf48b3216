//! Output directory locking for cross-process coordination.
//!
//! Sub-module invocations of one multi-module build may run in parallel and all
//! read-merge-write the same `build-info.json`. Holding an [`OutputLock`] for the
//! whole cycle serializes them, so no invocation's dependencies are lost.
//!
//! All blocking file operations run inside `spawn_blocking` to keep the tokio
//! runtime responsive while waiting.

use anyhow::{Context, Result};
use fs4::fs_std::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_retry::strategy::ExponentialBackoff;
use tracing::debug;

use crate::constants::{
    LOCK_FILE_NAME, MAX_BACKOFF_DELAY_MS, STARTING_BACKOFF_DELAY_MS, default_lock_timeout,
};
use crate::core::BuildInfoError;

/// An exclusive lock on an output directory.
///
/// The lock file is `{output_dir}/.buildinfo.lock`. It is left in place after
/// release; only the OS-level lock on the open handle matters.
///
/// # Example
///
/// ```rust,no_run
/// use buildinfo_cli::utils::OutputLock;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let _lock = OutputLock::acquire(Path::new("build/BlackDuck")).await?;
/// // read, merge, and write build-info.json...
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct OutputLock {
    _file: Arc<File>,
    path: PathBuf,
}

impl Drop for OutputLock {
    fn drop(&mut self) {
        debug!(path = %self.path.display(), "Output lock released");
    }
}

impl OutputLock {
    /// Acquire the lock with the default timeout.
    pub async fn acquire(output_dir: &Path) -> Result<Self> {
        Self::acquire_with_timeout(output_dir, default_lock_timeout()).await
    }

    /// Acquire the lock, giving up after `timeout`.
    ///
    /// Creates the output directory if needed. Attempts are non-blocking; the
    /// delay between them grows tenfold per retry and is capped at 500ms.
    ///
    /// # Errors
    ///
    /// - the output directory or lock file cannot be created
    /// - [`BuildInfoError::LockTimeout`] when another process holds the lock
    ///   for longer than `timeout`
    pub async fn acquire_with_timeout(output_dir: &Path, timeout: Duration) -> Result<Self> {
        tokio::fs::create_dir_all(output_dir).await.with_context(|| {
            format!("Failed to create output directory: {}", output_dir.display())
        })?;

        let path = output_dir.join(LOCK_FILE_NAME);
        debug!(path = %path.display(), "Waiting for output lock");

        let open_path = path.clone();
        let file = tokio::task::spawn_blocking(move || {
            OpenOptions::new().create(true).write(true).truncate(false).open(&open_path)
        })
        .await
        .context("spawn_blocking panicked")?
        .with_context(|| format!("Failed to open lock file: {}", path.display()))?;
        let file = Arc::new(file);

        let start = Instant::now();
        for delay in retry_delays() {
            let attempt = Arc::clone(&file);
            let locked = tokio::task::spawn_blocking(move || attempt.try_lock_exclusive())
                .await
                .context("spawn_blocking panicked")?;

            if let Ok(true) = locked {
                debug!(
                    path = %path.display(),
                    wait_ms = start.elapsed().as_millis(),
                    "Output lock acquired"
                );
                return Ok(Self {
                    _file: file,
                    path,
                });
            }

            let remaining = timeout.saturating_sub(start.elapsed());
            if remaining.is_zero() {
                break;
            }
            tokio::time::sleep(delay.min(remaining)).await;
        }

        Err(BuildInfoError::LockTimeout {
            path: path.display().to_string(),
            waited_ms: start.elapsed().as_millis(),
        }
        .into())
    }

    /// Path of the lock file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Delays between lock attempts: 10ms, 100ms, then 500ms from there on.
fn retry_delays() -> ExponentialBackoff {
    ExponentialBackoff::from_millis(STARTING_BACKOFF_DELAY_MS)
        .max_delay(Duration::from_millis(MAX_BACKOFF_DELAY_MS))
}
