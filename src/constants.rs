//! Global constants used throughout the buildinfo codebase.
//!
//! File names, environment variables, and timing parameters shared by
//! several modules live here so the on-disk contract is visible in one place.

use std::time::Duration;

/// Name of the build manifest file inside the output directory.
pub const MANIFEST_FILE_NAME: &str = "build-info.json";

/// Suffix of the dependency tree file, prefixed by the hub project name.
pub const TREE_FILE_SUFFIX: &str = "_bdio.json";

/// Name of the lock file guarding the output directory.
pub const LOCK_FILE_NAME: &str = ".buildinfo.lock";

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "build/BlackDuck";

/// Settings file picked up from the working directory when `--config` is not given.
pub const DEFAULT_SETTINGS_FILE: &str = "buildinfo.toml";

/// Environment variable carrying the build correlation token.
pub const BUILD_ID_ENV: &str = "BUILDINFO_BUILD_ID";

/// Artifact type recorded when the project snapshot does not name one.
pub const DEFAULT_ARTIFACT_TYPE: &str = "org.gradle";

/// Default timeout for output directory lock acquisition (60 seconds).
///
/// Sub-module invocations of one build hold the lock only for a
/// read-merge-write cycle, so waiting longer indicates a stuck process.
pub fn default_lock_timeout() -> Duration {
    Duration::from_secs(60)
}

/// Maximum backoff delay between lock attempts (500ms).
pub const MAX_BACKOFF_DELAY_MS: u64 = 500;

/// Starting delay for lock attempt backoff (10ms). Later delays are successive
/// powers of it (100ms, 1000ms, ...) until the cap applies.
pub const STARTING_BACKOFF_DELAY_MS: u64 = 10;
