//! Error handling for buildinfo
//!
//! This module provides the typed error enum used across the crate and the
//! user-facing error presentation used by the binary. The error system follows
//! two principles:
//! 1. **Strongly-typed errors** for precise handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Error Categories
//!
//! - **File system**: [`BuildInfoError::FileSystemError`]
//! - **Manifest state**: [`BuildInfoError::CorruptManifest`]
//! - **Host build data**: [`BuildInfoError::CollaboratorData`], [`BuildInfoError::SnapshotParseError`]
//! - **Configuration**: [`BuildInfoError::ConfigError`]
//! - **Coordination**: [`BuildInfoError::LockTimeout`]
//!
//! A missing build identifier is deliberately absent from this list: it is not
//! a failure, and the manifest store simply starts a fresh manifest.
//!
//! # Examples
//!
//! ```rust,no_run
//! use buildinfo_cli::core::{BuildInfoError, user_friendly_error};
//!
//! let error = BuildInfoError::CorruptManifest {
//!     path: "build/BlackDuck/build-info.json".to_string(),
//!     reason: "expected value at line 1 column 1".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for buildinfo operations.
#[derive(Error, Debug)]
pub enum BuildInfoError {
    /// A file system operation failed.
    #[error("File system error: {operation} ({path})")]
    FileSystemError {
        /// The operation that failed (e.g. "create output directory")
        operation: String,
        /// Path involved in the failed operation
        path: String,
    },

    /// An existing manifest file could not be parsed.
    ///
    /// Fatal unless corrupt-manifest recovery is enabled, in which case the
    /// manifest is treated as absent and the condition is logged.
    #[error("Existing build manifest is corrupt: {path}")]
    CorruptManifest {
        /// Path to the unparsable manifest
        path: String,
        /// Parser message
        reason: String,
    },

    /// The resolved project data supplied by the host build tool is malformed.
    ///
    /// Fatal, since dependency identity cannot be computed.
    #[error("Invalid resolved project data in scope '{scope}' for module '{module}': {reason}")]
    CollaboratorData {
        /// Scope (configuration) being processed
        scope: String,
        /// Offending module, in `group:artifact:version` form where available
        module: String,
        /// What was wrong with it
        reason: String,
    },

    /// The resolved project snapshot could not be read as JSON.
    #[error("Cannot parse resolved project snapshot: {path}")]
    SnapshotParseError {
        /// Path to the snapshot file
        path: String,
        /// Parser message
        reason: String,
    },

    /// Settings file or command-line configuration problem.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// The output directory is locked by another invocation.
    #[error("Timed out waiting for the output directory lock on {path}")]
    LockTimeout {
        /// Output directory whose lock could not be acquired
        path: String,
        /// How long acquisition was attempted, in milliseconds
        waited_ms: u128,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// Error wrapper carrying a suggestion and extra details for CLI display.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: BuildInfoError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: BuildInfoError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr: error in red, details in yellow, suggestion in green.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Recognizes [`BuildInfoError`] anywhere in the error chain, then standard
/// I/O errors, and falls back to the full context chain for everything else.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let chain_details = error.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>();
    let outer = error.to_string();

    for cause in error.chain() {
        if let Some(typed) = cause.downcast_ref::<BuildInfoError>() {
            let ctx = create_error_context(typed);
            // Keep the caller's context (path, build id) when the typed error was wrapped
            if ctx.details.is_none() && outer != typed.to_string() {
                return ctx.with_details(outer);
            }
            return ctx;
        }
    }

    if let Some(io_error) = error.chain().find_map(|c| c.downcast_ref::<std::io::Error>()) {
        let base = ErrorContext::new(BuildInfoError::Other {
            message: outer.clone(),
        });
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return base
                    .with_details(io_error.to_string())
                    .with_suggestion("Check ownership and permissions of the output directory");
            }
            std::io::ErrorKind::NotFound => {
                return base
                    .with_details(io_error.to_string())
                    .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    let ctx = ErrorContext::new(BuildInfoError::Other {
        message: outer,
    });
    if chain_details.is_empty() {
        ctx
    } else {
        ctx.with_details(chain_details.join(": "))
    }
}

fn create_error_context(error: &BuildInfoError) -> ErrorContext {
    match error {
        BuildInfoError::CorruptManifest { path, reason } => {
            ErrorContext::new(BuildInfoError::CorruptManifest {
                path: path.clone(),
                reason: reason.clone(),
            })
            .with_details(format!("Parser reported: {reason}"))
            .with_suggestion(format!(
                "Delete {path} to start a fresh manifest, or rerun with --recover-corrupt"
            ))
        }
        BuildInfoError::CollaboratorData { scope, module, reason } => {
            ErrorContext::new(BuildInfoError::CollaboratorData {
                scope: scope.clone(),
                module: module.clone(),
                reason: reason.clone(),
            })
            .with_suggestion(
                "Regenerate the resolved project snapshot from the build tool and check that every referenced module is listed",
            )
        }
        BuildInfoError::SnapshotParseError { path, reason } => {
            ErrorContext::new(BuildInfoError::SnapshotParseError {
                path: path.clone(),
                reason: reason.clone(),
            })
            .with_details(format!("Parser reported: {reason}"))
            .with_suggestion("Export the resolved project again; the snapshot must be a JSON object with project, configurations and modules")
        }
        BuildInfoError::LockTimeout { path, waited_ms } => {
            ErrorContext::new(BuildInfoError::LockTimeout {
                path: path.clone(),
                waited_ms: *waited_ms,
            })
            .with_details(format!("Waited {waited_ms}ms for another invocation to finish"))
            .with_suggestion(
                "Make sure no other build step is writing to the same output directory, or remove a stale .buildinfo.lock",
            )
        }
        BuildInfoError::ConfigError { message } => ErrorContext::new(BuildInfoError::ConfigError {
            message: message.clone(),
        })
        .with_suggestion("Check the settings file syntax and the command-line flags"),
        BuildInfoError::FileSystemError { operation, path } => {
            ErrorContext::new(BuildInfoError::FileSystemError {
                operation: operation.clone(),
                path: path.clone(),
            })
            .with_suggestion("Check that the path is writable and the disk is not full")
        }
        BuildInfoError::Other { message } => ErrorContext::new(BuildInfoError::Other {
            message: message.clone(),
        }),
    }
}
