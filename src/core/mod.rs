//! Core types shared across buildinfo.
//!
//! Currently this is the error layer: [`BuildInfoError`] for typed failures,
//! [`ErrorContext`] for CLI presentation, and [`user_friendly_error`] to turn
//! any [`anyhow::Error`] into something a build log reader can act on.

pub mod error;

pub use error::{BuildInfoError, ErrorContext, user_friendly_error};
