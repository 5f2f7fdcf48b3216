//! Integration test suite for buildinfo
//!
//! Drives the `buildinfo` binary end to end against snapshot files written
//! into temporary directories.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **build_info**: manifest creation, continuation, and merging across sub-modules
//! - **errors**: corrupt manifests, bad snapshots, and bad settings
//! - **hub_output**: tree-only output
//! - **tree**: tree display

mod build_info;
mod common;
mod errors;
mod hub_output;
mod tree;
