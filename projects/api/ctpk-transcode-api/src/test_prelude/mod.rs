//! Common test imports and utilities
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.

mod archive_builder;

// External crates commonly used in tests
pub use rstest::rstest;
pub use tempfile::tempdir;

// Re-export super for convenience in test modules
pub use super::*;

pub use archive_builder::{ArchiveBuilder, TestTexture};
pub use ctpk_transcode_common::TextureFormat;
