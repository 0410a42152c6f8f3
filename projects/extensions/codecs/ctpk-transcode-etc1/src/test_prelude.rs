//! Common test imports for the ETC1 tests

// External crates commonly used in tests
pub use rstest::rstest;

// `no_std` crate; bring the allocating types into scope for tests.
pub use alloc::vec;
pub use alloc::vec::Vec;

// Re-export super for convenience in test modules
pub use super::*;
