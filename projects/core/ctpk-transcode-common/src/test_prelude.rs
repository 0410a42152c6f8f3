//! Common test imports and utilities for the pack/unpack tests
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.

// External crates commonly used in tests
pub use rstest::rstest;

// `no_std` crate; bring the allocating types into scope for tests.
pub use alloc::vec;
pub use alloc::vec::Vec;

// Re-export super for convenience in test modules
pub use super::*;

/// Generates a native level of `format` where every byte differs from its neighbours.
///
/// Nibble and alpha-plane bytes are arbitrary too, since every 4-bit value survives an
/// unpack/pack cycle.
pub(crate) fn generate_native_level(format: TextureFormat, width: usize, height: usize) -> Vec<u8> {
    (0..format.level_size(width, height, 0))
        .map(|i| (i.wrapping_mul(31) ^ (i >> 8)) as u8)
        .collect()
}
