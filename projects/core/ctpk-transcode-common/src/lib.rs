//! Low level building blocks for transcoding CTPK textures.
//!
//! This crate holds everything that is pure index arithmetic:
//!
//! - [`format`]: the per-format metadata table (bits per pixel, tiling class).
//! - [`swizzle`]: the 8x8 intra-tile permutation used by the target GPU.
//! - [`tiling`]: conversion between the native tiled/packed bytes and linear,
//!   row-major channel buffers for every supported format.
//!
//! Nothing in here performs I/O or channel widening; turning a linear channel buffer
//! into RGBA8888 is the job of a pixel codec backend.

#![no_std]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod error;
pub mod format;
pub mod swizzle;
pub mod tiling;

#[cfg(test)]
pub mod test_prelude;

pub use error::TilingError;
pub use format::{TextureFormat, TilingClass, UnknownFormatError};
pub use tiling::{pack_native, unpack_native, LinearLevel};
