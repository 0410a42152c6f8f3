//! ETC1 block compression for CTPK textures.
//!
//! Blocks are handled in their standard big-endian form. Images are passed as a
//! row-major grid of such blocks on one side and as tightly packed RGBA8888 on the
//! other; converting from or to the console's tiled, byte-reversed records is handled by
//! `ctpk-transcode-common`.
//!
//! ```
//! use ctpk_transcode_etc1::{decode_image, encode_image, Etc1Quality};
//!
//! let rgba = vec![0x80; 8 * 8 * 4];
//! let blocks = encode_image(&rgba, 8, 8, Etc1Quality::Best).unwrap();
//! assert_eq!(blocks.len(), 32);
//! assert_eq!(decode_image(&blocks, 8, 8).unwrap().len(), rgba.len());
//! ```

#![no_std]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod decode;
pub mod encode;
pub mod tables;

#[cfg(test)]
pub mod test_prelude;

pub use decode::decode_block;
pub use encode::{encode_block, Etc1Quality};

use alloc::vec;
use alloc::vec::Vec;
use decode::bgra_to_rgba;
use thiserror::Error;

/// Width and height of an ETC1 block, in pixels.
pub const BLOCK_DIM: usize = 4;

/// Size of an ETC1 block, in bytes.
pub const BLOCK_BYTES: usize = 8;

/// Errors raised by the image level ETC1 routines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Etc1Error {
    /// Width or height is zero or not a multiple of 4.
    #[error("Dimensions {width}x{height} are not a multiple of 4")]
    UnalignedDimensions {
        /// Image width.
        width: usize,
        /// Image height.
        height: usize,
    },

    /// The input buffer holds fewer bytes than the image requires.
    #[error("Input buffer too short: required {required} bytes, got {actual} bytes")]
    InputTooShort {
        /// Bytes needed.
        required: usize,
        /// Bytes available.
        actual: usize,
    },

    /// The block decoder rejected the input.
    #[error("ETC1 decoder error: {0}")]
    Decoder(&'static str),
}

/// Decodes a row-major grid of ETC1 blocks into RGBA8888.
///
/// # Parameters
///
/// - `blocks`: `width * height / 2` bytes of big-endian blocks
/// - `width`, `height`: Image dimensions, multiples of 4
///
/// # Returns
///
/// `width * height * 4` bytes of row-major RGBA with alpha set to 255.
pub fn decode_image(blocks: &[u8], width: usize, height: usize) -> Result<Vec<u8>, Etc1Error> {
    check_dimensions(width, height)?;
    let required = width * height / 2;
    if blocks.len() < required {
        return Err(Etc1Error::InputTooShort {
            required,
            actual: blocks.len(),
        });
    }

    let mut pixels = vec![0u32; width * height];
    texture2ddecoder::decode_etc1(&blocks[..required], width, height, &mut pixels)
        .map_err(Etc1Error::Decoder)?;

    Ok(pixels.into_iter().flat_map(bgra_to_rgba).collect())
}

/// Encodes RGBA8888 into a row-major grid of ETC1 blocks.
///
/// # Parameters
///
/// - `rgba`: `width * height * 4` bytes of row-major RGBA; alpha is ignored
/// - `width`, `height`: Image dimensions, multiples of 4
/// - `quality`: Search effort of the block encoder
///
/// # Returns
///
/// `width * height / 2` bytes of big-endian blocks.
pub fn encode_image(
    rgba: &[u8],
    width: usize,
    height: usize,
    quality: Etc1Quality,
) -> Result<Vec<u8>, Etc1Error> {
    let blocks_x = check_dimensions(width, height)?;
    let required = width * height * 4;
    if rgba.len() < required {
        return Err(Etc1Error::InputTooShort {
            required,
            actual: rgba.len(),
        });
    }

    let mut blocks = vec![0u8; width * height / 2];
    for (index, block) in blocks.chunks_exact_mut(BLOCK_BYTES).enumerate() {
        let (bx, by) = (index % blocks_x * BLOCK_DIM, index / blocks_x * BLOCK_DIM);
        let mut pixels = [[0u8; 4]; BLOCK_DIM * BLOCK_DIM];
        for (i, pixel) in pixels.iter_mut().enumerate() {
            let start = ((by + i / BLOCK_DIM) * width + bx + i % BLOCK_DIM) * 4;
            pixel.copy_from_slice(&rgba[start..start + 4]);
        }

        block.copy_from_slice(&encode_block(&pixels, quality));
    }

    Ok(blocks)
}

/// Validates the dimensions and returns the number of blocks per row.
fn check_dimensions(width: usize, height: usize) -> Result<usize, Etc1Error> {
    if width == 0 || height == 0 || width % BLOCK_DIM != 0 || height % BLOCK_DIM != 0 {
        return Err(Etc1Error::UnalignedDimensions { width, height });
    }

    Ok(width / BLOCK_DIM)
}
