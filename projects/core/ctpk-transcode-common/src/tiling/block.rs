//! ETC1 based formats.
//!
//! Native data is a sequence of fixed-size records, one per 4x4 block, ordered by
//! [`native_block_index`]. Each record carries an 8-byte ETC1 block stored
//! byte-reversed (the hardware reads it as a little-endian 64-bit word). ETC1A4 records
//! are 16 bytes: an 8-byte 4-bit alpha block followed by the colour block.
//!
//! The canonical colour buffer is a row-major grid of standard big-endian ETC1 blocks.

use crate::swizzle::{native_block_index, BLOCK_DIM};
use alloc::vec;
use alloc::vec::Vec;

/// Size of an ETC1 colour block.
pub const ETC1_BLOCK_BYTES: usize = 8;

/// Layout of a native block record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRecord {
    /// Distance in bytes between consecutive records.
    pub stride: usize,
    /// Offset of the colour block within a record.
    pub color_offset: usize,
}

/// Record layout of [`TextureFormat::Etc1`](crate::TextureFormat::Etc1).
pub const ETC1_RECORD: BlockRecord = BlockRecord {
    stride: 8,
    color_offset: 0,
};

/// Record layout of [`TextureFormat::Etc1A4`](crate::TextureFormat::Etc1A4).
pub const ETC1A4_RECORD: BlockRecord = BlockRecord {
    stride: 16,
    color_offset: 8,
};

/// Extracts the colour blocks of a level into canonical row-major block order.
pub fn unpack_blocks(native: &[u8], width: usize, height: usize, record: BlockRecord) -> Vec<u8> {
    let blocks_x = width / BLOCK_DIM;
    let mut linear = vec![0u8; width * height / 2];

    for by in 0..height / BLOCK_DIM {
        for bx in 0..blocks_x {
            let src = native_block_index(bx * BLOCK_DIM, by * BLOCK_DIM, width) * record.stride
                + record.color_offset;
            let dst = (by * blocks_x + bx) * ETC1_BLOCK_BYTES;
            reverse_into(
                &native[src..src + ETC1_BLOCK_BYTES],
                &mut linear[dst..dst + ETC1_BLOCK_BYTES],
            );
        }
    }

    linear
}

/// Writes canonical colour blocks back into their native records.
///
/// Only the colour portion of each record is written.
pub fn pack_blocks(
    linear: &[u8],
    width: usize,
    height: usize,
    record: BlockRecord,
    native: &mut [u8],
) {
    let blocks_x = width / BLOCK_DIM;

    for by in 0..height / BLOCK_DIM {
        for bx in 0..blocks_x {
            let src = (by * blocks_x + bx) * ETC1_BLOCK_BYTES;
            let dst = native_block_index(bx * BLOCK_DIM, by * BLOCK_DIM, width) * record.stride
                + record.color_offset;
            reverse_into(
                &linear[src..src + ETC1_BLOCK_BYTES],
                &mut native[dst..dst + ETC1_BLOCK_BYTES],
            );
        }
    }
}

/// Extracts the 4-bit alpha plane of an ETC1A4 level as one byte per texel, row-major.
///
/// Within a record's alpha block, the texel at block column `c` and row `r` lives in
/// byte `2c + r / 2`; even rows use the low nibble.
pub fn unpack_alpha_plane(native: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut alpha = vec![0u8; width * height];

    for y in 0..height {
        for x in 0..width {
            let (offset, shift) = alpha_location(x, y, width);
            alpha[y * width + x] = ((native[offset] >> shift) & 0x0F) * 0x11;
        }
    }

    alpha
}

/// Writes a one byte per texel alpha plane into the alpha blocks of an ETC1A4 level.
///
/// Values are divided by `0x11`. Only the alpha portion of each record is written.
pub fn pack_alpha_plane(alpha: &[u8], width: usize, height: usize, native: &mut [u8]) {
    let records = width * height / (BLOCK_DIM * BLOCK_DIM);
    for record in native.chunks_exact_mut(ETC1A4_RECORD.stride).take(records) {
        record[..ETC1A4_RECORD.color_offset].fill(0);
    }

    for y in 0..height {
        for x in 0..width {
            let (offset, shift) = alpha_location(x, y, width);
            let nibble = (alpha[y * width + x] / 0x11) & 0x0F;
            native[offset] |= nibble << shift;
        }
    }
}

/// Byte offset and bit shift of the alpha nibble for texel `(x, y)`.
#[inline(always)]
fn alpha_location(x: usize, y: usize, width: usize) -> (usize, u32) {
    let block = native_block_index(x, y, width);
    let column = x % BLOCK_DIM;
    let row = y % BLOCK_DIM;
    let offset = block * ETC1A4_RECORD.stride + column * 2 + row / 2;
    let shift = if row % 2 == 0 { 0 } else { 4 };
    (offset, shift)
}

#[inline(always)]
fn reverse_into(src: &[u8], dst: &mut [u8]) {
    for (d, s) in dst.iter_mut().zip(src.iter().rev()) {
        *d = *s;
    }
}
