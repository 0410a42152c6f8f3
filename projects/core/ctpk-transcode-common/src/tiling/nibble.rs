//! 4-bit texel formats (L4 and A4), two texels per byte.
//!
//! The texel with the even native index occupies the low nibble. On the linear side each
//! texel is widened to a full byte by multiplying with `0x11`.

use crate::swizzle::native_texel_index;
use alloc::vec;
use alloc::vec::Vec;

/// Expands a level of 4-bit texels to one byte per texel in row-major order.
pub fn unpack_nibbles(native: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut linear = vec![0u8; width * height];

    for y in 0..height {
        for x in 0..width {
            let index = native_texel_index(x, y, width);
            let byte = native[index / 2];
            let nibble = if index % 2 == 0 { byte & 0x0F } else { byte >> 4 };
            linear[y * width + x] = nibble * 0x11;
        }
    }

    linear
}

/// Packs one byte per texel back into 4-bit native texels.
///
/// Each byte is divided by `0x11`, so values produced by [`unpack_nibbles`] round-trip
/// exactly. Every native byte of the level is fully overwritten.
pub fn pack_nibbles(linear: &[u8], width: usize, height: usize, native: &mut [u8]) {
    let level_bytes = width * height / 2;
    native[..level_bytes].fill(0);

    for y in 0..height {
        for x in 0..width {
            let index = native_texel_index(x, y, width);
            let nibble = (linear[y * width + x] / 0x11) & 0x0F;
            native[index / 2] |= if index % 2 == 0 { nibble } else { nibble << 4 };
        }
    }
}
