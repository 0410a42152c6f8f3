//! The 8x8 tile permutation used by the GPU's texture memory layout.
//!
//! Textures are stored as a sequence of 8x8 texel tiles, scanned left-to-right and
//! top-to-bottom. Inside a tile, texels are not stored row-major: the texel at
//! row-major position `i` lives at native position [`TILE_PERMUTATION`]`[i]`, which is
//! the Morton (Z-order) index of `(x, y)` within the tile.
//!
//! 4x4 compressed blocks use the same tile order with four blocks per tile in a 2x2
//! Z arrangement; see [`native_block_index`].

/// Width and height of a tile, in texels.
pub const TILE_DIM: usize = 8;

/// Number of texels in a tile.
pub const TILE_TEXELS: usize = TILE_DIM * TILE_DIM;

/// Width and height of a compressed block, in texels.
pub const BLOCK_DIM: usize = 4;

/// Maps a row-major index within a tile to its native storage index.
#[rustfmt::skip]
pub const TILE_PERMUTATION: [u8; TILE_TEXELS] = [
     0,  1,  4,  5, 16, 17, 20, 21,
     2,  3,  6,  7, 18, 19, 22, 23,
     8,  9, 12, 13, 24, 25, 28, 29,
    10, 11, 14, 15, 26, 27, 30, 31,
    32, 33, 36, 37, 48, 49, 52, 53,
    34, 35, 38, 39, 50, 51, 54, 55,
    40, 41, 44, 45, 56, 57, 60, 61,
    42, 43, 46, 47, 58, 59, 62, 63,
];

/// Maps a native storage index within a tile back to its row-major index.
pub const INVERSE_TILE_PERMUTATION: [u8; TILE_TEXELS] = invert(&TILE_PERMUTATION);

const fn invert(table: &[u8; TILE_TEXELS]) -> [u8; TILE_TEXELS] {
    let mut inverse = [0u8; TILE_TEXELS];
    let mut i = 0;
    while i < TILE_TEXELS {
        inverse[table[i] as usize] = i as u8;
        i += 1;
    }
    inverse
}

/// Native texel index of the texel at `(x, y)` in an image `width` texels wide.
///
/// The returned index counts texels from the start of the level: `tile * 64 + P[j]`
/// where `tile` is the tile containing the texel and `j` its row-major position
/// inside that tile.
///
/// `width` must be a multiple of [`TILE_DIM`].
#[inline(always)]
pub fn native_texel_index(x: usize, y: usize, width: usize) -> usize {
    let tile = (y / TILE_DIM) * (width / TILE_DIM) + x / TILE_DIM;
    let local = (y % TILE_DIM) * TILE_DIM + x % TILE_DIM;
    tile * TILE_TEXELS + TILE_PERMUTATION[local] as usize
}

/// Native record index of the 4x4 block whose top-left texel is at `(x, y)`.
///
/// Each tile holds four blocks: top-left, top-right, bottom-left, bottom-right.
///
/// `width` must be a multiple of [`TILE_DIM`].
#[inline(always)]
pub fn native_block_index(x: usize, y: usize, width: usize) -> usize {
    let tile = (y / TILE_DIM) * (width / TILE_DIM) + x / TILE_DIM;
    let local = (y % TILE_DIM / BLOCK_DIM) * 2 + x % TILE_DIM / BLOCK_DIM;
    tile * 4 + local
}

/// Reorders one native tile into row-major order.
///
/// `texel_bytes` is the width of one texel; when `reversed` is set the bytes of each
/// texel are reversed at the same time.
///
/// # Panics
///
/// If either slice is shorter than `64 * texel_bytes`.
pub fn unswizzle_tile(native: &[u8], linear: &mut [u8], texel_bytes: usize, reversed: bool) {
    for (i, &native_index) in TILE_PERMUTATION.iter().enumerate() {
        let src = native_index as usize * texel_bytes;
        let dst = i * texel_bytes;
        copy_texel(
            &native[src..src + texel_bytes],
            &mut linear[dst..dst + texel_bytes],
            reversed,
        );
    }
}

/// Exact inverse of [`unswizzle_tile`]. Native texels are written in storage order.
///
/// # Panics
///
/// If either slice is shorter than `64 * texel_bytes`.
pub fn swizzle_tile(linear: &[u8], native: &mut [u8], texel_bytes: usize, reversed: bool) {
    for (i, &linear_index) in INVERSE_TILE_PERMUTATION.iter().enumerate() {
        let src = linear_index as usize * texel_bytes;
        let dst = i * texel_bytes;
        copy_texel(
            &linear[src..src + texel_bytes],
            &mut native[dst..dst + texel_bytes],
            reversed,
        );
    }
}

/// Copies a single texel, optionally reversing its byte order.
#[inline(always)]
pub(crate) fn copy_texel(src: &[u8], dst: &mut [u8], reversed: bool) {
    if reversed {
        for (d, s) in dst.iter_mut().zip(src.iter().rev()) {
            *d = *s;
        }
    } else {
        dst.copy_from_slice(src);
    }
}
