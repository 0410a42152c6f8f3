//! Whole-byte texel formats (RGBA8888 through LA44).

use crate::format::TexelLayout;
use crate::swizzle::{swizzle_tile, unswizzle_tile, TILE_DIM, TILE_TEXELS};
use alloc::vec;
use alloc::vec::Vec;

/// Largest texel in bytes (RGBA8888).
const MAX_TEXEL_BYTES: usize = 4;

/// Unswizzles a level of whole-byte texels into a row-major buffer.
///
/// `native` must hold at least `width * height * texel_bytes` bytes and both dimensions
/// must be multiples of 8; [`unpack_native`](super::unpack_native) checks both.
pub fn unpack_texels(native: &[u8], width: usize, height: usize, layout: TexelLayout) -> Vec<u8> {
    let bytes = layout.texel_bytes;
    let row_bytes = TILE_DIM * bytes;
    let mut linear = vec![0u8; width * height * bytes];
    let mut tile = [0u8; TILE_TEXELS * MAX_TEXEL_BYTES];
    let tile = &mut tile[..TILE_TEXELS * bytes];

    for (index, native_tile) in native.chunks_exact(TILE_TEXELS * bytes).enumerate() {
        unswizzle_tile(native_tile, tile, bytes, layout.reversed);

        let (tile_x, tile_y) = tile_origin(index, width);
        for (row, tile_row) in tile.chunks_exact(row_bytes).enumerate() {
            let start = ((tile_y + row) * width + tile_x) * bytes;
            linear[start..start + row_bytes].copy_from_slice(tile_row);
        }
    }

    linear
}

/// Exact inverse of [`unpack_texels`], writing `width * height * texel_bytes` bytes.
pub fn pack_texels(
    linear: &[u8],
    width: usize,
    height: usize,
    layout: TexelLayout,
    native: &mut [u8],
) {
    let bytes = layout.texel_bytes;
    let row_bytes = TILE_DIM * bytes;
    let level_bytes = width * height * bytes;
    let mut tile = [0u8; TILE_TEXELS * MAX_TEXEL_BYTES];
    let tile = &mut tile[..TILE_TEXELS * bytes];

    for (index, native_tile) in native[..level_bytes]
        .chunks_exact_mut(TILE_TEXELS * bytes)
        .enumerate()
    {
        let (tile_x, tile_y) = tile_origin(index, width);
        for (row, tile_row) in tile.chunks_exact_mut(row_bytes).enumerate() {
            let start = ((tile_y + row) * width + tile_x) * bytes;
            tile_row.copy_from_slice(&linear[start..start + row_bytes]);
        }

        swizzle_tile(tile, native_tile, bytes, layout.reversed);
    }
}

/// Top-left texel of tile number `index` in an image `width` texels wide.
#[inline(always)]
pub(crate) fn tile_origin(index: usize, width: usize) -> (usize, usize) {
    let tiles_per_row = width / TILE_DIM;
    (
        (index % tiles_per_row) * TILE_DIM,
        (index / tiles_per_row) * TILE_DIM,
    )
}
