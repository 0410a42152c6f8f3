//! Decoding of ETC1 blocks, backed by `texture2ddecoder`.

use crate::BLOCK_DIM;
use texture2ddecoder::decode_etc1_block;

/// Decodes one big-endian ETC1 block into 16 RGBA pixels, row-major.
///
/// ETC1 carries no alpha; every decoded pixel has alpha 255.
pub fn decode_block(block: &[u8; 8]) -> [[u8; 4]; 16] {
    let mut buffer = [0u32; BLOCK_DIM * BLOCK_DIM];
    decode_etc1_block(block, &mut buffer);
    buffer.map(bgra_to_rgba)
}

/// `texture2ddecoder` packs pixels as `0xAARRGGBB`.
#[inline(always)]
pub(crate) fn bgra_to_rgba(pixel: u32) -> [u8; 4] {
    let [b, g, r, a] = pixel.to_le_bytes();
    [r, g, b, a]
}
