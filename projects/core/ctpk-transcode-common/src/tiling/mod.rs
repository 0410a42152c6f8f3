//! Conversion between native tiled texture data and linear channel buffers.
//!
//! Every routine here works on a single mip level. The linear side is row-major,
//! top-to-bottom and left-to-right, in the canonical channel order a pixel codec
//! backend expects:
//!
//! | class | linear buffer |
//! |---|---|
//! | [`TilingClass::LinearChannel`] | `texel_bytes` per texel, byte order un-reversed |
//! | [`TilingClass::NibblePacked`] | 1 byte per texel, nibble expanded by `0x11` |
//! | [`TilingClass::BlockCompressed`] | 8 bytes per 4x4 block, blocks row-major, bytes big-endian |
//! | [`TilingClass::BlockCompressedWithAlpha`] | as above, plus a 1 byte per texel alpha plane |

mod block;
mod linear;
mod nibble;

pub use block::*;
pub use linear::*;
pub use nibble::*;

use crate::error::TilingError;
use crate::format::{TextureFormat, TilingClass};
use crate::swizzle::TILE_DIM;
use alloc::vec::Vec;

/// One mip level in canonical (linear) channel order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinearLevel {
    /// Colour channels, or compressed blocks for ETC1 based formats.
    pub color: Vec<u8>,
    /// Separate 8-bit alpha plane, only present for [`TextureFormat::Etc1A4`].
    pub alpha: Option<Vec<u8>>,
}

impl LinearLevel {
    /// Wraps a colour buffer with no separate alpha plane.
    pub fn new(color: Vec<u8>) -> Self {
        Self { color, alpha: None }
    }

    /// Wraps a colour buffer and its separate alpha plane.
    pub fn with_alpha(color: Vec<u8>, alpha: Vec<u8>) -> Self {
        Self {
            color,
            alpha: Some(alpha),
        }
    }
}

/// Converts one native mip level into canonical linear order.
///
/// # Parameters
///
/// - `format`: Native format of `native`
/// - `native`: Native bytes of the level; may be longer than the level
/// - `width`, `height`: Dimensions of the level, both multiples of 8
///
/// # Errors
///
/// - [`TilingError::UnalignedDimensions`] if a dimension is zero or not a multiple of 8
/// - [`TilingError::InputTooShort`] if `native` is shorter than the level
pub fn unpack_native(
    format: TextureFormat,
    native: &[u8],
    width: usize,
    height: usize,
) -> Result<LinearLevel, TilingError> {
    check_tile_alignment(width, height)?;
    let required = format.level_size(width, height, 0);
    ensure_len(native.len(), required, input_too_short)?;
    let native = &native[..required];

    let level = match (format.texel_layout(), format.tiling_class()) {
        (Some(layout), _) => LinearLevel::new(unpack_texels(native, width, height, layout)),
        (None, TilingClass::NibblePacked) => LinearLevel::new(unpack_nibbles(native, width, height)),
        (None, TilingClass::BlockCompressedWithAlpha) => LinearLevel::with_alpha(
            unpack_blocks(native, width, height, ETC1A4_RECORD),
            unpack_alpha_plane(native, width, height),
        ),
        (None, _) => LinearLevel::new(unpack_blocks(native, width, height, ETC1_RECORD)),
    };

    Ok(level)
}

/// Converts one canonical linear level back into native order.
///
/// This is the exact inverse of [`unpack_native`]: packing the result of an unpack
/// reproduces the original native bytes.
///
/// # Parameters
///
/// - `format`: Target native format
/// - `level`: Canonical data for the level
/// - `width`, `height`: Dimensions of the level, both multiples of 8
/// - `native`: Destination; exactly the first `level_size` bytes are written
///
/// # Errors
///
/// - [`TilingError::UnalignedDimensions`] if a dimension is zero or not a multiple of 8
/// - [`TilingError::InputTooShort`] if a canonical buffer is smaller than the level
/// - [`TilingError::OutputTooShort`] if `native` is smaller than the level
/// - [`TilingError::MissingAlphaPlane`] / [`TilingError::UnexpectedAlphaPlane`] if the
///   alpha plane does not match the format
pub fn pack_native(
    format: TextureFormat,
    level: &LinearLevel,
    width: usize,
    height: usize,
    native: &mut [u8],
) -> Result<(), TilingError> {
    check_tile_alignment(width, height)?;
    let required = format.level_size(width, height, 0);
    ensure_len(native.len(), required, output_too_short)?;
    ensure_len(
        level.color.len(),
        format.linear_size(width, height),
        input_too_short,
    )?;
    let native = &mut native[..required];

    match (format.texel_layout(), format.tiling_class(), &level.alpha) {
        (_, TilingClass::BlockCompressedWithAlpha, None) => Err(TilingError::MissingAlphaPlane),
        (_, TilingClass::BlockCompressedWithAlpha, Some(alpha)) => {
            ensure_len(alpha.len(), width * height, input_too_short)?;
            pack_blocks(&level.color, width, height, ETC1A4_RECORD, native);
            pack_alpha_plane(alpha, width, height, native);
            Ok(())
        }
        (_, _, Some(_)) => Err(TilingError::UnexpectedAlphaPlane),
        (Some(layout), _, None) => {
            pack_texels(&level.color, width, height, layout, native);
            Ok(())
        }
        (None, TilingClass::NibblePacked, None) => {
            pack_nibbles(&level.color, width, height, native);
            Ok(())
        }
        (None, _, None) => {
            pack_blocks(&level.color, width, height, ETC1_RECORD, native);
            Ok(())
        }
    }
}

/// Ensures both dimensions are non-zero multiples of the tile size.
#[inline]
pub fn check_tile_alignment(width: usize, height: usize) -> Result<(), TilingError> {
    if width == 0 || height == 0 || width % TILE_DIM != 0 || height % TILE_DIM != 0 {
        return Err(TilingError::UnalignedDimensions {
            width,
            height,
            alignment: TILE_DIM,
        });
    }

    Ok(())
}

#[inline]
fn ensure_len(
    actual: usize,
    required: usize,
    error: fn(usize, usize) -> TilingError,
) -> Result<(), TilingError> {
    if actual < required {
        return Err(error(required, actual));
    }

    Ok(())
}

fn input_too_short(required: usize, actual: usize) -> TilingError {
    TilingError::InputTooShort { required, actual }
}

fn output_too_short(required: usize, actual: usize) -> TilingError {
    TilingError::OutputTooShort { required, actual }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[rstest]
    #[case(TextureFormat::Rgba8888, 8, 8)]
    #[case(TextureFormat::Rgb888, 16, 8)]
    #[case(TextureFormat::Rgba5551, 8, 16)]
    #[case(TextureFormat::Rgb565, 16, 16)]
    #[case(TextureFormat::Rgba4444, 32, 8)]
    #[case(TextureFormat::La88, 8, 8)]
    #[case(TextureFormat::Hl8, 24, 16)]
    #[case(TextureFormat::L8, 16, 8)]
    #[case(TextureFormat::A8, 8, 24)]
    #[case(TextureFormat::La44, 16, 16)]
    #[case(TextureFormat::L4, 16, 8)]
    #[case(TextureFormat::A4, 32, 32)]
    #[case(TextureFormat::Etc1, 16, 8)]
    #[case(TextureFormat::Etc1A4, 16, 16)]
    fn pack_of_unpack_restores_native_bytes(
        #[case] format: TextureFormat,
        #[case] width: usize,
        #[case] height: usize,
    ) {
        let native = generate_native_level(format, width, height);

        let level = unpack_native(format, &native, width, height).unwrap();
        let mut repacked = vec![0u8; native.len()];
        pack_native(format, &level, width, height, &mut repacked).unwrap();

        assert_eq!(repacked, native, "{format} {width}x{height}");
    }

    #[rstest]
    #[case(TextureFormat::Rgba8888)]
    #[case(TextureFormat::L4)]
    #[case(TextureFormat::Etc1A4)]
    fn unpack_produces_canonical_sizes(#[case] format: TextureFormat) {
        let native = generate_native_level(format, 16, 16);
        let level = unpack_native(format, &native, 16, 16).unwrap();

        assert_eq!(level.color.len(), format.linear_size(16, 16));
        assert_eq!(level.alpha.map(|a| a.len()), format.has_alpha_plane().then_some(256));
    }

    #[rstest]
    #[case(0, 8)]
    #[case(8, 0)]
    #[case(4, 8)]
    #[case(8, 12)]
    fn unpack_rejects_untileable_dimensions(#[case] width: usize, #[case] height: usize) {
        let native = vec![0u8; 1024];
        let result = unpack_native(TextureFormat::L8, &native, width, height);
        assert_eq!(
            result,
            Err(TilingError::UnalignedDimensions {
                width,
                height,
                alignment: 8
            })
        );
    }

    #[test]
    fn unpack_rejects_short_input() {
        let native = vec![0u8; 63];
        let result = unpack_native(TextureFormat::L8, &native, 8, 8);
        assert_eq!(
            result,
            Err(TilingError::InputTooShort {
                required: 64,
                actual: 63
            })
        );
    }

    #[test]
    fn pack_rejects_short_output() {
        let level = LinearLevel::new(vec![0u8; 128]);
        let mut native = vec![0u8; 127];
        let result = pack_native(TextureFormat::La88, &level, 8, 8, &mut native);
        assert_eq!(
            result,
            Err(TilingError::OutputTooShort {
                required: 128,
                actual: 127
            })
        );
    }

    #[test]
    fn pack_requires_alpha_plane_for_etc1a4() {
        let level = LinearLevel::new(vec![0u8; 32]);
        let mut native = vec![0u8; 64];
        let result = pack_native(TextureFormat::Etc1A4, &level, 8, 8, &mut native);
        assert_eq!(result, Err(TilingError::MissingAlphaPlane));
    }

    #[test]
    fn pack_rejects_alpha_plane_for_other_formats() {
        let level = LinearLevel::with_alpha(vec![0u8; 32], vec![0u8; 64]);
        let mut native = vec![0u8; 32];
        let result = pack_native(TextureFormat::Etc1, &level, 8, 8, &mut native);
        assert_eq!(result, Err(TilingError::UnexpectedAlphaPlane));
    }

    #[test]
    fn pack_leaves_bytes_past_the_level_untouched() {
        let level = LinearLevel::new(vec![0x11u8; 64]);
        let mut native = vec![0xEEu8; 80];
        pack_native(TextureFormat::A8, &level, 8, 8, &mut native).unwrap();

        assert!(native[..64].iter().all(|&b| b == 0x11));
        assert!(native[64..].iter().all(|&b| b == 0xEE));
    }
}
