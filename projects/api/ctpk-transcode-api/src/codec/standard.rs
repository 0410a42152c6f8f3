use super::channels::{narrow_from_rgba, widen_to_rgba};
use super::mipmap::downsample_nearest;
use super::{EncodeQuality, PixelCodec};
use ctpk_transcode_common::TextureFormat;
use ctpk_transcode_etc1::{decode_image, encode_image, Etc1Error, Etc1Quality};
use std::borrow::Cow;
use thiserror::Error;

/// Errors raised by [`StandardPixelCodec`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StandardCodecError {
    #[error("ETC1 codec error: {0}")]
    Etc1(#[from] Etc1Error),

    #[error("Input buffer too short: required {required} bytes, got {actual} bytes")]
    InputTooShort { required: usize, actual: usize },

    #[error("Mip level {level} of a {width}x{height} texture has no pixels")]
    EmptyMipLevel {
        level: u32,
        width: usize,
        height: usize,
    },
}

/// Built-in codec for all 14 formats: channel widening/narrowing for the uncompressed
/// formats and ETC1 for the block compressed ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPixelCodec;

impl From<EncodeQuality> for Etc1Quality {
    fn from(quality: EncodeQuality) -> Self {
        match quality {
            EncodeQuality::Fast => Etc1Quality::Fast,
            EncodeQuality::Best => Etc1Quality::Best,
        }
    }
}

impl PixelCodec for StandardPixelCodec {
    type Error = StandardCodecError;

    fn decode(
        &self,
        data: &[u8],
        width: usize,
        height: usize,
        format: TextureFormat,
    ) -> Result<Vec<u8>, Self::Error> {
        let required = format.linear_size(width, height);
        ensure_len(data.len(), required)?;
        let data = &data[..required];

        match widen_to_rgba(format, data) {
            Some(rgba) => Ok(rgba),
            None => Ok(decode_image(data, width, height)?),
        }
    }

    fn encode(
        &self,
        rgba: &[u8],
        width: usize,
        height: usize,
        format: TextureFormat,
        mip_levels: u32,
        quality: EncodeQuality,
    ) -> Result<Vec<Vec<u8>>, Self::Error> {
        let required = width * height * 4;
        ensure_len(rgba.len(), required)?;
        let rgba = &rgba[..required];

        let mut levels = Vec::with_capacity(mip_levels as usize);
        for level in 0..mip_levels {
            let (level_width, level_height) = (width >> level, height >> level);
            if level_width == 0 || level_height == 0 {
                return Err(StandardCodecError::EmptyMipLevel {
                    level,
                    width,
                    height,
                });
            }

            let pixels = match level {
                0 => Cow::Borrowed(rgba),
                _ => Cow::Owned(downsample_nearest(rgba, width, height, level)),
            };

            let encoded = match narrow_from_rgba(format, &pixels) {
                Some(data) => data,
                None => encode_image(&pixels, level_width, level_height, quality.into())?,
            };
            levels.push(encoded);
        }

        Ok(levels)
    }
}

fn ensure_len(actual: usize, required: usize) -> Result<(), StandardCodecError> {
    if actual < required {
        return Err(StandardCodecError::InputTooShort { required, actual });
    }

    Ok(())
}
