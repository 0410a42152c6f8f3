//! The pixel codec backend: conversion between canonical channel buffers and RGBA8888.
//!
//! The orchestrator only ever talks to a [`PixelCodec`]. Unpacking native bytes into
//! canonical channel order (and packing them back) happens before and after the codec is
//! called, so a backend never sees the console's tiled layout.

mod channels;
mod mipmap;
mod standard;

pub use channels::{narrow_from_rgba, widen_to_rgba};
pub use mipmap::downsample_nearest;
pub use standard::{StandardCodecError, StandardPixelCodec};

use ctpk_transcode_common::TextureFormat;

/// Effort spent by block compressors when encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodeQuality {
    /// Reduced search; faster, slightly lower quality.
    Fast,
    /// Exhaustive search.
    #[default]
    Best,
}

/// Decodes and encodes single textures between canonical channel order and RGBA8888.
///
/// Canonical channel order is what [`ctpk_transcode_common::unpack_native`] produces for
/// the colour buffer of a level. For [`TextureFormat::Etc1A4`] the orchestrator only
/// passes the colour blocks (as [`TextureFormat::Etc1`]) and carries the alpha plane
/// through [`TextureFormat::A8`], so implementations need not special-case it.
pub trait PixelCodec {
    /// Error reported by the backend.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Decodes one level into `width * height * 4` bytes of row-major RGBA8888.
    fn decode(
        &self,
        data: &[u8],
        width: usize,
        height: usize,
        format: TextureFormat,
    ) -> Result<Vec<u8>, Self::Error>;

    /// Encodes RGBA8888 into a mip chain in canonical channel order.
    ///
    /// # Returns
    ///
    /// One buffer per mip level, level 0 first; `mip_levels` buffers in total. Level `l`
    /// is `(width >> l) x (height >> l)`.
    fn encode(
        &self,
        rgba: &[u8],
        width: usize,
        height: usize,
        format: TextureFormat,
        mip_levels: u32,
        quality: EncodeQuality,
    ) -> Result<Vec<Vec<u8>>, Self::Error>;
}

impl<C: PixelCodec + ?Sized> PixelCodec for &C {
    type Error = C::Error;

    fn decode(
        &self,
        data: &[u8],
        width: usize,
        height: usize,
        format: TextureFormat,
    ) -> Result<Vec<u8>, Self::Error> {
        (**self).decode(data, width, height, format)
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
        (**self).encode(rgba, width, height, format, mip_levels, quality)
    }
}
