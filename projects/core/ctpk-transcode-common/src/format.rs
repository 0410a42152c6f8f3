//! Static per-format metadata for the 14 CTPK pixel formats.

use thiserror::Error;

/// Bits per pixel for format ids 0-13, in id order.
pub const BITS_PER_PIXEL: [u32; 14] = [32, 24, 16, 16, 16, 16, 16, 8, 8, 8, 4, 4, 4, 8];

/// Returned when a format id does not name one of the 14 known formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unknown texture format id {0}")]
pub struct UnknownFormatError(pub u32);

/// A native pixel format as stored in the `TexFormat` field of a CTPK entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TextureFormat {
    /// 32-bit RGBA, stored channel-reversed.
    Rgba8888 = 0,
    /// 24-bit RGB, stored channel-reversed.
    Rgb888 = 1,
    /// 16-bit RGBA with 1-bit alpha.
    Rgba5551 = 2,
    /// 16-bit RGB.
    Rgb565 = 3,
    /// 16-bit RGBA with 4 bits per channel.
    Rgba4444 = 4,
    /// 8-bit luminance plus 8-bit alpha.
    La88 = 5,
    /// Two 8-bit channels (usually a normal map's X/Y).
    Hl8 = 6,
    /// 8-bit luminance.
    L8 = 7,
    /// 8-bit alpha.
    A8 = 8,
    /// 4-bit luminance plus 4-bit alpha in one byte.
    La44 = 9,
    /// 4-bit luminance, two texels per byte.
    L4 = 10,
    /// 4-bit alpha, two texels per byte.
    A4 = 11,
    /// ETC1 4x4 block compression.
    Etc1 = 12,
    /// ETC1 with a separately stored 4-bit alpha plane.
    Etc1A4 = 13,
}

/// How a format lays its texels out inside an 8x8 tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TilingClass {
    /// One or more whole bytes per texel, permuted texel by texel.
    LinearChannel,
    /// Two 4-bit texels per byte.
    NibblePacked,
    /// 8-byte 4x4 blocks, four per tile.
    BlockCompressed,
    /// 8-byte 4x4 blocks interleaved with an 8-byte 4-bit alpha block each.
    BlockCompressedWithAlpha,
}

/// Byte width and storage order of a single texel for [`TilingClass::LinearChannel`] formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TexelLayout {
    /// Bytes per texel.
    pub texel_bytes: usize,
    /// Whether the stored byte order is reversed relative to the canonical channel order.
    pub reversed: bool,
}

impl TextureFormat {
    /// All formats, in id order.
    pub const ALL: [TextureFormat; 14] = [
        TextureFormat::Rgba8888,
        TextureFormat::Rgb888,
        TextureFormat::Rgba5551,
        TextureFormat::Rgb565,
        TextureFormat::Rgba4444,
        TextureFormat::La88,
        TextureFormat::Hl8,
        TextureFormat::L8,
        TextureFormat::A8,
        TextureFormat::La44,
        TextureFormat::L4,
        TextureFormat::A4,
        TextureFormat::Etc1,
        TextureFormat::Etc1A4,
    ];

    /// Looks up a format by its numeric id.
    ///
    /// # Returns
    ///
    /// `None` for ids outside `0..=13`.
    #[inline]
    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// The numeric id stored in the archive.
    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Bits per pixel of the native representation.
    #[inline]
    pub const fn bits_per_pixel(self) -> u32 {
        BITS_PER_PIXEL[self as usize]
    }

    /// The tiling class of this format.
    pub const fn tiling_class(self) -> TilingClass {
        match self {
            TextureFormat::L4 | TextureFormat::A4 => TilingClass::NibblePacked,
            TextureFormat::Etc1 => TilingClass::BlockCompressed,
            TextureFormat::Etc1A4 => TilingClass::BlockCompressedWithAlpha,
            _ => TilingClass::LinearChannel,
        }
    }

    /// Texel layout for [`TilingClass::LinearChannel`] formats, `None` for everything else.
    pub const fn texel_layout(self) -> Option<TexelLayout> {
        let (texel_bytes, reversed) = match self {
            TextureFormat::Rgba8888 => (4, true),
            TextureFormat::Rgb888 => (3, true),
            TextureFormat::Rgba5551 | TextureFormat::Rgb565 | TextureFormat::Rgba4444 => (2, false),
            TextureFormat::La88 | TextureFormat::Hl8 => (2, true),
            TextureFormat::L8 | TextureFormat::A8 | TextureFormat::La44 => (1, false),
            _ => return None,
        };

        Some(TexelLayout {
            texel_bytes,
            reversed,
        })
    }

    /// Size in bytes of the canonical (linear) colour buffer for one level.
    ///
    /// Nibble formats are expanded to one byte per texel; block formats keep 8 bytes per
    /// 4x4 block. The separate ETC1A4 alpha plane is not included.
    pub const fn linear_size(self, width: usize, height: usize) -> usize {
        match self.texel_layout() {
            Some(layout) => width * height * layout.texel_bytes,
            None => match self.tiling_class() {
                TilingClass::NibblePacked => width * height,
                _ => width * height / 2,
            },
        }
    }

    /// Native byte size of mip level `level` of a `width` x `height` texture.
    #[inline]
    pub const fn level_size(self, width: usize, height: usize, level: u32) -> usize {
        (width >> level) * (height >> level) * self.bits_per_pixel() as usize / 8
    }

    /// Native byte size of a mip chain with `levels` levels, level 0 first.
    pub fn mip_chain_size(self, width: usize, height: usize, levels: u32) -> usize {
        (0..levels)
            .map(|level| self.level_size(width, height, level))
            .sum()
    }

    /// Whether the format has a separately stored alpha plane.
    #[inline]
    pub const fn has_alpha_plane(self) -> bool {
        matches!(self, TextureFormat::Etc1A4)
    }

    /// Human readable name, as used by the platform's tooling.
    pub const fn name(self) -> &'static str {
        match self {
            TextureFormat::Rgba8888 => "RGBA8888",
            TextureFormat::Rgb888 => "RGB888",
            TextureFormat::Rgba5551 => "RGBA5551",
            TextureFormat::Rgb565 => "RGB565",
            TextureFormat::Rgba4444 => "RGBA4444",
            TextureFormat::La88 => "LA88",
            TextureFormat::Hl8 => "HL8",
            TextureFormat::L8 => "L8",
            TextureFormat::A8 => "A8",
            TextureFormat::La44 => "LA44",
            TextureFormat::L4 => "L4",
            TextureFormat::A4 => "A4",
            TextureFormat::Etc1 => "ETC1",
            TextureFormat::Etc1A4 => "ETC1A4",
        }
    }
}

impl TryFrom<u32> for TextureFormat {
    type Error = UnknownFormatError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or(UnknownFormatError(id))
    }
}

impl core::fmt::Display for TextureFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
