use super::constants::*;
use crate::error::{FormatError, StructuralError};
use ctpk_transcode_common::TextureFormat;
use endian_writer::{EndianReader, LittleEndianReader};

/// Redundant per-texture record stored in the short info table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortInfo {
    /// Format id, or [`UNSET_SHORT_INFO_FORMAT`].
    pub format: u8,
    pub mip_levels: u8,
    pub compression: u8,
    pub compression_method: u8,
}

impl ShortInfo {
    fn parse(data: &[u8], offset: usize) -> Self {
        Self {
            format: data[offset],
            mip_levels: data[offset + 1],
            compression: data[offset + 2],
            compression_method: data[offset + 3],
        }
    }
}

/// One texture of the archive.
///
/// The entry is a parsed copy of the table record; the pixel data itself stays in the
/// archive buffer and is addressed through [`TextureEntry::data_range`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureEntry {
    /// Position of the entry in the table.
    pub index: usize,
    /// Embedded texture path with all `:` characters removed.
    pub path: String,
    /// Declared size of the pixel data (`TexDataSize`), covering the whole mip chain.
    pub data_size: u32,
    /// Offset of the pixel data, relative to the pixel data region.
    pub data_offset: u32,
    /// Raw format id; see [`TextureEntry::format`].
    pub format_id: u32,
    pub width: u16,
    pub height: u16,
    pub mip_levels: u8,
    pub texture_type: u8,
    pub cube_direction: u16,
    pub bitmap_size_offset: u32,
    pub source_time: u32,
    pub short_info: ShortInfo,
}

impl TextureEntry {
    /// Parses entry `index` from a validated archive.
    ///
    /// # Safety
    ///
    /// `data` must hold the full entry table and short info table for at least
    /// `index + 1` entries.
    pub(crate) unsafe fn parse(
        data: &[u8],
        index: usize,
        short_info_offset: usize,
    ) -> Result<Self, StructuralError> {
        let base = HEADER_SIZE + index * ENTRY_SIZE;
        let mut reader = LittleEndianReader::new(data.as_ptr().add(base));

        let path_offset = reader.read_u32_at(ENTRY_PATH_OFFSET as isize) as usize;
        let path = read_path(data, index, path_offset)?;

        Ok(Self {
            index,
            path,
            data_size: reader.read_u32_at(ENTRY_DATA_SIZE as isize),
            data_offset: reader.read_u32_at(ENTRY_DATA_OFFSET as isize),
            format_id: reader.read_u32_at(ENTRY_FORMAT as isize),
            width: reader.read_u16_at(ENTRY_WIDTH as isize),
            height: reader.read_u16_at(ENTRY_HEIGHT as isize),
            mip_levels: data[base + ENTRY_MIP_LEVELS],
            texture_type: data[base + ENTRY_TYPE],
            cube_direction: reader.read_u16_at(ENTRY_CUBE_DIRECTION as isize),
            bitmap_size_offset: reader.read_u32_at(ENTRY_BITMAP_SIZE_OFFSET as isize),
            source_time: reader.read_u32_at(ENTRY_SOURCE_TIME as isize),
            short_info: ShortInfo::parse(data, short_info_offset + index * SHORT_INFO_SIZE),
        })
    }

    /// Validated pixel format of the entry.
    ///
    /// # Errors
    ///
    /// - [`FormatError::UnknownFormat`] if the id is outside `0..=13`
    /// - [`FormatError::ShortInfoMismatch`] if the short info format is set and differs
    pub fn format(&self) -> Result<TextureFormat, FormatError> {
        if self.short_info.format != UNSET_SHORT_INFO_FORMAT
            && self.short_info.format as u32 != self.format_id
        {
            return Err(FormatError::ShortInfoMismatch {
                index: self.index,
                entry_format: self.format_id,
                short_info_format: self.short_info.format,
            });
        }

        TextureFormat::from_id(self.format_id).ok_or(FormatError::UnknownFormat {
            index: self.index,
            format: self.format_id,
        })
    }

    /// Number of mip levels stored, never less than one.
    #[inline]
    pub fn level_count(&self) -> u32 {
        self.mip_levels.max(1) as u32
    }

    /// Size of the mip chain implied by the entry's dimensions, format and mip count.
    pub fn computed_chain_size(&self, format: TextureFormat) -> usize {
        format.mip_chain_size(
            self.width as usize,
            self.height as usize,
            self.level_count(),
        )
    }
}

/// Reads the NUL-terminated path at `offset` and strips every `:`.
fn read_path(data: &[u8], index: usize, offset: usize) -> Result<String, StructuralError> {
    let invalid = StructuralError::InvalidPathOffset { index, offset };
    let tail = data.get(offset..).ok_or_else(|| invalid.clone())?;
    let length = tail.iter().position(|&b| b == 0).ok_or(invalid)?;

    Ok(String::from_utf8_lossy(&tail[..length])
        .chars()
        .filter(|&c| c != ':')
        .collect())
}
