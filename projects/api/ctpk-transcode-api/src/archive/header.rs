use super::constants::*;
use crate::error::StructuralError;
use endian_writer::{EndianReader, LittleEndianReader};

/// The fixed 0x20 byte archive header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtpkHeader {
    pub version: u16,
    /// Number of textures.
    pub count: u16,
    /// Absolute offset of the pixel data region.
    pub texture_data_offset: u32,
    /// Size of the pixel data region.
    pub texture_data_size: u32,
    /// Absolute offset of the hash table.
    pub hash_offset: u32,
    /// Absolute offset of the short info table.
    pub short_info_offset: u32,
}

/// Determines if the given data starts with the CTPK signature.
///
/// Only the 4-byte tag is inspected; use [`CtpkHeader::parse`] or
/// [`CtpkArchive::from_bytes`](super::CtpkArchive::from_bytes) for full validation.
#[inline(always)]
pub fn is_ctpk(data: &[u8]) -> bool {
    data.len() >= SIGNATURE_SIZE && u32::from_be_bytes([data[0], data[1], data[2], data[3]]) == CTPK_SIGNATURE
}

impl CtpkHeader {
    /// Parses the header and checks the signature.
    ///
    /// Offsets are not validated against the archive here; see
    /// [`CtpkArchive::from_bytes`](super::CtpkArchive::from_bytes).
    pub fn parse(data: &[u8]) -> Result<Self, StructuralError> {
        if data.len() < HEADER_SIZE {
            return Err(StructuralError::TooShort {
                required: HEADER_SIZE,
                actual: data.len(),
            });
        }

        if !is_ctpk(data) {
            return Err(StructuralError::InvalidSignature {
                found: u32::from_be_bytes([data[0], data[1], data[2], data[3]]),
            });
        }

        // SAFETY: data.len() >= HEADER_SIZE (0x20); every field read below ends at or before 0x18.
        unsafe {
            let mut reader = LittleEndianReader::new(data.as_ptr());
            Ok(Self {
                version: reader.read_u16_at(VERSION_OFFSET as isize),
                count: reader.read_u16_at(COUNT_OFFSET as isize),
                texture_data_offset: reader.read_u32_at(TEXTURE_DATA_OFFSET_OFFSET as isize),
                texture_data_size: reader.read_u32_at(TEXTURE_DATA_SIZE_OFFSET as isize),
                hash_offset: reader.read_u32_at(HASH_OFFSET_OFFSET as isize),
                short_info_offset: reader.read_u32_at(SHORT_INFO_OFFSET_OFFSET as isize),
            })
        }
    }
}
