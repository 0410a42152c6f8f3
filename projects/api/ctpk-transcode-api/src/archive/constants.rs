//! CTPK layout constants.

/// Signature at the start of every archive: `CTPK`, read as a big-endian u32.
pub const CTPK_SIGNATURE: u32 = 0x4354504B;

/// Size of the signature in bytes.
pub const SIGNATURE_SIZE: usize = 4;

/// Size of the fixed header.
pub const HEADER_SIZE: usize = 0x20;

pub(crate) const VERSION_OFFSET: usize = 0x04;
pub(crate) const COUNT_OFFSET: usize = 0x06;
pub(crate) const TEXTURE_DATA_OFFSET_OFFSET: usize = 0x08;
pub(crate) const TEXTURE_DATA_SIZE_OFFSET: usize = 0x0C;
pub(crate) const HASH_OFFSET_OFFSET: usize = 0x10;
pub(crate) const SHORT_INFO_OFFSET_OFFSET: usize = 0x14;

/// Size of one entry in the entry table, which starts right after the header.
pub const ENTRY_SIZE: usize = 0x24;

pub(crate) const ENTRY_PATH_OFFSET: usize = 0x00;
pub(crate) const ENTRY_DATA_SIZE: usize = 0x04;
pub(crate) const ENTRY_DATA_OFFSET: usize = 0x08;
pub(crate) const ENTRY_FORMAT: usize = 0x0C;
pub(crate) const ENTRY_WIDTH: usize = 0x10;
pub(crate) const ENTRY_HEIGHT: usize = 0x12;
pub(crate) const ENTRY_MIP_LEVELS: usize = 0x14;
pub(crate) const ENTRY_TYPE: usize = 0x15;
pub(crate) const ENTRY_CUBE_DIRECTION: usize = 0x16;
pub(crate) const ENTRY_BITMAP_SIZE_OFFSET: usize = 0x18;
pub(crate) const ENTRY_SOURCE_TIME: usize = 0x1C;

/// Size of one short info record.
pub const SHORT_INFO_SIZE: usize = 4;

/// Size of one hash table record (hash, entry index).
pub const HASH_ENTRY_SIZE: usize = 8;

/// Short info format value meaning "not set"; skips the format cross-check.
pub const UNSET_SHORT_INFO_FORMAT: u8 = 0xFF;
