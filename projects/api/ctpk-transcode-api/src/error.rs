//! Error types for archive parsing, transcoding and patching.

use ctpk_transcode_common::TilingError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for archive level operations
pub type CtpkResult<T> = Result<T, CtpkError>;

/// The archive itself is malformed. Raised before any entry is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// Input is shorter than the fixed header.
    #[error("Archive too short: required at least {required} bytes, got {actual} bytes")]
    TooShort { required: usize, actual: usize },

    /// The first four bytes are not `CTPK`.
    #[error("Invalid signature {found:#010X}, this is not a CTPK archive")]
    InvalidSignature { found: u32 },

    /// A table or region described by the header does not fit inside the archive.
    #[error("{region} at {offset:#X} with length {length:#X} exceeds archive size {archive_size:#X}")]
    RegionOutOfBounds {
        region: &'static str,
        offset: usize,
        length: usize,
        archive_size: usize,
    },

    /// The entry table runs into the pixel data region.
    #[error("Entry table for {count} entries ends at {table_end:#X}, past pixel data offset {data_offset:#X}")]
    EntryTableOverlapsData {
        count: usize,
        table_end: usize,
        data_offset: usize,
    },

    /// An entry's path string starts outside the archive or is not NUL-terminated.
    #[error("Entry {index}: path at {offset:#X} is out of bounds or not NUL-terminated")]
    InvalidPathOffset { index: usize, offset: usize },

    /// An entry's pixel data does not fit inside the archive.
    #[error("Entry {index}: pixel data at {offset:#X} with size {size:#X} exceeds archive size {archive_size:#X}")]
    EntryDataOutOfBounds {
        index: usize,
        offset: usize,
        size: usize,
        archive_size: usize,
    },

    /// An entry's path cannot be turned into a relative file path.
    #[error("Entry {index}: texture path '{path}' is empty or escapes the output directory")]
    InvalidTexturePath { index: usize, path: String },
}

/// An entry's pixel format cannot be processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The format id is outside the 14 known formats.
    #[error("Entry {index}: unknown texture format {format}")]
    UnknownFormat { index: usize, format: u32 },

    /// The short info table disagrees with the entry table.
    #[error("Entry {index}: format {entry_format} does not match short info format {short_info_format}")]
    ShortInfoMismatch {
        index: usize,
        entry_format: u32,
        short_info_format: u8,
    },

    /// The texture (or one of its mip levels) cannot be laid out in native tiles.
    #[error("Entry {index}: {source}")]
    Layout {
        index: usize,
        #[source]
        source: TilingError,
    },
}

/// An edited image does not match the texture it replaces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageValidationError {
    #[error("Image is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
    DimensionMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("Image bit depth is {actual}, expected 8")]
    BitDepth { actual: u8 },

    #[error("Image colour type is {actual}, expected RGBA")]
    ColorType { actual: &'static str },
}

/// Specific backend-related errors that can occur during file I/O operations.
#[derive(Debug, Error)]
pub enum LightweightMmapError {
    /// Error opening file handle
    #[error("Failed to open file handle: {0}")]
    FileHandle(#[from] lightweight_mmap::handles::HandleOpenError),

    /// Error creating memory mapping
    #[error("Failed to create memory mapping: {0}")]
    MemoryMapping(#[from] lightweight_mmap::mmap::MmapError),
}

/// File I/O errors that can occur with the different backends
#[derive(Debug, Error)]
pub enum FileIoError {
    /// Error from lightweight-mmap backend
    #[error("lightweight-mmap error: {0}")]
    LightweightMmap(#[from] LightweightMmapError),

    /// Error from std I/O operations
    #[error("I/O error: {0}")]
    Std(#[from] std::io::Error),

    /// The PNG file could not be decoded.
    #[error("PNG decoding error: {0}")]
    PngDecoding(#[from] png::DecodingError),

    /// The PNG file could not be encoded.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),
}

// Direct From implementations for specific error types used with ? operator in file operations
impl From<lightweight_mmap::handles::HandleOpenError> for FileIoError {
    fn from(e: lightweight_mmap::handles::HandleOpenError) -> Self {
        Self::LightweightMmap(LightweightMmapError::FileHandle(e))
    }
}

impl From<lightweight_mmap::mmap::MmapError> for FileIoError {
    fn from(e: lightweight_mmap::mmap::MmapError) -> Self {
        Self::LightweightMmap(LightweightMmapError::MemoryMapping(e))
    }
}

/// The pixel codec backend failed.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Error reported by the backend itself.
    #[error("Pixel codec error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The backend returned a buffer of the wrong size.
    #[error("Pixel codec returned {actual} bytes for {what}, expected {expected}")]
    UnexpectedLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The backend returned the wrong number of mip levels.
    #[error("Pixel codec returned {actual} mip levels, expected {expected}")]
    UnexpectedLevelCount { expected: usize, actual: usize },
}

/// Newly packed bytes cannot be written back into the archive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    /// The re-encoded mip chain differs in size from the declared pixel data size.
    #[error("Entry {index}: packed mip chain is {actual} bytes, declared size is {declared}")]
    ChainSizeMismatch {
        index: usize,
        declared: usize,
        actual: usize,
    },

    /// There is no entry with this index.
    #[error("Entry {index} does not exist, archive has {count} entries")]
    NoSuchEntry { index: usize, count: usize },
}

/// Errors that can occur while exporting or importing an archive.
#[derive(Debug, Error)]
pub enum CtpkError {
    #[error("Invalid archive: {0}")]
    Structural(#[from] StructuralError),

    #[error("Unsupported texture: {0}")]
    Format(#[from] FormatError),

    #[error("Image '{}' rejected: {source}", path.display())]
    ImageValidation {
        path: PathBuf,
        #[source]
        source: ImageValidationError,
    },

    #[error("'{}': {source}", path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: FileIoError,
    },

    #[error("Entry {index}: {source}")]
    Codec {
        index: usize,
        #[source]
        source: CodecError,
    },

    #[error("Patch failed: {0}")]
    Patch(#[from] PatchError),
}

impl CtpkError {
    /// Attaches the offending path to a file I/O error.
    pub(crate) fn file_io(path: impl Into<PathBuf>, source: impl Into<FileIoError>) -> Self {
        Self::FileIo {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Advisory notice that an entry's declared pixel data size differs from the size implied
/// by its dimensions, format and mip count. The declared size is always used for addressing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeMismatchWarning {
    /// Index of the entry in the archive.
    pub index: usize,
    /// Texture path stored in the entry.
    pub path: String,
    /// `TexDataSize` stored in the entry.
    pub declared: usize,
    /// Size of the mip chain computed from the entry's metadata.
    pub computed: usize,
}

impl core::fmt::Display for SizeMismatchWarning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} (entry {}): declared size {:#X} differs from computed mip chain size {:#X}",
            self.path, self.index, self.declared, self.computed
        )
    }
}
