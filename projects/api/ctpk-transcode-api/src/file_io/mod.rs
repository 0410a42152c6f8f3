//! Reading and writing archive files and PNG images.
//!
//! Archives are accessed through memory maps ([`lightweight_mmap`]); images through the
//! [`png`] crate.

mod archive_file;
mod png_file;

pub use archive_file::*;
pub use png_file::*;

use crate::error::FileIoError;

/// Result type for file I/O operations
pub type FileOperationResult<T> = Result<T, FileIoError>;
