//! Archive file access using lightweight-mmap.

use super::FileOperationResult;
use crate::archive::{is_ctpk, SIGNATURE_SIZE};
use lightweight_mmap::handles::*;
use lightweight_mmap::mmap::*;
use std::path::Path;

/// Reads a whole archive file into memory.
///
/// The mapping is released before returning, so the same path can be written afterwards.
pub fn read_archive(path: &Path) -> FileOperationResult<Vec<u8>> {
    let handle = ReadOnlyFileHandle::open(path)?;
    let size = handle.size()? as usize;
    if size == 0 {
        return Ok(Vec::new());
    }

    let mapping = ReadOnlyMmap::new(&handle, 0, size)?;
    Ok(mapping.as_slice().to_vec())
}

/// Replaces the file at `path` with `data` in a single write.
pub fn write_archive(path: &Path, data: &[u8]) -> FileOperationResult<()> {
    let handle = ReadWriteFileHandle::create_preallocated(path, data.len() as i64)?;
    let mut mapping = ReadWriteMmap::new(&handle, 0, data.len())?;
    mapping.as_mut_slice().copy_from_slice(data);
    Ok(())
}

/// Checks whether the file at `path` starts with the CTPK signature.
///
/// Any I/O failure (missing file, too short, permissions) yields `false`.
pub fn is_ctpk_file(path: &Path) -> bool {
    let Ok(handle) = ReadOnlyFileHandle::open(path) else {
        return false;
    };
    match handle.size() {
        Ok(size) if size as usize >= SIGNATURE_SIZE => {}
        _ => return false,
    }

    ReadOnlyMmap::new(&handle, 0, SIGNATURE_SIZE).is_ok_and(|mapping| is_ctpk(mapping.as_slice()))
}
