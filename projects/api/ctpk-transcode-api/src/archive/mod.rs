//! In-memory CTPK archive: parsing, validation and patching.
//!
//! The archive owns its byte buffer. [`CtpkHeader`] and [`TextureEntry`] are parsed
//! copies of the table records; pixel data is always read from and written to the
//! buffer through the offsets they describe.

pub mod constants;
mod entry;
mod header;
mod path;

pub use constants::*;
pub use entry::*;
pub use header::*;
pub use path::*;

use crate::error::{PatchError, StructuralError};
use core::ops::Range;

/// A loaded and structurally validated CTPK archive.
#[derive(Debug, Clone)]
pub struct CtpkArchive {
    data: Vec<u8>,
    header: CtpkHeader,
    entries: Vec<TextureEntry>,
}

impl CtpkArchive {
    /// Parses and validates an archive image.
    ///
    /// Every table, path string and pixel range is checked against the buffer length here,
    /// so later accessors never index out of bounds.
    ///
    /// # Errors
    ///
    /// A [`StructuralError`] describing the first violated layout rule.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, StructuralError> {
        let header = CtpkHeader::parse(&data)?;
        let archive_size = data.len();
        let count = header.count as usize;

        let table_end = HEADER_SIZE + count * ENTRY_SIZE;
        check_region("Entry table", HEADER_SIZE, count * ENTRY_SIZE, archive_size)?;
        let data_offset = header.texture_data_offset as usize;
        if table_end > data_offset {
            return Err(StructuralError::EntryTableOverlapsData {
                count,
                table_end,
                data_offset,
            });
        }

        let short_info_offset = header.short_info_offset as usize;
        check_region(
            "Short info table",
            short_info_offset,
            count * SHORT_INFO_SIZE,
            archive_size,
        )?;
        check_region(
            "Hash table",
            header.hash_offset as usize,
            count * HASH_ENTRY_SIZE,
            archive_size,
        )?;
        check_region(
            "Pixel data region",
            data_offset,
            header.texture_data_size as usize,
            archive_size,
        )?;

        let mut entries = Vec::with_capacity(count);
        for index in 0..count {
            // SAFETY: the entry table and short info table were bounds checked above.
            let entry = unsafe { TextureEntry::parse(&data, index, short_info_offset)? };

            let offset = data_offset + entry.data_offset as usize;
            let size = entry.data_size as usize;
            if offset.checked_add(size).is_none_or(|end| end > archive_size) {
                return Err(StructuralError::EntryDataOutOfBounds {
                    index,
                    offset,
                    size,
                    archive_size,
                });
            }

            entries.push(entry);
        }

        Ok(Self {
            data,
            header,
            entries,
        })
    }

    #[inline]
    pub fn header(&self) -> &CtpkHeader {
        &self.header
    }

    /// All entries, in table order.
    #[inline]
    pub fn entries(&self) -> &[TextureEntry] {
        &self.entries
    }

    /// The whole archive image.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Absolute byte range of an entry's declared pixel data.
    #[inline]
    pub fn data_range(&self, entry: &TextureEntry) -> Range<usize> {
        let start = self.header.texture_data_offset as usize + entry.data_offset as usize;
        start..start + entry.data_size as usize
    }

    /// The declared pixel data of an entry, mip level 0 first.
    #[inline]
    pub fn texture_data(&self, entry: &TextureEntry) -> &[u8] {
        &self.data[self.data_range(entry)]
    }

    /// Overwrites the pixel data of entry `index` with a newly packed mip chain.
    ///
    /// The chain must be exactly as long as the entry's declared size; the archive is
    /// never resized.
    ///
    /// # Errors
    ///
    /// - [`PatchError::NoSuchEntry`] if `index` is out of range
    /// - [`PatchError::ChainSizeMismatch`] if the lengths differ; the buffer is untouched
    pub fn splice_entry(&mut self, index: usize, chain: &[u8]) -> Result<(), PatchError> {
        let entry = self.entries.get(index).ok_or(PatchError::NoSuchEntry {
            index,
            count: self.entries.len(),
        })?;

        let range = self.data_range(entry);
        if range.len() != chain.len() {
            return Err(PatchError::ChainSizeMismatch {
                index,
                declared: range.len(),
                actual: chain.len(),
            });
        }

        self.data[range].copy_from_slice(chain);
        Ok(())
    }
}

fn check_region(
    region: &'static str,
    offset: usize,
    length: usize,
    archive_size: usize,
) -> Result<(), StructuralError> {
    if offset.checked_add(length).is_none_or(|end| end > archive_size) {
        return Err(StructuralError::RegionOutOfBounds {
            region,
            offset,
            length,
            archive_size,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    fn two_texture_archive() -> Vec<u8> {
        ArchiveBuilder::new()
            .texture(TestTexture::new("a.tga", TextureFormat::La88, 8, 8))
            .texture(TestTexture::new("b.tga", TextureFormat::Etc1, 16, 16).with_mips(2))
            .build()
    }

    #[test]
    fn loads_entries_in_order() {
        let archive = CtpkArchive::from_bytes(two_texture_archive()).unwrap();

        assert_eq!(archive.entries().len(), 2);
        assert_eq!(archive.entries()[0].path, "a.tga");
        assert_eq!(archive.entries()[1].path, "b.tga");
        assert_eq!(archive.entries()[1].index, 1);
        assert_eq!(archive.texture_data(&archive.entries()[0]).len(), 128);
        assert_eq!(archive.texture_data(&archive.entries()[1]).len(), 160);
    }

    #[test]
    fn rejects_corrupted_signature() {
        let mut data = two_texture_archive();
        data[..4].copy_from_slice(b"XXXX");

        assert!(matches!(
            CtpkArchive::from_bytes(data),
            Err(StructuralError::InvalidSignature { .. })
        ));
    }

    #[test]
    fn rejects_truncated_pixel_data() {
        let mut data = two_texture_archive();
        data.truncate(data.len() - 1);

        assert!(matches!(
            CtpkArchive::from_bytes(data),
            Err(StructuralError::RegionOutOfBounds {
                region: "Pixel data region",
                ..
            })
        ));
    }

    #[test]
    fn rejects_entry_count_past_data_offset() {
        let mut data = two_texture_archive();
        // 0x40 entries would run far past the pixel data offset.
        data[COUNT_OFFSET..COUNT_OFFSET + 2].copy_from_slice(&0x40u16.to_le_bytes());

        assert!(CtpkArchive::from_bytes(data).is_err());
    }

    #[test]
    fn rejects_entry_data_outside_archive() {
        let mut data = two_texture_archive();
        let size_field = HEADER_SIZE + ENTRY_SIZE + ENTRY_DATA_SIZE;
        data[size_field..size_field + 4].copy_from_slice(&0x10000u32.to_le_bytes());

        assert!(matches!(
            CtpkArchive::from_bytes(data),
            Err(StructuralError::EntryDataOutOfBounds { index: 1, .. })
        ));
    }

    #[test]
    fn rejects_path_offset_outside_archive() {
        let mut data = two_texture_archive();
        let len = data.len() as u32;
        data[HEADER_SIZE..HEADER_SIZE + 4].copy_from_slice(&len.to_le_bytes());

        assert!(matches!(
            CtpkArchive::from_bytes(data),
            Err(StructuralError::InvalidPathOffset { index: 0, .. })
        ));
    }

    #[test]
    fn splice_replaces_only_the_entry() {
        let original = two_texture_archive();
        let mut archive = CtpkArchive::from_bytes(original.clone()).unwrap();
        let range = archive.data_range(&archive.entries()[0]);

        archive.splice_entry(0, &[0xAB; 128]).unwrap();

        let patched = archive.as_bytes();
        assert!(patched[range.clone()].iter().all(|&b| b == 0xAB));
        assert_eq!(&patched[..range.start], &original[..range.start]);
        assert_eq!(&patched[range.end..], &original[range.end..]);
    }

    #[rstest]
    #[case(127)]
    #[case(129)]
    fn splice_rejects_wrong_chain_size(#[case] length: usize) {
        let original = two_texture_archive();
        let mut archive = CtpkArchive::from_bytes(original.clone()).unwrap();

        assert_eq!(
            archive.splice_entry(0, &vec![0u8; length]),
            Err(PatchError::ChainSizeMismatch {
                index: 0,
                declared: 128,
                actual: length
            })
        );
        assert_eq!(archive.as_bytes(), original.as_slice());
    }

    #[test]
    fn splice_rejects_unknown_entry() {
        let mut archive = CtpkArchive::from_bytes(two_texture_archive()).unwrap();
        assert_eq!(
            archive.splice_entry(2, &[]),
            Err(PatchError::NoSuchEntry { index: 2, count: 2 })
        );
    }
}
