//! Builds synthetic CTPK archives for tests.
//!
//! Layout: header, entry table, short info table, hash table, path strings, padding to
//! 0x80, then the pixel data of each texture back to back. Field offsets are written out
//! literally so that tests do not share constants with the parser under test.

use ctpk_transcode_common::TextureFormat;
use endian_writer::{EndianWriter, LittleEndianWriter};

const HEADER_SIZE: usize = 0x20;
const ENTRY_SIZE: usize = 0x24;
const DATA_ALIGNMENT: usize = 0x80;

/// One texture to place in a [`ArchiveBuilder`] archive.
#[derive(Debug, Clone)]
pub struct TestTexture {
    path: String,
    format: TextureFormat,
    width: u16,
    height: u16,
    mip_levels: u8,
    data: Option<Vec<u8>>,
    short_info_format: Option<u8>,
    declared_size: Option<u32>,
}

impl TestTexture {
    /// A single-level texture filled with a deterministic byte pattern.
    pub fn new(path: &str, format: TextureFormat, width: u16, height: u16) -> Self {
        Self {
            path: path.to_string(),
            format,
            width,
            height,
            mip_levels: 1,
            data: None,
            short_info_format: None,
            declared_size: None,
        }
    }

    pub fn with_mips(mut self, mip_levels: u8) -> Self {
        self.mip_levels = mip_levels;
        self
    }

    /// Uses `data` as the pixel data; its length becomes the declared size.
    pub fn with_data(mut self, data: Vec<u8>) -> Self {
        self.data = Some(data);
        self
    }

    /// Stores a different format id in the short info table.
    pub fn with_short_info_format(mut self, format: u8) -> Self {
        self.short_info_format = Some(format);
        self
    }

    /// Declares (and stores) `size` bytes of pixel data instead of the computed chain size.
    pub fn with_declared_size(mut self, size: u32) -> Self {
        self.declared_size = Some(size);
        self
    }

    fn pixel_data(&self, seed: usize) -> Vec<u8> {
        if let Some(data) = &self.data {
            return data.clone();
        }

        let size = match self.declared_size {
            Some(size) => size as usize,
            None => self.format.mip_chain_size(
                self.width as usize,
                self.height as usize,
                self.mip_levels.max(1) as u32,
            ),
        };
        (0..size)
            .map(|i| (i.wrapping_mul(37) ^ (i >> 7) ^ seed.wrapping_mul(101)) as u8)
            .collect()
    }
}

/// Assembles textures into a version 1 archive.
#[derive(Debug, Clone, Default)]
pub struct ArchiveBuilder {
    textures: Vec<TestTexture>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texture(mut self, texture: TestTexture) -> Self {
        self.textures.push(texture);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let count = self.textures.len();
        let short_info_offset = HEADER_SIZE + count * ENTRY_SIZE;
        let hash_offset = short_info_offset + count * 4;
        let paths_offset = hash_offset + count * 8;

        let mut paths = Vec::new();
        let mut path_offsets = Vec::with_capacity(count);
        for texture in &self.textures {
            path_offsets.push(paths_offset + paths.len());
            paths.extend_from_slice(texture.path.as_bytes());
            paths.push(0);
        }

        let data_offset = (paths_offset + paths.len()).next_multiple_of(DATA_ALIGNMENT);
        let pixel_data: Vec<Vec<u8>> = self
            .textures
            .iter()
            .enumerate()
            .map(|(i, texture)| texture.pixel_data(i))
            .collect();
        let data_size: usize = pixel_data.iter().map(Vec::len).sum();

        let mut data = vec![0u8; data_offset + data_size];
        data[..4].copy_from_slice(b"CTPK");
        data[paths_offset..paths_offset + paths.len()].copy_from_slice(&paths);

        // SAFETY: every write below lands inside the header, entry table, short info table or
        // hash table, all of which precede `paths_offset` in the buffer.
        unsafe {
            let mut header = LittleEndianWriter::new(data.as_mut_ptr());
            header.write_u16_at(1, 0x04);
            header.write_u16_at(count as u16, 0x06);
            header.write_u32_at(data_offset as u32, 0x08);
            header.write_u32_at(data_size as u32, 0x0C);
            header.write_u32_at(hash_offset as u32, 0x10);
            header.write_u32_at(short_info_offset as u32, 0x14);

            let mut relative_offset = 0;
            for (i, (texture, pixels)) in self.textures.iter().zip(&pixel_data).enumerate() {
                let mut entry =
                    LittleEndianWriter::new(data.as_mut_ptr().add(HEADER_SIZE + i * ENTRY_SIZE));
                entry.write_u32_at(path_offsets[i] as u32, 0x00);
                entry.write_u32_at(pixels.len() as u32, 0x04);
                entry.write_u32_at(relative_offset as u32, 0x08);
                entry.write_u32_at(texture.format.id() as u32, 0x0C);
                entry.write_u16_at(texture.width, 0x10);
                entry.write_u16_at(texture.height, 0x12);
                entry.write_u32_at(0x5F3759DF, 0x1C);

                let mut hash = LittleEndianWriter::new(data.as_mut_ptr().add(hash_offset + i * 8));
                hash.write_u32_at(0x1000 + i as u32, 0);
                hash.write_u32_at(i as u32, 4);

                relative_offset += pixels.len();
            }
        }

        let mut relative_offset = 0;
        for (i, (texture, pixels)) in self.textures.iter().zip(&pixel_data).enumerate() {
            let entry = HEADER_SIZE + i * ENTRY_SIZE;
            data[entry + 0x14] = texture.mip_levels;

            let short_info = short_info_offset + i * 4;
            data[short_info] = texture
                .short_info_format
                .unwrap_or(texture.format.id());
            data[short_info + 1] = texture.mip_levels;

            let start = data_offset + relative_offset;
            data[start..start + pixels.len()].copy_from_slice(pixels);
            relative_offset += pixels.len();
        }

        data
    }
}
