//! Export and import of whole archives.
//!
//! Export unpacks mip level 0 of every entry, decodes it to RGBA8888 and writes one PNG per
//! entry. Import reads those PNGs back, compares each against the decoded current contents
//! and only re-encodes entries whose pixels changed, so untouched textures never go through
//! a lossy compressor twice.
//!
//! Both directions stop at the first failing entry.

mod report;
pub use report::*;

use crate::archive::{image_path, CtpkArchive, TextureEntry};
use crate::codec::{EncodeQuality, PixelCodec};
use crate::error::{CodecError, CtpkError, CtpkResult, FormatError, SizeMismatchWarning};
use crate::file_io::{read_png, write_png};
use ctpk_transcode_common::{pack_native, unpack_native, LinearLevel, TextureFormat};
use std::path::Path;
use tracing::{debug, info};

/// Runs export and import with a given pixel codec backend.
///
/// ```no_run
/// use ctpk_transcode_api::{CtpkArchive, CtpkTranscoder, EncodeQuality, StandardPixelCodec};
/// use std::path::Path;
///
/// # fn example(data: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
/// let transcoder = CtpkTranscoder::new(StandardPixelCodec)
///     .with_verbose(true)
///     .with_quality(EncodeQuality::Best);
///
/// let mut archive = CtpkArchive::from_bytes(data)?;
/// transcoder.export_archive(&archive, Path::new("textures"))?;
/// let report = transcoder.import_archive(&mut archive, Path::new("textures"))?;
/// assert_eq!(report.reencoded, 0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CtpkTranscoder<C> {
    codec: C,
    verbose: bool,
    quality: EncodeQuality,
}

impl<C: PixelCodec> CtpkTranscoder<C> {
    /// Creates a transcoder with verbose diagnostics off and [`EncodeQuality::Best`].
    pub fn new(codec: C) -> Self {
        Self {
            codec,
            verbose: false,
            quality: EncodeQuality::default(),
        }
    }

    /// Enables the advisory size mismatch log line.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Sets the effort passed to the codec when re-encoding.
    pub fn with_quality(mut self, quality: EncodeQuality) -> Self {
        self.quality = quality;
        self
    }

    #[inline]
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Writes every entry of `archive` as a PNG below `dir`.
    ///
    /// Directories are created as needed. Images written before a failure stay on disk.
    ///
    /// # Errors
    ///
    /// The first [`CtpkError`] raised by any entry.
    pub fn export_archive(&self, archive: &CtpkArchive, dir: &Path) -> CtpkResult<ExportReport> {
        let mut report = ExportReport::default();

        for entry in archive.entries() {
            let format = self.check_entry(entry, &mut report.warnings)?;
            let path = image_path(dir, entry.index, &entry.path)?;
            let rgba = self.decode_entry(archive, entry, format)?;

            write_png(&path, entry.width as u32, entry.height as u32, &rgba)
                .map_err(|e| CtpkError::file_io(&path, e))?;
            info!("save: {}", path.display());
            report.exported += 1;
        }

        Ok(report)
    }

    /// Re-encodes every entry whose PNG below `dir` differs from the archive contents.
    ///
    /// Only the in-memory archive is modified. If an entry fails, entries processed before
    /// it may already have been spliced, so the archive should be discarded; see
    /// [`import_file`](crate::import_file) for the variant that persists on success only.
    ///
    /// # Errors
    ///
    /// The first [`CtpkError`] raised by any entry.
    pub fn import_archive(
        &self,
        archive: &mut CtpkArchive,
        dir: &Path,
    ) -> CtpkResult<ImportReport> {
        let mut report = ImportReport::default();
        let entries = archive.entries().to_vec();

        for entry in &entries {
            let format = self.check_entry(entry, &mut report.warnings)?;
            let path = image_path(dir, entry.index, &entry.path)?;

            let image = read_png(&path).map_err(|e| CtpkError::file_io(&path, e))?;
            info!("load: {}", path.display());
            image
                .validate(entry.width as u32, entry.height as u32)
                .map_err(|source| CtpkError::ImageValidation {
                    path: path.clone(),
                    source,
                })?;

            let current = self.decode_entry(archive, entry, format)?;
            if current == image.data {
                debug!("{}: unchanged, skipping", entry.path);
                report.unchanged += 1;
                continue;
            }

            let chain = self.encode_entry(entry, format, &image.data)?;
            archive.splice_entry(entry.index, &chain)?;
            debug!("{}: re-encoded {} bytes as {format}", entry.path, chain.len());
            report.reencoded += 1;
        }

        Ok(report)
    }

    /// Decodes mip level 0 of an entry into `width * height * 4` bytes of RGBA8888.
    ///
    /// For [`TextureFormat::Etc1A4`] the colour blocks and the alpha plane are decoded
    /// separately and merged.
    pub fn decode_entry(
        &self,
        archive: &CtpkArchive,
        entry: &TextureEntry,
        format: TextureFormat,
    ) -> CtpkResult<Vec<u8>> {
        let (width, height) = (entry.width as usize, entry.height as usize);
        let level = unpack_native(format, archive.texture_data(entry), width, height)
            .map_err(|source| FormatError::Layout {
                index: entry.index,
                source,
            })?;

        let mut rgba = self.decode_checked(entry, &level.color, color_format(format))?;
        if let Some(alpha) = &level.alpha {
            let alpha_rgba = self.decode_checked(entry, alpha, TextureFormat::A8)?;
            for (pixel, alpha) in rgba.chunks_exact_mut(4).zip(alpha_rgba.chunks_exact(4)) {
                pixel[3] = alpha[3];
            }
        }

        Ok(rgba)
    }

    /// Encodes RGBA8888 into the entry's complete native mip chain.
    ///
    /// # Returns
    ///
    /// The packed chain, exactly as long as the mip chain implied by the entry's
    /// dimensions, format and mip count.
    pub fn encode_entry(
        &self,
        entry: &TextureEntry,
        format: TextureFormat,
        rgba: &[u8],
    ) -> CtpkResult<Vec<u8>> {
        let (width, height) = (entry.width as usize, entry.height as usize);
        let level_count = entry.level_count();

        let color_levels = self.encode_checked(entry, rgba, color_format(format))?;
        let mut alpha_levels = if format.has_alpha_plane() {
            Some(self.encode_checked(entry, rgba, TextureFormat::A8)?.into_iter())
        } else {
            None
        };

        let mut chain = vec![0u8; entry.computed_chain_size(format)];
        let mut offset = 0;
        for (level, color) in (0..level_count).zip(color_levels) {
            let size = format.level_size(width, height, level);
            let linear = LinearLevel {
                color,
                alpha: alpha_levels.as_mut().and_then(Iterator::next),
            };

            pack_native(
                format,
                &linear,
                width >> level,
                height >> level,
                &mut chain[offset..offset + size],
            )
            .map_err(|source| FormatError::Layout {
                index: entry.index,
                source,
            })?;
            offset += size;
        }

        Ok(chain)
    }

    /// Validates the entry's format and records a size mismatch, if any.
    fn check_entry(
        &self,
        entry: &TextureEntry,
        warnings: &mut Vec<SizeMismatchWarning>,
    ) -> CtpkResult<TextureFormat> {
        let format = entry.format()?;

        let computed = entry.computed_chain_size(format);
        if computed != entry.data_size as usize {
            let warning = SizeMismatchWarning {
                index: entry.index,
                path: entry.path.clone(),
                declared: entry.data_size as usize,
                computed,
            };
            if self.verbose {
                info!("{warning}");
            }
            warnings.push(warning);
        }

        Ok(format)
    }

    fn decode_checked(
        &self,
        entry: &TextureEntry,
        data: &[u8],
        format: TextureFormat,
    ) -> CtpkResult<Vec<u8>> {
        let (width, height) = (entry.width as usize, entry.height as usize);
        let rgba = self
            .codec
            .decode(data, width, height, format)
            .map_err(|e| codec_error(entry, CodecError::Backend(Box::new(e))))?;

        let expected = width * height * 4;
        if rgba.len() != expected {
            return Err(codec_error(
                entry,
                CodecError::UnexpectedLength {
                    what: "decoded image",
                    expected,
                    actual: rgba.len(),
                },
            ));
        }

        Ok(rgba)
    }

    fn encode_checked(
        &self,
        entry: &TextureEntry,
        rgba: &[u8],
        format: TextureFormat,
    ) -> CtpkResult<Vec<Vec<u8>>> {
        let level_count = entry.level_count();
        let levels = self
            .codec
            .encode(
                rgba,
                entry.width as usize,
                entry.height as usize,
                format,
                level_count,
                self.quality,
            )
            .map_err(|e| codec_error(entry, CodecError::Backend(Box::new(e))))?;

        if levels.len() != level_count as usize {
            return Err(codec_error(
                entry,
                CodecError::UnexpectedLevelCount {
                    expected: level_count as usize,
                    actual: levels.len(),
                },
            ));
        }

        Ok(levels)
    }
}

/// The format handed to the codec for the colour part of a texture.
#[inline]
fn color_format(format: TextureFormat) -> TextureFormat {
    match format {
        TextureFormat::Etc1A4 => TextureFormat::Etc1,
        other => other,
    }
}

fn codec_error(entry: &TextureEntry, source: CodecError) -> CtpkError {
    CtpkError::Codec {
        index: entry.index,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::StandardPixelCodec;
    use crate::error::{ImageValidationError, PatchError};
    use crate::test_prelude::*;

    fn transcoder() -> CtpkTranscoder<StandardPixelCodec> {
        CtpkTranscoder::new(StandardPixelCodec)
    }

    #[rstest]
    #[case(TextureFormat::Rgba8888)]
    #[case(TextureFormat::Rgb565)]
    #[case(TextureFormat::La88)]
    #[case(TextureFormat::L4)]
    #[case(TextureFormat::Etc1)]
    #[case(TextureFormat::Etc1A4)]
    fn unchanged_import_leaves_archive_identical(#[case] format: TextureFormat) {
        let original = ArchiveBuilder::new()
            .texture(TestTexture::new("tex/a.tga", format, 16, 16).with_mips(2))
            .texture(TestTexture::new("b.tga", TextureFormat::A8, 8, 8))
            .build();
        let dir = tempdir().unwrap();

        let mut archive = CtpkArchive::from_bytes(original.clone()).unwrap();
        let exported = transcoder().export_archive(&archive, dir.path()).unwrap();
        let report = transcoder().import_archive(&mut archive, dir.path()).unwrap();

        assert_eq!(exported.exported, 2);
        assert_eq!(report.unchanged, 2);
        assert!(!report.modified());
        assert_eq!(archive.as_bytes(), original.as_slice());
    }

    #[test]
    fn export_writes_rgba_png_below_dir() {
        let archive = ArchiveBuilder::new()
            .texture(TestTexture::new("rom:/ui\\icon.tga", TextureFormat::Rgb888, 8, 16))
            .build();
        let archive = CtpkArchive::from_bytes(archive).unwrap();
        let dir = tempdir().unwrap();

        transcoder().export_archive(&archive, dir.path()).unwrap();

        let image = read_png(&dir.path().join("rom").join("ui").join("icon.tga.png")).unwrap();
        assert_eq!((image.width, image.height), (8, 16));
        assert_eq!(image.bit_depth, 8);
        assert_eq!(image.color_type, png::ColorType::Rgba);
        assert!(image.data.chunks_exact(4).all(|p| p[3] == 255));
    }

    #[test]
    fn modified_image_is_reencoded_into_its_entry_only() {
        let original = ArchiveBuilder::new()
            .texture(TestTexture::new("a.tga", TextureFormat::Rgba8888, 8, 8))
            .texture(TestTexture::new("b.tga", TextureFormat::Rgb565, 16, 16).with_mips(2))
            .build();
        let mut archive = CtpkArchive::from_bytes(original.clone()).unwrap();
        let dir = tempdir().unwrap();
        transcoder().export_archive(&archive, dir.path()).unwrap();

        let image_path = dir.path().join("b.tga.png");
        let mut image = read_png(&image_path).unwrap();
        image.data[..4].copy_from_slice(&[255, 255, 255, 255]);
        write_png(&image_path, 16, 16, &image.data).unwrap();

        let report = transcoder().import_archive(&mut archive, dir.path()).unwrap();

        assert_eq!(report.reencoded, 1);
        assert_eq!(report.unchanged, 1);
        let changed = archive.data_range(&archive.entries()[1]);
        let patched = archive.as_bytes();
        assert_eq!(&patched[..changed.start], &original[..changed.start]);
        assert_eq!(&patched[changed.end..], &original[changed.end..]);
        assert_ne!(&patched[changed.clone()], &original[changed]);

        // Level 0 now decodes to the edited image.
        let decoded = transcoder()
            .decode_entry(&archive, &archive.entries()[1], TextureFormat::Rgb565)
            .unwrap();
        assert_eq!(decoded, image.data);
    }

    #[test]
    fn etc1a4_alpha_plane_survives_encode() {
        let archive = ArchiveBuilder::new()
            .texture(TestTexture::new("a.tga", TextureFormat::Etc1A4, 8, 8))
            .build();
        let archive = CtpkArchive::from_bytes(archive).unwrap();
        let entry = &archive.entries()[0];

        let mut rgba = vec![0x80u8; 8 * 8 * 4];
        for (i, pixel) in rgba.chunks_exact_mut(4).enumerate() {
            pixel[3] = (i % 16) as u8 * 0x11;
        }

        let chain = transcoder()
            .encode_entry(entry, TextureFormat::Etc1A4, &rgba)
            .unwrap();
        let level = unpack_native(TextureFormat::Etc1A4, &chain, 8, 8).unwrap();

        let alpha: Vec<u8> = rgba.chunks_exact(4).map(|p| p[3]).collect();
        assert_eq!(level.alpha.unwrap(), alpha);
    }

    #[test]
    fn etc1_encode_has_no_alpha_plane() {
        let archive = ArchiveBuilder::new()
            .texture(TestTexture::new("a.tga", TextureFormat::Etc1, 8, 8))
            .build();
        let archive = CtpkArchive::from_bytes(archive).unwrap();
        let entry = &archive.entries()[0];

        let chain = transcoder()
            .encode_entry(entry, TextureFormat::Etc1, &vec![0x40u8; 8 * 8 * 4])
            .unwrap();

        assert_eq!(chain.len(), entry.computed_chain_size(TextureFormat::Etc1));
        let level = unpack_native(TextureFormat::Etc1, &chain, 8, 8).unwrap();
        assert!(level.alpha.is_none());
    }

    #[test]
    fn etc1a4_alpha_nibbles_are_merged_on_decode() {
        // Four 16-byte records, all colour blocks zero. Record 0 holds alpha 0xF for
        // texel (0, 1); record 1 (top right block) holds alpha 0xF for texel (4, 0).
        let mut data = vec![0u8; 64];
        data[0] = 0xF0;
        data[16] = 0x0F;

        let archive = ArchiveBuilder::new()
            .texture(TestTexture::new("a.tga", TextureFormat::Etc1A4, 8, 8).with_data(data))
            .build();
        let archive = CtpkArchive::from_bytes(archive).unwrap();

        let rgba = transcoder()
            .decode_entry(&archive, &archive.entries()[0], TextureFormat::Etc1A4)
            .unwrap();

        let pixel = |x: usize, y: usize| &rgba[(y * 8 + x) * 4..(y * 8 + x) * 4 + 4];
        assert_eq!(pixel(0, 0), [2, 2, 2, 0]);
        assert_eq!(pixel(0, 1), [2, 2, 2, 0xFF]);
        assert_eq!(pixel(4, 0), [2, 2, 2, 0xFF]);
        assert_eq!(pixel(5, 0), [2, 2, 2, 0]);
    }

    #[test]
    fn image_with_wrong_dimensions_is_rejected() {
        let original = ArchiveBuilder::new()
            .texture(TestTexture::new("a.tga", TextureFormat::L8, 8, 8))
            .build();
        let mut archive = CtpkArchive::from_bytes(original).unwrap();
        let dir = tempdir().unwrap();
        write_png(&dir.path().join("a.tga.png"), 16, 8, &vec![0u8; 16 * 8 * 4]).unwrap();

        let error = transcoder()
            .import_archive(&mut archive, dir.path())
            .unwrap_err();

        assert!(matches!(
            error,
            CtpkError::ImageValidation {
                source: ImageValidationError::DimensionMismatch {
                    expected_width: 8,
                    actual_width: 16,
                    ..
                },
                ..
            }
        ));
    }

    #[test]
    fn missing_image_is_a_file_error() {
        let original = ArchiveBuilder::new()
            .texture(TestTexture::new("a.tga", TextureFormat::L8, 8, 8))
            .build();
        let mut archive = CtpkArchive::from_bytes(original).unwrap();
        let dir = tempdir().unwrap();

        let error = transcoder()
            .import_archive(&mut archive, dir.path())
            .unwrap_err();

        assert!(matches!(error, CtpkError::FileIo { .. }));
    }

    #[test]
    fn short_info_mismatch_aborts_export() {
        let original = ArchiveBuilder::new()
            .texture(TestTexture::new("a.tga", TextureFormat::L8, 8, 8))
            .texture(TestTexture::new("b.tga", TextureFormat::L8, 8, 8).with_short_info_format(3))
            .build();
        let archive = CtpkArchive::from_bytes(original).unwrap();
        let dir = tempdir().unwrap();

        let error = transcoder().export_archive(&archive, dir.path()).unwrap_err();

        assert!(matches!(
            error,
            CtpkError::Format(FormatError::ShortInfoMismatch { index: 1, .. })
        ));
        // The first entry was written before the failure.
        assert!(dir.path().join("a.tga.png").exists());
        assert!(!dir.path().join("b.tga.png").exists());
    }

    #[test]
    fn size_mismatch_is_reported_but_not_fatal() {
        // Declares one mip level of 8x8 L8 (64 bytes) but stores 80 bytes.
        let original = ArchiveBuilder::new()
            .texture(TestTexture::new("a.tga", TextureFormat::L8, 8, 8).with_declared_size(80))
            .build();
        let archive = CtpkArchive::from_bytes(original).unwrap();
        let dir = tempdir().unwrap();

        let report = transcoder()
            .with_verbose(true)
            .export_archive(&archive, dir.path())
            .unwrap();

        assert_eq!(report.exported, 1);
        assert_eq!(
            report.warnings,
            vec![SizeMismatchWarning {
                index: 0,
                path: "a.tga".to_string(),
                declared: 80,
                computed: 64,
            }]
        );
    }

    #[test]
    fn reencoding_an_entry_with_mismatched_size_fails_the_splice() {
        let original = ArchiveBuilder::new()
            .texture(TestTexture::new("a.tga", TextureFormat::L8, 8, 8).with_declared_size(80))
            .build();
        let mut archive = CtpkArchive::from_bytes(original.clone()).unwrap();
        let dir = tempdir().unwrap();
        write_png(&dir.path().join("a.tga.png"), 8, 8, &vec![0x7Fu8; 8 * 8 * 4]).unwrap();

        let error = transcoder()
            .import_archive(&mut archive, dir.path())
            .unwrap_err();

        assert!(matches!(
            error,
            CtpkError::Patch(PatchError::ChainSizeMismatch {
                declared: 80,
                actual: 64,
                ..
            })
        ));
        assert_eq!(archive.as_bytes(), original.as_slice());
    }

    #[test]
    fn mip_levels_below_tile_size_cannot_be_reencoded() {
        // 8x8 with two levels: level 1 is 4x4, which cannot be tiled.
        let original = ArchiveBuilder::new()
            .texture(TestTexture::new("a.tga", TextureFormat::L8, 8, 8).with_mips(2))
            .build();
        let mut archive = CtpkArchive::from_bytes(original).unwrap();
        let dir = tempdir().unwrap();
        write_png(&dir.path().join("a.tga.png"), 8, 8, &vec![0x10u8; 8 * 8 * 4]).unwrap();

        let error = transcoder()
            .import_archive(&mut archive, dir.path())
            .unwrap_err();

        assert!(matches!(
            error,
            CtpkError::Format(FormatError::Layout { index: 0, .. })
        ));
    }
}
