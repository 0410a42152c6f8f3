//! PNG image reading and writing.

use super::FileOperationResult;
use crate::error::ImageValidationError;
use png::{BitDepth, ColorType, Compression, Decoder, Encoder, Transformations};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// An image read from disk, before any validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngImage {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: ColorType,
    /// Raw sample data, exactly as stored in the file.
    pub data: Vec<u8>,
}

impl PngImage {
    /// Checks that the image can replace a `width x height` texture.
    ///
    /// Images must be 8-bit RGBA with exactly the texture's dimensions; no conversion
    /// is attempted.
    pub fn validate(&self, width: u32, height: u32) -> Result<(), ImageValidationError> {
        if self.width != width || self.height != height {
            return Err(ImageValidationError::DimensionMismatch {
                expected_width: width,
                expected_height: height,
                actual_width: self.width,
                actual_height: self.height,
            });
        }
        if self.bit_depth != 8 {
            return Err(ImageValidationError::BitDepth {
                actual: self.bit_depth,
            });
        }
        if self.color_type != ColorType::Rgba {
            return Err(ImageValidationError::ColorType {
                actual: color_type_name(self.color_type),
            });
        }

        Ok(())
    }
}

/// Reads a PNG without applying any transformations.
pub fn read_png(path: &Path) -> FileOperationResult<PngImage> {
    let file = File::open(path)?;
    let mut decoder = Decoder::new(BufReader::new(file));
    decoder.set_transformations(Transformations::IDENTITY);

    let mut reader = decoder.read_info()?;
    let mut data = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut data)?;
    data.truncate(info.buffer_size());

    Ok(PngImage {
        width: info.width,
        height: info.height,
        bit_depth: info.bit_depth as u8,
        color_type: info.color_type,
        data,
    })
}

/// Writes `width * height * 4` bytes of RGBA8888 as a PNG, creating parent directories.
pub fn write_png(path: &Path, width: u32, height: u32, rgba: &[u8]) -> FileOperationResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(Compression::Default);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgba)?;
    writer.finish()?;
    Ok(())
}

fn color_type_name(color_type: ColorType) -> &'static str {
    match color_type {
        ColorType::Grayscale => "greyscale",
        ColorType::Rgb => "RGB",
        ColorType::Indexed => "indexed",
        ColorType::GrayscaleAlpha => "greyscale with alpha",
        ColorType::Rgba => "RGBA",
    }
}
