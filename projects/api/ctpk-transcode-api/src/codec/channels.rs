//! Channel widening and narrowing for the uncompressed formats.
//!
//! Widening replicates the top bits of 5 and 6 bit channels into the low bits and
//! multiplies 4 bit channels by `0x11`. Narrowing truncates. Luminance is computed with
//! integer Rec.601 weights, which map a grey pixel back to its own value, so
//! `narrow(widen(x)) == x` for every canonical texel.

use ctpk_transcode_common::{TextureFormat, TilingClass};

/// Bytes per texel in canonical channel order, `None` for block compressed formats.
pub fn canonical_texel_bytes(format: TextureFormat) -> Option<usize> {
    match (format.texel_layout(), format.tiling_class()) {
        (Some(layout), _) => Some(layout.texel_bytes),
        (None, TilingClass::NibblePacked) => Some(1),
        _ => None,
    }
}

/// Widens canonical texels to RGBA8888.
///
/// # Returns
///
/// `None` for block compressed formats, which need a block decoder instead.
pub fn widen_to_rgba(format: TextureFormat, data: &[u8]) -> Option<Vec<u8>> {
    let texel_bytes = canonical_texel_bytes(format)?;
    let mut rgba = Vec::with_capacity(data.len() / texel_bytes * 4);

    for texel in data.chunks_exact(texel_bytes) {
        let pixel = match format {
            TextureFormat::Rgba8888 => [texel[0], texel[1], texel[2], texel[3]],
            TextureFormat::Rgb888 => [texel[0], texel[1], texel[2], 255],
            TextureFormat::Rgba5551 => {
                let value = u16::from_le_bytes([texel[0], texel[1]]);
                [
                    widen_5(value >> 11),
                    widen_5(value >> 6),
                    widen_5(value >> 1),
                    if value & 1 != 0 { 255 } else { 0 },
                ]
            }
            TextureFormat::Rgb565 => {
                let value = u16::from_le_bytes([texel[0], texel[1]]);
                [widen_5(value >> 11), widen_6(value >> 5), widen_5(value), 255]
            }
            TextureFormat::Rgba4444 => {
                let value = u16::from_le_bytes([texel[0], texel[1]]);
                [
                    widen_4(value >> 12),
                    widen_4(value >> 8),
                    widen_4(value >> 4),
                    widen_4(value),
                ]
            }
            TextureFormat::La88 => [texel[0], texel[0], texel[0], texel[1]],
            TextureFormat::Hl8 => [texel[0], texel[1], 0, 255],
            TextureFormat::L8 | TextureFormat::L4 => [texel[0], texel[0], texel[0], 255],
            TextureFormat::A8 | TextureFormat::A4 => [0, 0, 0, texel[0]],
            TextureFormat::La44 => {
                let l = widen_4(texel[0] as u16 >> 4);
                [l, l, l, widen_4(texel[0] as u16)]
            }
            TextureFormat::Etc1 | TextureFormat::Etc1A4 => return None,
        };
        rgba.extend_from_slice(&pixel);
    }

    Some(rgba)
}

/// Narrows RGBA8888 pixels to canonical texels.
///
/// # Returns
///
/// `None` for block compressed formats, which need a block encoder instead.
pub fn narrow_from_rgba(format: TextureFormat, rgba: &[u8]) -> Option<Vec<u8>> {
    let texel_bytes = canonical_texel_bytes(format)?;
    let mut data = Vec::with_capacity(rgba.len() / 4 * texel_bytes);

    for pixel in rgba.chunks_exact(4) {
        let (r, g, b, a) = (pixel[0], pixel[1], pixel[2], pixel[3]);
        match format {
            TextureFormat::Rgba8888 => data.extend_from_slice(&[r, g, b, a]),
            TextureFormat::Rgb888 => data.extend_from_slice(&[r, g, b]),
            TextureFormat::Rgba5551 => {
                let value = (r as u16 >> 3) << 11
                    | (g as u16 >> 3) << 6
                    | (b as u16 >> 3) << 1
                    | a as u16 >> 7;
                data.extend_from_slice(&value.to_le_bytes());
            }
            TextureFormat::Rgb565 => {
                let value = (r as u16 >> 3) << 11 | (g as u16 >> 2) << 5 | b as u16 >> 3;
                data.extend_from_slice(&value.to_le_bytes());
            }
            TextureFormat::Rgba4444 => {
                let value = (r as u16 >> 4) << 12
                    | (g as u16 >> 4) << 8
                    | (b as u16 >> 4) << 4
                    | a as u16 >> 4;
                data.extend_from_slice(&value.to_le_bytes());
            }
            TextureFormat::La88 => data.extend_from_slice(&[luminance(r, g, b), a]),
            TextureFormat::Hl8 => data.extend_from_slice(&[r, g]),
            TextureFormat::L8 => data.push(luminance(r, g, b)),
            TextureFormat::A8 => data.push(a),
            TextureFormat::La44 => data.push((luminance(r, g, b) & 0xF0) | a >> 4),
            TextureFormat::L4 => data.push((luminance(r, g, b) >> 4) * 0x11),
            TextureFormat::A4 => data.push((a >> 4) * 0x11),
            TextureFormat::Etc1 | TextureFormat::Etc1A4 => return None,
        }
    }

    Some(data)
}

/// Rec.601 luma in 8.8 fixed point: `0.299 R + 0.587 G + 0.114 B`.
#[inline(always)]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((77 * r as u32 + 150 * g as u32 + 29 * b as u32 + 128) >> 8) as u8
}

#[inline(always)]
fn widen_4(value: u16) -> u8 {
    (value & 0xF) as u8 * 0x11
}

#[inline(always)]
fn widen_5(value: u16) -> u8 {
    let value = (value & 0x1F) as u8;
    (value << 3) | (value >> 2)
}

#[inline(always)]
fn widen_6(value: u16) -> u8 {
    let value = (value & 0x3F) as u8;
    (value << 2) | (value >> 4)
}
