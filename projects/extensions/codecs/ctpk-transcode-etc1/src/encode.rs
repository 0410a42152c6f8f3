//! Encoding of single ETC1 blocks.
//!
//! The encoder is a straightforward exhaustive search: for each candidate split it
//! quantizes the average colour of both halves, then picks the intensity table and the
//! per-pixel modifiers that minimise the squared RGB error.

use crate::tables::*;

/// Search effort of the block encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Etc1Quality {
    /// Only the left/right split is considered.
    Fast,
    /// Both splits, both colour modes and every intensity table are considered.
    #[default]
    Best,
}

/// Encodes 16 row-major RGBA pixels into one big-endian ETC1 block.
///
/// Alpha is ignored.
pub fn encode_block(pixels: &[[u8; 4]; 16], quality: Etc1Quality) -> [u8; 8] {
    let flips: &[bool] = match quality {
        Etc1Quality::Fast => &[false],
        Etc1Quality::Best => &[false, true],
    };

    let mut best: Option<(u64, u64)> = None;
    for &flip in flips {
        let averages = subblock_averages(pixels, flip);
        for candidate in [individual(averages), differential(averages)] {
            let (error, word) = fit_block(pixels, flip, &candidate);
            if best.is_none_or(|(best_error, _)| error < best_error) {
                best = Some((error, word));
            }
        }
    }

    best.map(|(_, word)| word).unwrap_or_default().to_be_bytes()
}

/// Quantized base colours of both halves, plus the bits that store them.
struct BaseCandidate {
    colors: [[u8; 3]; 2],
    color_bits: u64,
    differential: bool,
}

fn subblock_averages(pixels: &[[u8; 4]; 16], flip: bool) -> [[u32; 3]; 2] {
    let mut sums = [[0u32; 3]; 2];
    for y in 0..4 {
        for x in 0..4 {
            let sub = subblock_of(x, y, flip);
            for channel in 0..3 {
                sums[sub][channel] += pixels[y * 4 + x][channel] as u32;
            }
        }
    }

    sums.map(|sum| sum.map(|channel| (channel + 4) / 8))
}

fn quantize(value: u32, max: u32) -> u8 {
    ((value * max + 127) / 255) as u8
}

fn individual(averages: [[u32; 3]; 2]) -> BaseCandidate {
    let mut colors = [[0u8; 3]; 2];
    let mut color_bits = 0u64;

    for channel in 0..3 {
        let first = quantize(averages[0][channel], 15);
        let second = quantize(averages[1][channel], 15);
        colors[0][channel] = expand_4(first);
        colors[1][channel] = expand_4(second);

        let shift = 60 - channel as u32 * 8;
        color_bits |= (first as u64) << shift | (second as u64) << (shift - 4);
    }

    BaseCandidate {
        colors,
        color_bits,
        differential: false,
    }
}

/// The second half is clamped to the nearest colour reachable with a 3-bit delta.
fn differential(averages: [[u32; 3]; 2]) -> BaseCandidate {
    let mut colors = [[0u8; 3]; 2];
    let mut color_bits = 0u64;

    for channel in 0..3 {
        let first = quantize(averages[0][channel], 31) as i8;
        let wanted = quantize(averages[1][channel], 31) as i8;
        let delta = (wanted - first).clamp(-4, 3).clamp(-first, 31 - first);
        colors[0][channel] = expand_5(first as u8);
        colors[1][channel] = expand_5((first + delta) as u8);

        let shift = 59 - channel as u32 * 8;
        color_bits |= (first as u64) << shift | ((delta as u8 & 0x7) as u64) << (shift - 3);
    }

    BaseCandidate {
        colors,
        color_bits,
        differential: true,
    }
}

/// Chooses tables and indices for both halves; returns the total error and the block word.
fn fit_block(pixels: &[[u8; 4]; 16], flip: bool, candidate: &BaseCandidate) -> (u64, u64) {
    let mut word = candidate.color_bits
        | (candidate.differential as u64) << DIFF_BIT
        | (flip as u64) << FLIP_BIT;
    let mut total = 0u64;

    for (sub, table_shift) in [TABLE_0_SHIFT, TABLE_1_SHIFT].into_iter().enumerate() {
        let base = candidate.colors[sub];
        let mut best = (u64::MAX, 0usize, 0u64);

        for (table, modifiers) in INTENSITY_MODIFIERS.iter().enumerate() {
            let mut error = 0u64;
            let mut index_bits = 0u64;
            for y in 0..4 {
                for x in 0..4 {
                    if subblock_of(x, y, flip) != sub {
                        continue;
                    }

                    let (pixel_error, index) = closest_modifier(pixels[y * 4 + x], base, modifiers);
                    error += pixel_error;
                    let bit = (x * 4 + y) as u32;
                    index_bits |= ((index as u64) >> 1) << (INDEX_MSB_SHIFT + bit);
                    index_bits |= ((index as u64) & 1) << bit;
                }
            }

            if error < best.0 {
                best = (error, table, index_bits);
            }
        }

        total += best.0;
        word |= (best.1 as u64) << table_shift | best.2;
    }

    (total, word)
}

fn closest_modifier(pixel: [u8; 4], base: [u8; 3], modifiers: &[i16; 4]) -> (u64, usize) {
    let mut best = (u64::MAX, 0);
    for (index, &modifier) in modifiers.iter().enumerate() {
        let error: u64 = (0..3)
            .map(|channel| {
                let diff = apply_modifier(base[channel], modifier) as i64 - pixel[channel] as i64;
                (diff * diff) as u64
            })
            .sum();
        if error < best.0 {
            best = (error, index);
        }
    }

    best
}
