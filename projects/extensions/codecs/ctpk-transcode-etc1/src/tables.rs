//! Constant tables of the ETC1 format.

/// Intensity modifier tables, indexed by the 3-bit table codeword.
///
/// Pixel index values 0 to 3 select `[a, b, -a, -b]` of the chosen row.
pub const INTENSITY_MODIFIERS: [[i16; 4]; 8] = [
    [2, 8, -2, -8],
    [5, 17, -5, -17],
    [9, 29, -9, -29],
    [13, 42, -13, -42],
    [18, 60, -18, -60],
    [24, 80, -24, -80],
    [33, 106, -33, -106],
    [47, 183, -47, -183],
];

/// Bit position of the first table codeword.
pub const TABLE_0_SHIFT: u32 = 37;
/// Bit position of the second table codeword.
pub const TABLE_1_SHIFT: u32 = 34;
/// Differential mode bit.
pub const DIFF_BIT: u32 = 33;
/// Flip bit; set splits the block into top and bottom halves.
pub const FLIP_BIT: u32 = 32;
/// Bit position of the first most-significant index bit.
pub const INDEX_MSB_SHIFT: u32 = 16;

/// Widens a 4-bit channel to 8 bits.
#[inline(always)]
pub const fn expand_4(value: u8) -> u8 {
    (value << 4) | value
}

/// Widens a 5-bit channel to 8 bits.
#[inline(always)]
pub const fn expand_5(value: u8) -> u8 {
    (value << 3) | (value >> 2)
}

/// Which half of the block the pixel at `(x, y)` belongs to.
#[inline(always)]
pub(crate) fn subblock_of(x: usize, y: usize, flip: bool) -> usize {
    let coordinate = if flip { y } else { x };
    (coordinate >= 2) as usize
}

/// Clamped `base + modifier`.
#[inline(always)]
pub(crate) fn apply_modifier(base: u8, modifier: i16) -> u8 {
    (base as i16 + modifier).clamp(0, 255) as u8
}
