/// Builds mip level `level` of a row-major RGBA8888 image by nearest-neighbour sampling.
///
/// Pixel `(x, y)` of the level is pixel `(x << level, y << level)` of the source.
pub fn downsample_nearest(rgba: &[u8], width: usize, height: usize, level: u32) -> Vec<u8> {
    let level_width = width >> level;
    let level_height = height >> level;
    let mut result = Vec::with_capacity(level_width * level_height * 4);

    for y in 0..level_height {
        let row = (y << level) * width;
        for x in 0..level_width {
            let offset = (row + (x << level)) * 4;
            result.extend_from_slice(&rgba[offset..offset + 4]);
        }
    }

    result
}
