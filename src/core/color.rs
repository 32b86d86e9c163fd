use nalgebra::Vector3;

/// Depth window remapped to grayscale by the depth visualization.
/// With a 0.1..100 perspective most visible geometry lands in this narrow band.
pub const DEPTH_VISUALIZATION_RANGE: (f32, f32) = (0.995, 1.0);

/// Tone mapping used before packing: clamps every channel to at most 1.0
/// (and at least 0.0 so the 8-bit conversion stays in range).
#[inline]
pub fn clamp_to_one(color: Vector3<f32>) -> Vector3<f32> {
    color.map(|c| c.clamp(0.0, 1.0))
}

/// Packs a linear [0, 1] color into `0xAARRGGBB` with opaque alpha.
///
/// Channels round to the nearest 8-bit value instead of truncating, so a lit
/// channel that lands a few ulps under 1.0 after normalization still packs to 255.
/// Truncating packers can come out one step darker per channel.
#[inline]
pub fn pack_rgb(color: Vector3<f32>) -> u32 {
    let r = (color.x.clamp(0.0, 1.0) * 255.0).round() as u32;
    let g = (color.y.clamp(0.0, 1.0) * 255.0).round() as u32;
    let b = (color.z.clamp(0.0, 1.0) * 255.0).round() as u32;

    (255 << 24) | (r << 16) | (g << 8) | b
}

/// Splits a packed `0xAARRGGBB` pixel into its 8-bit RGB channels.
#[inline]
pub fn unpack_rgb(pixel: u32) -> [u8; 3] {
    [
        ((pixel >> 16) & 0xFF) as u8,
        ((pixel >> 8) & 0xFF) as u8,
        (pixel & 0xFF) as u8,
    ]
}

/// Maps a non-linear depth value to a gray level across [`DEPTH_VISUALIZATION_RANGE`].
#[inline]
pub fn depth_to_grayscale(depth: f32) -> Vector3<f32> {
    let (min, max) = DEPTH_VISUALIZATION_RANGE;
    let gray = (depth.clamp(min, max) - min) / (max - min);
    Vector3::repeat(gray)
}
