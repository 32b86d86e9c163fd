use crate::core::color::unpack_rgb;
use crate::core::framebuffer::FrameBuffer;
use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};

/// Converts the packed `0xAARRGGBB` color buffer to an RGB image.
pub fn framebuffer_to_image(framebuffer: &FrameBuffer) -> RgbImage {
    RgbImage::from_fn(framebuffer.width as u32, framebuffer.height as u32, |x, y| {
        let pixel = framebuffer.get_pixel(x as usize, y as usize).unwrap_or(0);
        Rgb(unpack_rgb(pixel))
    })
}

/// Saves the frame buffer as a PNG (or any format `image` infers from the extension).
pub fn save_buffer_to_image<P: AsRef<Path>>(framebuffer: &FrameBuffer, path: P) -> Result<()> {
    let path = path.as_ref();
    framebuffer_to_image(framebuffer)
        .save(path)
        .with_context(|| format!("failed to save image to {}", path.display()))
}

/// Output path for one frame of a sequence: `out.png` becomes `out_0003.png`.
/// A single-frame render keeps the path as is.
pub fn frame_output_path(base: &Path, frame: usize, frame_count: usize) -> PathBuf {
    if frame_count <= 1 {
        return base.to_path_buf();
    }

    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    let name = match base.extension() {
        Some(ext) => format!("{stem}_{frame:04}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{frame:04}.png"),
    };
    base.with_file_name(name)
}
