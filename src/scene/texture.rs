use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use log::info;
use nalgebra::{Vector2, Vector3};
use std::path::Path;

/// An 8-bit RGB image sampled with nearest-pixel lookup.
#[derive(Debug, Clone)]
pub struct Texture {
    image: RgbImage,
}

impl Texture {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .with_context(|| format!("failed to load texture {}", path.display()))?
            .to_rgb8();

        info!(
            "Loaded texture: {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );

        Ok(Self::from_image(image))
    }

    pub fn from_image(image: RgbImage) -> Self {
        Self { image }
    }

    /// A 1x1 texture returning `color` everywhere.
    pub fn solid(color: Vector3<f32>) -> Self {
        let texel = color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        Self::from_image(RgbImage::from_pixel(1, 1, Rgb([texel.x, texel.y, texel.z])))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Nearest-pixel sample at `uv`, returned in [0, 1].
    ///
    /// `uv` is clamped to [0, 1] first and `u = 1` / `v = 1` land on the last
    /// column / row. v runs top to bottom in image rows.
    pub fn sample(&self, uv: Vector2<f32>) -> Vector3<f32> {
        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 {
            return Vector3::zeros();
        }

        let u = if uv.x.is_nan() { 0.0 } else { uv.x.clamp(0.0, 1.0) };
        let v = if uv.y.is_nan() { 0.0 } else { uv.y.clamp(0.0, 1.0) };

        let x = ((u * width as f32) as u32).min(width - 1);
        let y = ((v * height as f32) as u32).min(height - 1);

        let Rgb([r, g, b]) = *self.image.get_pixel(x, y);
        Vector3::new(r as f32, g as f32, b as f32) / 255.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> Texture {
        // 2x2: red, green / blue, white
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 255, 0]));
        img.put_pixel(0, 1, Rgb([0, 0, 255]));
        img.put_pixel(1, 1, Rgb([255, 255, 255]));
        Texture::from_image(img)
    }

    #[test]
    fn nearest_sample_picks_covering_pixel() {
        let tex = checker();
        assert_eq!(tex.sample(Vector2::new(0.25, 0.25)), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(tex.sample(Vector2::new(0.75, 0.25)), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(tex.sample(Vector2::new(0.25, 0.75)), Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn edges_and_out_of_range_uvs_are_clamped() {
        let tex = checker();
        assert_eq!(tex.sample(Vector2::new(1.0, 1.0)), Vector3::repeat(1.0));
        assert_eq!(tex.sample(Vector2::new(7.0, -3.0)), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(tex.sample(Vector2::new(f32::NAN, 0.9)), Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn solid_texture_is_constant() {
        let tex = Texture::solid(Vector3::new(1.0, 0.5, 0.0));
        let expected = Vector3::new(1.0, 128.0 / 255.0, 0.0);
        assert_eq!(tex.sample(Vector2::new(0.1, 0.9)), expected);
        assert_eq!((tex.width(), tex.height()), (1, 1));
    }
}
