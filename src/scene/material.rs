use crate::scene::texture::Texture;
use nalgebra::{Vector2, Vector3};
use std::sync::Arc;

/// Phong exponent multiplied by the sampled glossiness.
pub const DEFAULT_SHININESS: f32 = 25.0;
/// Constant ambient term added in combined shading.
pub const DEFAULT_AMBIENT: f32 = 0.025;

/// Texture set for the Phong shading model.
///
/// Each map is optional; a missing map falls back to the matching constant.
/// Glossiness is a grayscale map, only its red channel is read.
#[derive(Debug, Clone)]
pub struct Material {
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    pub glossiness: f32,
    pub shininess: f32,
    pub ambient: Vector3<f32>,

    pub diffuse_texture: Option<Arc<Texture>>,
    pub normal_texture: Option<Arc<Texture>>,
    pub specular_texture: Option<Arc<Texture>>,
    pub glossiness_texture: Option<Arc<Texture>>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse_color: Vector3::repeat(0.8),
            specular_color: Vector3::repeat(1.0),
            glossiness: 1.0,
            shininess: DEFAULT_SHININESS,
            ambient: Vector3::repeat(DEFAULT_AMBIENT),
            diffuse_texture: None,
            normal_texture: None,
            specular_texture: None,
            glossiness_texture: None,
        }
    }
}

impl Material {
    pub fn diffuse(&self, uv: Vector2<f32>) -> Vector3<f32> {
        self.diffuse_texture
            .as_ref()
            .map_or(self.diffuse_color, |t| t.sample(uv))
    }

    pub fn specular(&self, uv: Vector2<f32>) -> Vector3<f32> {
        self.specular_texture
            .as_ref()
            .map_or(self.specular_color, |t| t.sample(uv))
    }

    pub fn glossiness(&self, uv: Vector2<f32>) -> f32 {
        self.glossiness_texture
            .as_ref()
            .map_or(self.glossiness, |t| t.sample(uv).x)
    }

    /// Tangent-space normal remapped from [0, 1] to [-1, 1], if a normal map is set.
    pub fn tangent_space_normal(&self, uv: Vector2<f32>) -> Option<Vector3<f32>> {
        self.normal_texture
            .as_ref()
            .map(|t| t.sample(uv) * 2.0 - Vector3::repeat(1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_are_used_without_textures() {
        let mat = Material::default();
        let uv = Vector2::new(0.3, 0.3);
        assert_eq!(mat.diffuse(uv), Vector3::repeat(0.8));
        assert_eq!(mat.specular(uv), Vector3::repeat(1.0));
        assert_eq!(mat.glossiness(uv), 1.0);
        assert!(mat.tangent_space_normal(uv).is_none());
    }

    #[test]
    fn textures_override_constants() {
        let mat = Material {
            glossiness_texture: Some(Arc::new(Texture::solid(Vector3::new(0.0, 1.0, 1.0)))),
            normal_texture: Some(Arc::new(Texture::solid(Vector3::new(0.5, 0.5, 1.0)))),
            ..Material::default()
        };
        let uv = Vector2::new(0.5, 0.5);

        assert_eq!(mat.glossiness(uv), 0.0);
        let n = mat.tangent_space_normal(uv).unwrap();
        assert!(n.x.abs() < 0.01 && n.y.abs() < 0.01);
        assert_eq!(n.z, 1.0);
    }
}
