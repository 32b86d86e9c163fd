use crate::core::math::transform::normalize_or_zero;
use crate::core::pipeline::{Fragment, Shader, ShadingMode, ShadingOptions};
use crate::scene::light::DirectionalLight;
use crate::scene::material::Material;
use nalgebra::Vector3;
use std::f32::consts::PI;

/// Lambert diffuse plus Phong specular under a single directional light.
///
/// Calculates Diffuse + Specular + Ambient, weighted by the observed area
/// (the cosine between surface normal and the light).
pub struct PhongShader {
    pub light: DirectionalLight,
    pub material: Material,
}

impl PhongShader {
    pub fn new(light: DirectionalLight, material: Material) -> Self {
        Self { light, material }
    }

    /// The normal used for lighting: the normal-map sample moved into world
    /// space through (tangent, normal x tangent, normal), or the interpolated
    /// normal when mapping is off or no normal map is set.
    fn surface_normal(&self, fragment: &Fragment, options: ShadingOptions) -> Vector3<f32> {
        if !options.normal_map {
            return fragment.normal;
        }

        match self.material.tangent_space_normal(fragment.uv) {
            Some(sampled) => {
                let bitangent = fragment.normal.cross(&fragment.tangent);
                normalize_or_zero(
                    fragment.tangent * sampled.x + bitangent * sampled.y + fragment.normal * sampled.z,
                )
            }
            None => fragment.normal,
        }
    }
}

impl Shader for PhongShader {
    fn fragment(&self, fragment: &Fragment, options: ShadingOptions) -> Vector3<f32> {
        let normal = self.surface_normal(fragment, options);
        let light_dir = self.light.direction;

        let observed_area = normal.dot(&-light_dir);
        // Facing away from the light: black, even for the specular-only mode.
        if observed_area < 0.0 {
            return Vector3::zeros();
        }

        let uv = fragment.uv;

        // Diffuse
        let lambert = self.material.diffuse(uv) * self.light.intensity / PI;

        // Specular
        let reflection = light_dir - normal * (2.0 * normal.dot(&light_dir));
        let exponent = self.material.glossiness(uv) * self.material.shininess;
        let spec = reflection
            .dot(&fragment.view_direction)
            .max(0.0)
            .powf(exponent);
        let phong = self.material.specular(uv) * spec;

        match options.mode {
            ShadingMode::ObservedArea => Vector3::repeat(observed_area),
            ShadingMode::Diffuse => lambert * observed_area,
            ShadingMode::Specular => phong,
            ShadingMode::Combined => (lambert + phong + self.material.ambient) * observed_area,
        }
    }
}
