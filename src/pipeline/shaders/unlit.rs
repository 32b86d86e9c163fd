use crate::core::pipeline::{Fragment, Shader, ShadingOptions};
use nalgebra::Vector3;

/// A simple shader that visualizes world-space normals as colors.
/// Useful for debugging geometry, winding and the interpolation stage.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnlitShader;

impl Shader for UnlitShader {
    fn fragment(&self, fragment: &Fragment, _options: ShadingOptions) -> Vector3<f32> {
        // Map normal from [-1, 1] to [0, 1] for visualization.
        (fragment.normal + Vector3::repeat(1.0)) * 0.5
    }
}
