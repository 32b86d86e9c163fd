use crate::scene::animation::Animation;
use crate::scene::camera::Camera;
use crate::scene::light::DirectionalLight;
use crate::scene::material::Material;
use crate::scene::mesh::Mesh;

/// Holds all scene resources required for rendering.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub camera: Camera,
    pub meshes: Vec<Mesh>,
    pub light: DirectionalLight,
    pub material: Material,
    pub animation: Animation,
}

impl RenderContext {
    /// Advances the animation and rebuilds every mesh's world matrix.
    pub fn update(&mut self, dt: f32) {
        self.animation.update(dt);
        let world = self.animation.world_matrix();
        for mesh in &mut self.meshes {
            mesh.world_matrix = world;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_moves_meshes_to_animation_transform() {
        let mut ctx = RenderContext {
            camera: Camera::default(),
            meshes: vec![Mesh::create_test_triangle(), Mesh::create_test_quad(4.0)],
            light: DirectionalLight::default(),
            material: Material::default(),
            animation: Animation::default(),
        };

        ctx.update(0.25);

        let expected = ctx.animation.world_matrix();
        assert!(ctx.meshes.iter().all(|m| m.world_matrix == expected));
        assert_eq!(expected[(2, 3)], 50.0);
    }
}
