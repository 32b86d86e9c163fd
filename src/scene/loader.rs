use crate::io::config::{Config, MaterialConfig};
use crate::io::obj_loader::load_obj;
use crate::scene::animation::Animation;
use crate::scene::camera::{Camera, ProjectionKind};
use crate::scene::context::RenderContext;
use crate::scene::light::DirectionalLight;
use crate::scene::material::Material;
use crate::scene::mesh::Mesh;
use crate::scene::texture::Texture;
use log::{info, warn};
use nalgebra::{Point3, Vector3};
use std::sync::Arc;

/// Side length of the quad drawn when no mesh could be loaded.
const FALLBACK_QUAD_SIZE: f32 = 20.0;

pub fn build_camera(config: &Config) -> Camera {
    let cam = &config.camera;
    let position = Point3::from(cam.position);
    let target = Point3::from(cam.target);
    let up = Vector3::from(cam.up);
    let aspect_ratio = config.render.aspect_ratio();

    match cam.projection_kind() {
        ProjectionKind::Orthographic => Camera::new_orthographic(
            position,
            target,
            up,
            cam.ortho_height,
            aspect_ratio,
            cam.near,
            cam.far,
        ),
        ProjectionKind::Perspective => Camera::new_perspective(
            position,
            target,
            up,
            cam.fov.to_radians(),
            aspect_ratio,
            cam.near,
            cam.far,
        ),
    }
}

/// Builds the material, loading each configured texture.
///
/// A texture that fails to load is left out with a warning, so the matching
/// constant value is used instead. Empty paths mean "no texture".
pub fn build_material(config: &MaterialConfig) -> Material {
    let load = |slot: &str, path: &Option<String>| -> Option<Arc<Texture>> {
        let path = path.as_deref().filter(|p| !p.is_empty())?;
        match Texture::load(path) {
            Ok(tex) => Some(Arc::new(tex)),
            Err(e) => {
                warn!("{slot} texture unavailable, using constant: {e:#}");
                None
            }
        }
    };

    Material {
        diffuse_color: Vector3::from(config.diffuse_color),
        specular_color: Vector3::from(config.specular_color),
        glossiness: config.glossiness,
        shininess: config.shininess,
        ambient: Vector3::repeat(config.ambient),
        diffuse_texture: load("Diffuse", &config.diffuse_texture),
        normal_texture: load("Normal", &config.normal_texture),
        specular_texture: load("Specular", &config.specular_texture),
        glossiness_texture: load("Glossiness", &config.glossiness_texture),
    }
}

/// Loads every configured mesh, falling back to a test quad when none loads.
pub fn build_meshes(config: &Config) -> Vec<Mesh> {
    let mut meshes: Vec<Mesh> = config
        .meshes
        .iter()
        .filter_map(|mesh_conf| {
            load_obj(&mesh_conf.path, mesh_conf.topology(), mesh_conf.flip_handedness)
                .map_err(|e| warn!("Skipping mesh: {e:#}"))
                .ok()
        })
        .collect();

    if meshes.is_empty() {
        warn!("No mesh loaded, using the built-in test quad");
        meshes.push(Mesh::create_test_quad(FALLBACK_QUAD_SIZE));
    }

    meshes
}

pub fn build_animation(config: &Config) -> Animation {
    let anim = &config.animation;
    Animation {
        angle: anim.angle.to_radians(),
        rotation_speed: anim.rotation_speed,
        rotating: anim.rotating,
        translation: Vector3::from(anim.translation),
    }
}

/// Initial resource loading (heavy I/O). Never fails: missing resources are
/// replaced by built-in fallbacks.
pub fn init_scene_resources(config: &Config) -> RenderContext {
    let mut context = RenderContext {
        camera: build_camera(config),
        meshes: build_meshes(config),
        light: DirectionalLight::new(Vector3::from(config.light.direction), config.light.intensity),
        material: build_material(&config.material),
        animation: build_animation(config),
    };
    // Places the meshes at the starting angle.
    context.update(0.0);

    info!(
        "Scene initialized with {} meshes ({} triangles)",
        context.meshes.len(),
        context.meshes.iter().map(Mesh::triangle_count).sum::<usize>()
    );

    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::PrimitiveTopology;
    use crate::io::config::MeshConfig;

    fn offline_config() -> Config {
        let mut config = Config::default();
        config.meshes = vec![MeshConfig {
            path: "no/such/mesh.obj".to_string(),
            topology: "list".to_string(),
            flip_handedness: true,
        }];
        config.material.diffuse_texture = Some("no/such/diffuse.png".to_string());
        config.material.normal_texture = Some(String::new());
        config
    }

    #[test]
    fn missing_resources_fall_back() {
        let ctx = init_scene_resources(&offline_config());

        assert_eq!(ctx.meshes.len(), 1);
        assert_eq!(ctx.meshes[0].topology, PrimitiveTopology::TriangleStrip);
        assert!(ctx.material.diffuse_texture.is_none());
        assert!(ctx.material.normal_texture.is_none());
        assert_eq!(ctx.material.diffuse_color, Vector3::repeat(0.8));
    }

    #[test]
    fn meshes_start_at_configured_translation() {
        let ctx = init_scene_resources(&offline_config());
        let world = ctx.meshes[0].world_matrix;
        assert_eq!(world[(2, 3)], 50.0);
        assert_eq!(ctx.light.intensity, 7.0);
    }

    #[test]
    fn orthographic_projection_is_selected_by_name() {
        let mut config = offline_config();
        config.camera.projection = "orthographic".to_string();
        let cam = build_camera(&config);
        assert!(matches!(
            cam.projection_type,
            crate::scene::camera::ProjectionType::Orthographic { .. }
        ));
    }
}
