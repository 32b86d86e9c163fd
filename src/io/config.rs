use crate::core::geometry::PrimitiveTopology;
use crate::core::pipeline::{ShadingMode, ShadingOptions};
use crate::core::rasterizer::CullMode;
use crate::pipeline::shaders::ShaderKind;
use crate::pipeline::state::RenderState;
use crate::scene::camera::ProjectionKind;
use anyhow::{Context, Result};
use log::warn;
use serde::Deserialize;
use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Scene file. Every section and field is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub light: LightConfig,
    #[serde(default)]
    pub material: MaterialConfig,
    #[serde(default = "default_meshes")]
    pub meshes: Vec<MeshConfig>,
    #[serde(default)]
    pub animation: AnimationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            camera: CameraConfig::default(),
            light: LightConfig::default(),
            material: MaterialConfig::default(),
            meshes: default_meshes(),
            animation: AnimationConfig::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Parses an enum-like config string, warning and using the default when the
/// value is not recognized.
pub fn parse_or_default<T>(value: &str, field: &str) -> T
where
    T: FromStr<Err = String> + Default + Display,
{
    value.parse().unwrap_or_else(|err| {
        let fallback = T::default();
        warn!("{field}: {err}; using '{fallback}'");
        fallback
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    // --- Output ---
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_frames")]
    pub frames: usize,
    /// Simulated seconds between frames, drives the animation.
    #[serde(default = "default_frame_time")]
    pub frame_time: f32,

    // --- Toggles ---
    #[serde(default = "default_shading")]
    pub shading: String, // "observed_area", "diffuse", "specular", "combined"
    #[serde(default = "default_cull_mode")]
    pub cull_mode: String, // "back", "front", "none"
    #[serde(default = "default_true")]
    pub normal_map: bool,
    #[serde(default)]
    pub depth_visualization: bool,
    #[serde(default)]
    pub bounding_box_visualization: bool,
    #[serde(default)]
    pub uniform_clear_color: bool,
    #[serde(default = "default_shader")]
    pub shader: String, // "phong", "unlit"
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            output: default_output(),
            frames: default_frames(),
            frame_time: default_frame_time(),
            shading: default_shading(),
            cull_mode: default_cull_mode(),
            normal_map: true,
            depth_visualization: false,
            bounding_box_visualization: false,
            uniform_clear_color: false,
            shader: default_shader(),
        }
    }
}

impl RenderConfig {
    /// Builds the toggle set, falling back to defaults for unknown names.
    pub fn render_state(&self) -> RenderState {
        RenderState {
            cull_mode: parse_or_default::<CullMode>(&self.cull_mode, "render.cull_mode"),
            shading: ShadingOptions {
                mode: parse_or_default::<ShadingMode>(&self.shading, "render.shading"),
                normal_map: self.normal_map,
            },
            depth_visualization: self.depth_visualization,
            bounding_box_visualization: self.bounding_box_visualization,
            uniform_clear_color: self.uniform_clear_color,
        }
    }

    pub fn shader_kind(&self) -> ShaderKind {
        parse_or_default(&self.shader, "render.shader")
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

fn default_width() -> usize {
    640
}
fn default_height() -> usize {
    480
}
fn default_output() -> String {
    "output.png".to_string()
}
fn default_frames() -> usize {
    1
}
fn default_frame_time() -> f32 {
    1.0 / 30.0
}
fn default_shading() -> String {
    "combined".to_string()
}
fn default_cull_mode() -> String {
    "back".to_string()
}
fn default_shader() -> String {
    "phong".to_string()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct CameraConfig {
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default = "default_target")]
    pub target: [f32; 3],
    #[serde(default = "default_up")]
    pub up: [f32; 3],
    /// Vertical field of view in degrees.
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_projection")]
    pub projection: String,
    #[serde(default = "default_ortho_height")]
    pub ortho_height: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            target: default_target(),
            up: default_up(),
            fov: default_fov(),
            projection: default_projection(),
            ortho_height: default_ortho_height(),
            near: default_near(),
            far: default_far(),
        }
    }
}

impl CameraConfig {
    pub fn projection_kind(&self) -> ProjectionKind {
        parse_or_default(&self.projection, "camera.projection")
    }
}

fn default_target() -> [f32; 3] {
    [0.0, 0.0, 1.0]
}
fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}
fn default_fov() -> f32 {
    45.0
}
fn default_projection() -> String {
    "perspective".to_string()
}
fn default_ortho_height() -> f32 {
    40.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    100.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct LightConfig {
    #[serde(default = "default_light_direction")]
    pub direction: [f32; 3],
    #[serde(default = "default_light_intensity")]
    pub intensity: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            direction: default_light_direction(),
            intensity: default_light_intensity(),
        }
    }
}

fn default_light_direction() -> [f32; 3] {
    [0.577, -0.577, 0.577]
}
fn default_light_intensity() -> f32 {
    7.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaterialConfig {
    // --- Material Textures ---
    #[serde(default = "default_diffuse_texture")]
    pub diffuse_texture: Option<String>,
    #[serde(default = "default_normal_texture")]
    pub normal_texture: Option<String>,
    #[serde(default = "default_specular_texture")]
    pub specular_texture: Option<String>,
    #[serde(default = "default_glossiness_texture")]
    pub glossiness_texture: Option<String>,

    // --- Fallback Values ---
    #[serde(default = "default_diffuse_color")]
    pub diffuse_color: [f32; 3],
    #[serde(default = "default_specular_color")]
    pub specular_color: [f32; 3],
    #[serde(default = "default_glossiness")]
    pub glossiness: f32,
    #[serde(default = "default_shininess")]
    pub shininess: f32,
    #[serde(default = "default_ambient")]
    pub ambient: f32,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            diffuse_texture: default_diffuse_texture(),
            normal_texture: default_normal_texture(),
            specular_texture: default_specular_texture(),
            glossiness_texture: default_glossiness_texture(),
            diffuse_color: default_diffuse_color(),
            specular_color: default_specular_color(),
            glossiness: default_glossiness(),
            shininess: default_shininess(),
            ambient: default_ambient(),
        }
    }
}

fn default_diffuse_texture() -> Option<String> {
    Some("resources/vehicle_diffuse.png".to_string())
}
fn default_normal_texture() -> Option<String> {
    Some("resources/vehicle_normal.png".to_string())
}
fn default_specular_texture() -> Option<String> {
    Some("resources/vehicle_specular.png".to_string())
}
fn default_glossiness_texture() -> Option<String> {
    Some("resources/vehicle_gloss.png".to_string())
}
fn default_diffuse_color() -> [f32; 3] {
    [0.8, 0.8, 0.8]
}
fn default_specular_color() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}
fn default_glossiness() -> f32 {
    1.0
}
fn default_shininess() -> f32 {
    25.0
}
fn default_ambient() -> f32 {
    0.025
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeshConfig {
    pub path: String,
    #[serde(default = "default_topology")]
    pub topology: String, // "list", "strip"
    /// Convert right-handed, counter-clockwise OBJ data to the left-handed
    /// convention: negate z and swap the winding.
    #[serde(default = "default_true")]
    pub flip_handedness: bool,
}

impl MeshConfig {
    pub fn topology(&self) -> PrimitiveTopology {
        parse_or_default(&self.topology, "meshes.topology")
    }
}

fn default_meshes() -> Vec<MeshConfig> {
    vec![MeshConfig {
        path: "resources/vehicle.obj".to_string(),
        topology: default_topology(),
        flip_handedness: true,
    }]
}
fn default_topology() -> String {
    "list".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnimationConfig {
    #[serde(default = "default_true")]
    pub rotating: bool,
    /// Radians per second around the Y axis.
    #[serde(default = "default_rotation_speed")]
    pub rotation_speed: f32,
    /// Starting angle in degrees.
    #[serde(default)]
    pub angle: f32,
    #[serde(default = "default_translation")]
    pub translation: [f32; 3],
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            rotating: true,
            rotation_speed: default_rotation_speed(),
            angle: 0.0,
            translation: default_translation(),
        }
    }
}

fn default_rotation_speed() -> f32 {
    0.8
}
fn default_translation() -> [f32; 3] {
    [0.0, 0.0, 50.0]
}
