use crate::core::pipeline::{ShadingMode, ShadingOptions};
use crate::core::rasterizer::{CullMode, Visualization};
use log::info;
use nalgebra::Vector3;

/// Gray used to clear the frame buffer.
pub const DEFAULT_CLEAR_COLOR: f32 = 0.39;
/// Gray used instead when the uniform clear color is enabled.
pub const UNIFORM_CLEAR_COLOR: f32 = 0.1;

/// The toggle set the renderer reads every frame.
///
/// Every toggle and cycle logs its new value so the console doubles as the
/// status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderState {
    pub cull_mode: CullMode,
    pub shading: ShadingOptions,
    pub depth_visualization: bool,
    pub bounding_box_visualization: bool,
    pub uniform_clear_color: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            cull_mode: CullMode::Back,
            shading: ShadingOptions::default(),
            depth_visualization: false,
            bounding_box_visualization: false,
            uniform_clear_color: false,
        }
    }
}

impl RenderState {
    pub fn cycle_cull_mode(&mut self) {
        self.cull_mode = self.cull_mode.next();
        info!("Cull mode: {}", self.cull_mode);
    }

    pub fn cycle_shading_mode(&mut self) {
        self.shading.mode = self.shading.mode.next();
        info!("Shading mode: {}", self.shading.mode);
    }

    pub fn toggle_normal_map(&mut self) {
        self.shading.normal_map = !self.shading.normal_map;
        info!("Normal map: {}", on_off(self.shading.normal_map));
    }

    pub fn toggle_depth_visualization(&mut self) {
        self.depth_visualization = !self.depth_visualization;
        info!("Depth visualization: {}", on_off(self.depth_visualization));
    }

    pub fn toggle_bounding_box_visualization(&mut self) {
        self.bounding_box_visualization = !self.bounding_box_visualization;
        info!(
            "Bounding box visualization: {}",
            on_off(self.bounding_box_visualization)
        );
    }

    pub fn toggle_uniform_clear_color(&mut self) {
        self.uniform_clear_color = !self.uniform_clear_color;
        info!("Uniform clear color: {}", on_off(self.uniform_clear_color));
    }

    pub fn cull_mode(&self) -> CullMode {
        self.cull_mode
    }

    pub fn shading_mode(&self) -> ShadingMode {
        self.shading.mode
    }

    /// Bounding-box fill wins over depth when both toggles are on.
    pub fn visualization(&self) -> Visualization {
        if self.bounding_box_visualization {
            Visualization::BoundingBox
        } else if self.depth_visualization {
            Visualization::Depth
        } else {
            Visualization::Shaded
        }
    }

    pub fn clear_color(&self) -> Vector3<f32> {
        if self.uniform_clear_color {
            Vector3::repeat(UNIFORM_CLEAR_COLOR)
        } else {
            Vector3::repeat(DEFAULT_CLEAR_COLOR)
        }
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}
