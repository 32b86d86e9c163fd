use crate::core::framebuffer::FrameBuffer;
use crate::core::pipeline::Shader;
use crate::core::rasterizer::{FrameStats, Rasterizer};
use crate::pipeline::state::RenderState;
use crate::scene::camera::Camera;
use crate::scene::mesh::Mesh;
use log::debug;
use std::time::Instant;

/// The high-level renderer that orchestrates the pipeline stages:
/// clear, vertex transform, rasterization.
pub struct Renderer {
    pub framebuffer: FrameBuffer,
    pub state: RenderState,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_state(width, height, RenderState::default())
    }

    pub fn with_state(width: usize, height: usize, state: RenderState) -> Self {
        Self {
            framebuffer: FrameBuffer::new(width, height),
            state,
        }
    }

    /// Fills the color buffer with the current clear color and resets depth.
    pub fn clear(&mut self) {
        self.framebuffer.clear(self.state.clear_color());
    }

    /// A rasterizer configured from the current toggles.
    pub fn rasterizer(&self) -> Rasterizer {
        Rasterizer::new(
            self.state.cull_mode(),
            self.state.visualization(),
            self.state.shading,
        )
    }

    /// Transforms a mesh for `camera` and rasterizes it on top of the current
    /// buffer contents.
    pub fn draw_mesh<S: Shader + ?Sized>(
        &mut self,
        mesh: &mut Mesh,
        camera: &Camera,
        shader: &S,
    ) -> FrameStats {
        mesh.update_shading_vertices(&camera.view_projection_matrix(), &camera.origin());

        self.rasterizer().draw_triangles(
            &mut self.framebuffer,
            mesh.shading_vertices(),
            &mesh.indices,
            mesh.topology,
            shader,
        )
    }

    /// Renders one complete frame: clear, then every mesh in order.
    pub fn render_frame<S: Shader + ?Sized>(
        &mut self,
        meshes: &mut [Mesh],
        camera: &Camera,
        shader: &S,
    ) -> FrameStats {
        let start = Instant::now();
        self.clear();

        let mut stats = FrameStats::default();
        for mesh in meshes.iter_mut() {
            stats += self.draw_mesh(mesh, camera, shader);
        }

        debug!(
            "Frame: {} triangles submitted, {} rasterized, {} pixels shaded in {:.2?}",
            stats.triangles_submitted,
            stats.triangles_rasterized,
            stats.pixels_shaded,
            start.elapsed()
        );

        stats
    }
}
