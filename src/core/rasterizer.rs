use crate::core::bounding_box::BoundingBox;
use crate::core::color::{clamp_to_one, depth_to_grayscale, pack_rgb};
use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::{PrimitiveTopology, ShadingVertex};
use crate::core::math::interpolation::{
    barycentric_weights, interpolate_reciprocal, perspective_correct, triangle_area,
};
use crate::core::math::transform::{ndc_to_screen, normalize_or_zero};
use crate::core::pipeline::{Fragment, Shader, ShadingOptions};
use log::debug;
use nalgebra::Point2;
use rayon::prelude::*;
use std::fmt;
use std::ops::AddAssign;
use std::str::FromStr;

/// Which surfaces are discarded per pixel, based on the sign of
/// `dot(normal, direction_to_camera)`.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
pub enum CullMode {
    /// Discard pixels whose normal faces away from the camera.
    #[default]
    Back,
    /// Discard pixels whose normal faces the camera.
    Front,
    /// Keep both sides.
    None,
}

impl CullMode {
    pub fn next(self) -> Self {
        match self {
            CullMode::Back => CullMode::Front,
            CullMode::Front => CullMode::None,
            CullMode::None => CullMode::Back,
        }
    }

    /// Whether a pixel with the given facing value survives.
    ///
    /// A facing of exactly zero (or NaN) is indeterminate and never survives.
    #[inline]
    pub fn keeps(self, facing: f32) -> bool {
        match self {
            CullMode::Back => facing > 0.0,
            CullMode::Front => facing < 0.0,
            CullMode::None => facing > 0.0 || facing < 0.0,
        }
    }
}

impl fmt::Display for CullMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CullMode::Back => "back",
            CullMode::Front => "front",
            CullMode::None => "none",
        })
    }
}

impl FromStr for CullMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "back" => Ok(Self::Back),
            "front" => Ok(Self::Front),
            "none" | "off" => Ok(Self::None),
            other => Err(format!(
                "unknown cull mode '{other}' (expected back, front or none)"
            )),
        }
    }
}

/// What the rasterizer writes for a covered pixel.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
pub enum Visualization {
    /// Run the shader.
    #[default]
    Shaded,
    /// Fill each triangle's whole bounding box with white.
    BoundingBox,
    /// Gray levels from the non-linear depth.
    Depth,
}

/// Per-frame counters reported by the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Triangles resolved from the index buffers.
    pub triangles_submitted: usize,
    /// Triangles that passed every rejection test and reached the pixel loop.
    pub triangles_rasterized: usize,
    /// Pixels whose color was written.
    pub pixels_shaded: usize,
}

impl AddAssign for FrameStats {
    fn add_assign(&mut self, rhs: Self) {
        self.triangles_submitted += rhs.triangles_submitted;
        self.triangles_rasterized += rhs.triangles_rasterized;
        self.pixels_shaded += rhs.pixels_shaded;
    }
}

/// Scan-converts transformed triangles into a [`FrameBuffer`].
///
/// Triangles are drawn one after another in index order; the rows of each
/// triangle's bounding box are processed in parallel on disjoint slices of the
/// color and depth buffers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rasterizer {
    pub cull_mode: CullMode,
    pub visualization: Visualization,
    pub shading: ShadingOptions,
}

impl Rasterizer {
    pub fn new(cull_mode: CullMode, visualization: Visualization, shading: ShadingOptions) -> Self {
        Self {
            cull_mode,
            visualization,
            shading,
        }
    }

    pub fn set_cull_mode(&mut self, mode: CullMode) {
        self.cull_mode = mode;
    }

    /// Draws every triangle the topology resolves from `indices`.
    ///
    /// Triangles referencing a vertex outside `vertices` are skipped.
    pub fn draw_triangles<S: Shader + ?Sized>(
        &self,
        framebuffer: &mut FrameBuffer,
        vertices: &[ShadingVertex],
        indices: &[u32],
        topology: PrimitiveTopology,
        shader: &S,
    ) -> FrameStats {
        let mut stats = FrameStats::default();
        let mut out_of_range = 0usize;

        for [a, b, c] in topology.triangles(indices) {
            stats.triangles_submitted += 1;

            let (Some(va), Some(vb), Some(vc)) = (
                vertices.get(a as usize),
                vertices.get(b as usize),
                vertices.get(c as usize),
            ) else {
                out_of_range += 1;
                continue;
            };

            if let Some(pixels) = self.rasterize_triangle(framebuffer, [va, vb, vc], shader) {
                stats.triangles_rasterized += 1;
                stats.pixels_shaded += pixels;
            }
        }

        if out_of_range > 0 {
            debug!("Skipped {out_of_range} triangles with out-of-range indices");
        }

        stats
    }

    /// Rasterizes a single triangle of shading vertices.
    ///
    /// Returns `None` when the triangle is rejected before the pixel loop,
    /// otherwise the number of pixels written.
    pub fn rasterize_triangle<S: Shader + ?Sized>(
        &self,
        framebuffer: &mut FrameBuffer,
        triangle: [&ShadingVertex; 3],
        shader: &S,
    ) -> Option<usize> {
        if Self::is_rejected(&triangle) {
            return None;
        }

        let width = framebuffer.width;
        let height = framebuffer.height;
        let screen = triangle.map(|v| ndc_to_screen(v.position.x, v.position.y, width as f32, height as f32));

        let bounds = BoundingBox::around(&screen, width, height)?;

        if self.visualization == Visualization::BoundingBox {
            return Some(Self::fill_bounds(framebuffer, &bounds));
        }

        // Also catches NaN areas from extreme coordinates.
        let area = triangle_area(screen[0], screen[1], screen[2]);
        if !(area > f32::EPSILON) {
            return None;
        }

        let setup = TriangleSetup {
            screen,
            area,
            depth: triangle.map(|v| v.position.z),
            w: triangle.map(|v| v.position.w),
            vertices: triangle,
        };

        let shaded: usize = framebuffer
            .rows_mut(bounds.min_y, bounds.max_y)
            .map(|(y, (colors, depths))| {
                self.shade_row(&setup, y, bounds.min_x..bounds.max_x, colors, depths, shader)
            })
            .sum();

        Some(shaded)
    }

    /// Coarse rejection on post-divide coordinates: every x outside [-1, 1],
    /// every y outside [-1, 1], or any z outside [0, 1]. Non-finite positions
    /// are rejected too.
    fn is_rejected(triangle: &[&ShadingVertex; 3]) -> bool {
        if triangle.iter().any(|v| !v.position.iter().all(|c| c.is_finite())) {
            return true;
        }

        let outside = |c: f32| !(-1.0..=1.0).contains(&c);
        if triangle.iter().all(|v| outside(v.position.x)) {
            return true;
        }
        if triangle.iter().all(|v| outside(v.position.y)) {
            return true;
        }

        triangle
            .iter()
            .any(|v| !(0.0..=1.0).contains(&v.position.z))
    }

    fn fill_bounds(framebuffer: &mut FrameBuffer, bounds: &BoundingBox) -> usize {
        let white = pack_rgb(nalgebra::Vector3::repeat(1.0));
        framebuffer
            .rows_mut(bounds.min_y, bounds.max_y)
            .for_each(|(_, (colors, _))| colors[bounds.min_x..bounds.max_x].fill(white));
        bounds.area()
    }

    fn shade_row<S: Shader + ?Sized>(
        &self,
        setup: &TriangleSetup<'_>,
        y: usize,
        columns: std::ops::Range<usize>,
        colors: &mut [u32],
        depths: &mut [f32],
        shader: &S,
    ) -> usize {
        let [a, b, c] = setup.screen;
        let [va, vb, vc] = setup.vertices;
        let mut written = 0;

        for x in columns {
            let pixel = Point2::new(x as f32 + 0.5, y as f32 + 0.5);
            let Some(weights) = barycentric_weights(pixel, a, b, c, setup.area) else {
                continue;
            };

            let depth = interpolate_reciprocal(&weights, setup.depth);
            if !depth.is_finite() || depth > depths[x] {
                continue;
            }
            depths[x] = depth;

            let w_lerp = interpolate_reciprocal(&weights, setup.w);
            if !w_lerp.is_finite() {
                continue;
            }

            let normal = normalize_or_zero(perspective_correct(
                &weights,
                [va.normal, vb.normal, vc.normal],
                setup.w,
                w_lerp,
            ));
            let view_direction = normalize_or_zero(perspective_correct(
                &weights,
                [va.view_direction, vb.view_direction, vc.view_direction],
                setup.w,
                w_lerp,
            ));

            if !self.cull_mode.keeps(normal.dot(&view_direction)) {
                continue;
            }

            let color = match self.visualization {
                Visualization::Depth => depth_to_grayscale(depth),
                _ => {
                    let fragment = Fragment {
                        uv: perspective_correct(&weights, [va.uv, vb.uv, vc.uv], setup.w, w_lerp),
                        normal,
                        tangent: normalize_or_zero(perspective_correct(
                            &weights,
                            [va.tangent, vb.tangent, vc.tangent],
                            setup.w,
                            w_lerp,
                        )),
                        view_direction,
                    };
                    shader.fragment(&fragment, self.shading)
                }
            };

            colors[x] = pack_rgb(clamp_to_one(color));
            written += 1;
        }

        written
    }
}

/// Per-triangle values shared by every row of the pixel loop.
struct TriangleSetup<'a> {
    screen: [Point2<f32>; 3],
    area: f32,
    depth: [f32; 3],
    w: [f32; 3],
    vertices: [&'a ShadingVertex; 3],
}
