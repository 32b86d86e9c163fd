use crate::core::geometry::{PrimitiveTopology, ShadingVertex, Vertex};
use crate::core::transformer::transform_vertices_into;
use nalgebra::{Matrix4, Point3, Vector2, Vector3};

/// A collection of vertices and indices representing a 3D object.
///
/// The mesh owns its transformed vertices too; they are rebuilt every frame
/// into the same allocation.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// List of vertices in model space.
    pub vertices: Vec<Vertex>,
    /// Index buffer, grouped into triangles according to `topology`.
    pub indices: Vec<u32>,
    pub topology: PrimitiveTopology,
    /// Model to world transform.
    pub world_matrix: Matrix4<f32>,
    shading_vertices: Vec<ShadingVertex>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>, topology: PrimitiveTopology) -> Self {
        Self {
            vertices,
            indices,
            topology,
            world_matrix: Matrix4::identity(),
            shading_vertices: Vec::new(),
        }
    }

    /// Runs the vertex transformer for this frame's camera.
    pub fn update_shading_vertices(
        &mut self,
        view_projection: &Matrix4<f32>,
        camera_origin: &Point3<f32>,
    ) {
        transform_vertices_into(
            &self.vertices,
            &self.world_matrix,
            view_projection,
            camera_origin,
            &mut self.shading_vertices,
        );
    }

    /// Vertices produced by the last [`Mesh::update_shading_vertices`] call.
    pub fn shading_vertices(&self) -> &[ShadingVertex] {
        &self.shading_vertices
    }

    pub fn triangle_count(&self) -> usize {
        self.topology.triangles(&self.indices).count()
    }

    /// Creates a single triangle facing -Z (towards a camera at the origin).
    ///
    /// Vertices are ordered top, bottom-right, bottom-left: the winding the
    /// rasterizer accepts when seen from -Z.
    pub fn create_test_triangle() -> Self {
        let normal = Vector3::new(0.0, 0.0, -1.0);
        let tangent = Vector3::x();
        let vertices = vec![
            Vertex::new(Point3::new(0.0, 0.5, 0.0), Vector2::new(0.5, 0.0), normal, tangent),
            Vertex::new(Point3::new(0.5, -0.5, 0.0), Vector2::new(1.0, 1.0), normal, tangent),
            Vertex::new(Point3::new(-0.5, -0.5, 0.0), Vector2::new(0.0, 1.0), normal, tangent),
        ];

        Self::new(vertices, vec![0, 1, 2], PrimitiveTopology::TriangleList)
    }

    /// Creates a square of side `size` in the XY plane facing -Z, as a
    /// four-index triangle strip.
    pub fn create_test_quad(size: f32) -> Self {
        let h = size * 0.5;
        let normal = Vector3::new(0.0, 0.0, -1.0);
        let tangent = Vector3::x();
        let vertices = vec![
            Vertex::new(Point3::new(-h, h, 0.0), Vector2::new(0.0, 0.0), normal, tangent),
            Vertex::new(Point3::new(h, h, 0.0), Vector2::new(1.0, 0.0), normal, tangent),
            Vertex::new(Point3::new(-h, -h, 0.0), Vector2::new(0.0, 1.0), normal, tangent),
            Vertex::new(Point3::new(h, -h, 0.0), Vector2::new(1.0, 1.0), normal, tangent),
        ];

        Self::new(vertices, vec![0, 1, 2, 3], PrimitiveTopology::TriangleStrip)
    }
}
