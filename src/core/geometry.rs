use nalgebra::{Point3, Vector2, Vector3, Vector4};
use std::fmt;
use std::str::FromStr;

/// Represents a single vertex in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in local object space.
    pub position: Point3<f32>,
    /// Texture coordinates (UV) in [0, 1]².
    pub texcoord: Vector2<f32>,
    /// Unit normal in object space.
    pub normal: Vector3<f32>,
    /// Unit tangent in object space, used to build the normal-mapping basis.
    pub tangent: Vector3<f32>,
}

impl Vertex {
    pub fn new(
        position: Point3<f32>,
        texcoord: Vector2<f32>,
        normal: Vector3<f32>,
        tangent: Vector3<f32>,
    ) -> Self {
        Self {
            position,
            texcoord,
            normal,
            tangent,
        }
    }
}

/// A vertex after the transform stage, ready for rasterization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingVertex {
    /// NDC x, y, z after the perspective divide; w is the un-divided clip w.
    pub position: Vector4<f32>,
    /// Per-vertex color slot; the transformer leaves it black.
    pub color: Vector3<f32>,
    pub uv: Vector2<f32>,
    /// World-space unit normal.
    pub normal: Vector3<f32>,
    /// World-space unit tangent.
    pub tangent: Vector3<f32>,
    /// Camera origin minus world position, not normalized.
    pub view_direction: Vector3<f32>,
}

impl Default for ShadingVertex {
    fn default() -> Self {
        Self {
            position: Vector4::new(0.0, 0.0, 0.0, 1.0),
            color: Vector3::zeros(),
            uv: Vector2::zeros(),
            normal: Vector3::zeros(),
            tangent: Vector3::zeros(),
            view_direction: Vector3::zeros(),
        }
    }
}

/// How an index buffer is grouped into triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveTopology {
    /// Every three indices form an independent triangle.
    #[default]
    TriangleList,
    /// Each index after the second forms a triangle with the previous two.
    TriangleStrip,
}

impl PrimitiveTopology {
    /// Resolves an index buffer into triangles.
    ///
    /// Strips flip the second and third index of every odd triangle so all
    /// triangles keep the same winding, and drop triangles with repeated indices
    /// (the degenerate joins used to stitch strips together).
    pub fn triangles(self, indices: &[u32]) -> impl Iterator<Item = [u32; 3]> + '_ {
        let step = match self {
            PrimitiveTopology::TriangleList => 3,
            PrimitiveTopology::TriangleStrip => 1,
        };

        (0..indices.len().saturating_sub(2))
            .step_by(step)
            .filter_map(move |i| {
                let a = indices[i];
                let mut b = indices[i + 1];
                let mut c = indices[i + 2];

                if self == PrimitiveTopology::TriangleStrip {
                    if i % 2 == 1 {
                        std::mem::swap(&mut b, &mut c);
                    }
                    if a == b || b == c || c == a {
                        return None;
                    }
                }

                Some([a, b, c])
            })
    }
}

impl FromStr for PrimitiveTopology {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "list" | "triangle_list" => Ok(Self::TriangleList),
            "strip" | "triangle_strip" => Ok(Self::TriangleStrip),
            other => Err(format!("unknown topology '{other}' (expected list or strip)")),
        }
    }
}

impl fmt::Display for PrimitiveTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PrimitiveTopology::TriangleList => "list",
            PrimitiveTopology::TriangleStrip => "strip",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_steps_three_indices_at_a_time() {
        let indices = [0, 1, 2, 2, 1, 3, 9];
        let tris: Vec<_> = PrimitiveTopology::TriangleList.triangles(&indices).collect();
        assert_eq!(tris, vec![[0, 1, 2], [2, 1, 3]]);
    }

    #[test]
    fn strip_swaps_odd_triangles() {
        let indices = [0, 1, 2, 3, 4];
        let tris: Vec<_> = PrimitiveTopology::TriangleStrip.triangles(&indices).collect();
        assert_eq!(tris, vec![[0, 1, 2], [1, 3, 2], [2, 3, 4]]);
    }

    #[test]
    fn strip_skips_degenerate_joins() {
        // Two strips stitched with repeated indices 3 and 4.
        let indices = [0, 1, 2, 3, 3, 4, 4, 5, 6, 7];
        let tris: Vec<_> = PrimitiveTopology::TriangleStrip.triangles(&indices).collect();

        assert!(tris.iter().all(|[a, b, c]| a != b && b != c && c != a));
        assert_eq!(tris.first(), Some(&[0, 1, 2]));
        assert_eq!(tris.len(), 4);
    }

    #[test]
    fn short_index_buffers_yield_nothing() {
        assert_eq!(PrimitiveTopology::TriangleList.triangles(&[0, 1]).count(), 0);
        assert_eq!(PrimitiveTopology::TriangleStrip.triangles(&[]).count(), 0);
    }

    #[test]
    fn topology_parses_from_config_strings() {
        assert_eq!("strip".parse(), Ok(PrimitiveTopology::TriangleStrip));
        assert_eq!(
            "Triangle_List".parse(),
            Ok(PrimitiveTopology::TriangleList)
        );
        assert!("fan".parse::<PrimitiveTopology>().is_err());
    }
}
