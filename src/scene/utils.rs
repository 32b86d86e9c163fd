use crate::core::geometry::{PrimitiveTopology, Vertex};
use crate::core::math::transform::normalize_or_zero;
use nalgebra::Vector3;

/// Replaces every vertex normal with the area-weighted average of the face
/// normals of the triangles that use it.
///
/// Face normals are `cross(b - a, c - a)`, so they follow the triangle's
/// winding. Vertices no triangle references keep a zero normal.
pub fn compute_smooth_normals(vertices: &mut [Vertex], indices: &[u32], topology: PrimitiveTopology) {
    let mut accumulated = vec![Vector3::zeros(); vertices.len()];

    for tri in topology.triangles(indices) {
        let [a, b, c] = tri.map(|i| i as usize);
        if a >= vertices.len() || b >= vertices.len() || c >= vertices.len() {
            continue;
        }

        let pa = vertices[a].position;
        // Unnormalized: longer cross products weigh in more.
        let face = (vertices[b].position - pa).cross(&(vertices[c].position - pa));
        for i in [a, b, c] {
            accumulated[i] += face;
        }
    }

    for (vertex, normal) in vertices.iter_mut().zip(accumulated) {
        vertex.normal = normalize_or_zero(normal);
    }
}

/// Generates per-vertex tangents from UV deltas.
///
/// Each triangle contributes the direction of increasing u; the sum per vertex
/// is orthogonalized against the vertex normal and normalized. Vertices whose
/// UVs give no usable direction get an arbitrary unit vector perpendicular to
/// the normal.
pub fn compute_tangents(vertices: &mut [Vertex], indices: &[u32], topology: PrimitiveTopology) {
    let mut accumulated = vec![Vector3::zeros(); vertices.len()];

    for tri in topology.triangles(indices) {
        let [a, b, c] = tri.map(|i| i as usize);
        if a >= vertices.len() || b >= vertices.len() || c >= vertices.len() {
            continue;
        }

        let (v0, v1, v2) = (&vertices[a], &vertices[b], &vertices[c]);
        let edge0 = v1.position - v0.position;
        let edge1 = v2.position - v0.position;
        let diff_x = (v1.texcoord.x - v0.texcoord.x, v2.texcoord.x - v0.texcoord.x);
        let diff_y = (v1.texcoord.y - v0.texcoord.y, v2.texcoord.y - v0.texcoord.y);

        let r = 1.0 / (diff_x.0 * diff_y.1 - diff_y.0 * diff_x.1);
        if !r.is_finite() {
            continue;
        }

        let tangent = (edge0 * diff_y.1 - edge1 * diff_y.0) * r;
        for i in [a, b, c] {
            accumulated[i] += tangent;
        }
    }

    for (vertex, tangent) in vertices.iter_mut().zip(accumulated) {
        let n = vertex.normal;
        let orthogonal = normalize_or_zero(tangent - n * n.dot(&tangent));
        vertex.tangent = if orthogonal == Vector3::zeros() {
            any_perpendicular(&n)
        } else {
            orthogonal
        };
    }
}

fn any_perpendicular(n: &Vector3<f32>) -> Vector3<f32> {
    let helper = if n.x.abs() < 0.9 { Vector3::x() } else { Vector3::y() };
    normalize_or_zero(helper - n * n.dot(&helper))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector2};

    fn quad() -> (Vec<Vertex>, Vec<u32>) {
        let v = |x: f32, y: f32, u: f32, w: f32| {
            Vertex::new(Point3::new(x, y, 0.0), Vector2::new(u, w), Vector3::zeros(), Vector3::zeros())
        };
        (
            vec![v(-1.0, 1.0, 0.0, 0.0), v(1.0, 1.0, 1.0, 0.0), v(-1.0, -1.0, 0.0, 1.0), v(1.0, -1.0, 1.0, 1.0)],
            vec![0, 1, 2, 2, 1, 3],
        )
    }

    #[test]
    fn smooth_normals_follow_winding() {
        let (mut verts, indices) = quad();
        compute_smooth_normals(&mut verts, &indices, PrimitiveTopology::TriangleList);
        for v in &verts {
            assert!((v.normal - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-6);
        }
    }

    #[test]
    fn tangents_point_along_increasing_u() {
        let (mut verts, indices) = quad();
        compute_smooth_normals(&mut verts, &indices, PrimitiveTopology::TriangleList);
        compute_tangents(&mut verts, &indices, PrimitiveTopology::TriangleList);

        for v in &verts {
            assert!((v.tangent - Vector3::x()).norm() < 1e-5, "{:?}", v.tangent);
            assert!(v.tangent.dot(&v.normal).abs() < 1e-6);
        }
    }

    #[test]
    fn degenerate_uvs_still_give_perpendicular_tangent() {
        let (mut verts, indices) = quad();
        for v in &mut verts {
            v.texcoord = Vector2::zeros();
        }
        compute_smooth_normals(&mut verts, &indices, PrimitiveTopology::TriangleList);
        compute_tangents(&mut verts, &indices, PrimitiveTopology::TriangleList);

        for v in &verts {
            assert!((v.tangent.norm() - 1.0).abs() < 1e-5);
            assert!(v.tangent.dot(&v.normal).abs() < 1e-6);
        }
    }
}
