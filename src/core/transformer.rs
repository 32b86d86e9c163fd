use crate::core::geometry::{ShadingVertex, Vertex};
use crate::core::math::transform::{apply_perspective_division, normalize_or_zero};
use nalgebra::{Matrix4, Point3};
use rayon::prelude::*;

/// Transforms model-space vertices into shading vertices.
///
/// Positions go through `view_projection * world` and the perspective divide
/// (w kept raw). Normals and tangents are transformed as directions by the
/// world matrix and re-normalized, since the world matrix may scale
/// non-uniformly. The view direction is `camera_origin - world_position`, left
/// un-normalized for the rasterizer to interpolate.
pub fn transform_vertices(
    vertices: &[Vertex],
    world: &Matrix4<f32>,
    view_projection: &Matrix4<f32>,
    camera_origin: &Point3<f32>,
) -> Vec<ShadingVertex> {
    let mut out = Vec::with_capacity(vertices.len());
    transform_vertices_into(vertices, world, view_projection, camera_origin, &mut out);
    out
}

/// Same as [`transform_vertices`], reusing `out`'s allocation.
pub fn transform_vertices_into(
    vertices: &[Vertex],
    world: &Matrix4<f32>,
    view_projection: &Matrix4<f32>,
    camera_origin: &Point3<f32>,
    out: &mut Vec<ShadingVertex>,
) {
    let world_view_projection = view_projection * world;
    let world_linear = world.fixed_view::<3, 3>(0, 0).into_owned();

    vertices
        .par_iter()
        .map(|vertex| {
            let clip = world_view_projection * vertex.position.to_homogeneous();
            let world_position = world.transform_point(&vertex.position);

            ShadingVertex {
                position: apply_perspective_division(&clip),
                uv: vertex.texcoord,
                normal: normalize_or_zero(world_linear * vertex.normal),
                tangent: normalize_or_zero(world_linear * vertex.tangent),
                view_direction: camera_origin - world_position,
                ..ShadingVertex::default()
            }
        })
        .collect_into_vec(out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::transform::TransformFactory;
    use nalgebra::{Vector2, Vector3};

    const EPS: f32 = 1e-5;

    fn vertex(x: f32, y: f32, z: f32) -> Vertex {
        Vertex::new(
            Point3::new(x, y, z),
            Vector2::new(0.25, 0.75),
            Vector3::new(1.0, 1.0, 0.0).normalize(),
            Vector3::new(1.0, -1.0, 0.0).normalize(),
        )
    }

    #[test]
    fn identity_transform_keeps_ndc_and_unit_w() {
        let out = transform_vertices(
            &[vertex(0.5, -0.5, 0.25)],
            &Matrix4::identity(),
            &Matrix4::identity(),
            &Point3::origin(),
        );

        assert_eq!(out.len(), 1);
        assert!((out[0].position - nalgebra::Vector4::new(0.5, -0.5, 0.25, 1.0)).norm() < EPS);
        assert_eq!(out[0].uv, Vector2::new(0.25, 0.75));
        assert_eq!(out[0].color, Vector3::zeros());
    }

    #[test]
    fn perspective_divide_keeps_raw_w() {
        let proj = TransformFactory::perspective(1.0, 90f32.to_radians(), 1.0, 10.0);
        let out = transform_vertices(
            &[vertex(2.0, 1.0, 4.0)],
            &Matrix4::identity(),
            &proj,
            &Point3::origin(),
        );
        let p = out[0].position;

        assert!((p.w - 4.0).abs() < EPS);
        assert!((p.x - 0.5).abs() < EPS);
        assert!((p.y - 0.25).abs() < EPS);
        assert!(p.z > 0.0 && p.z < 1.0);
    }

    #[test]
    fn directions_are_renormalized_under_nonuniform_scale() {
        let world = TransformFactory::translation(&Vector3::new(0.0, 0.0, 10.0))
            * TransformFactory::scaling_nonuniform(&Vector3::new(4.0, 1.0, 1.0));
        let out = transform_vertices(
            &[vertex(1.0, 0.0, 0.0)],
            &world,
            &Matrix4::identity(),
            &Point3::origin(),
        );

        assert!((out[0].normal.norm() - 1.0).abs() < EPS);
        assert!((out[0].tangent.norm() - 1.0).abs() < EPS);
        // Scaling x by 4 tilts the 45° normal towards +x.
        assert!(out[0].normal.x > out[0].normal.y);
    }

    #[test]
    fn directions_ignore_translation() {
        let world = TransformFactory::translation(&Vector3::new(5.0, -3.0, 50.0));
        let v = vertex(0.0, 0.0, 0.0);
        let out = transform_vertices(&[v], &world, &Matrix4::identity(), &Point3::origin());

        assert!((out[0].normal - v.normal).norm() < EPS);
        assert!((out[0].tangent - v.tangent).norm() < EPS);
    }

    #[test]
    fn view_direction_points_from_vertex_to_camera_unnormalized() {
        let world = TransformFactory::translation(&Vector3::new(0.0, 0.0, 50.0));
        let camera = Point3::new(0.0, 2.0, 0.0);
        let out = transform_vertices(&[vertex(1.0, 0.0, 0.0)], &world, &Matrix4::identity(), &camera);

        assert!((out[0].view_direction - Vector3::new(-1.0, 2.0, -50.0)).norm() < EPS);
    }

    #[test]
    fn output_reuses_buffer_and_matches_input_length() {
        let mut out = vec![ShadingVertex::default(); 8];
        let verts = [vertex(0.0, 0.0, 1.0), vertex(1.0, 0.0, 1.0), vertex(0.0, 1.0, 1.0)];
        transform_vertices_into(&verts, &Matrix4::identity(), &Matrix4::identity(), &Point3::origin(), &mut out);
        assert_eq!(out.len(), 3);
    }
}
