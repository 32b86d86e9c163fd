use nalgebra::{Point2, Vector2, Vector3};
use std::ops::{Add, Mul};

/// 2D cross product (z component of the 3D cross product).
#[inline(always)]
pub fn cross_2d(a: Vector2<f32>, b: Vector2<f32>) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Signed area (doubled) of triangle ABC in screen space: `cross(AB, AC)`.
///
/// Positive for the winding the rasterizer accepts; zero for degenerate triangles.
#[inline]
pub fn triangle_area(a: Point2<f32>, b: Point2<f32>, c: Point2<f32>) -> f32 {
    cross_2d(b - a, c - a)
}

/// Edge function values of pixel `p` against the three directed edges AB, BC and CA.
///
/// Each value is the (doubled) signed area of the sub-triangle formed by the edge
/// and `p`, so the three always sum to [`triangle_area`].
#[inline]
pub fn edge_areas(
    p: Point2<f32>,
    a: Point2<f32>,
    b: Point2<f32>,
    c: Point2<f32>,
) -> Vector3<f32> {
    Vector3::new(
        cross_2d(b - a, p - a),
        cross_2d(c - b, p - b),
        cross_2d(a - c, p - c),
    )
}

/// Computes the barycentric weights (wA, wB, wC) of pixel `p` inside triangle ABC.
///
/// Returns `None` when `p` is outside (any edge area negative) or when the
/// triangle area is not a usable positive number. Each weight is the area of the
/// edge opposite its vertex divided by the total area.
#[inline]
pub fn barycentric_weights(
    p: Point2<f32>,
    a: Point2<f32>,
    b: Point2<f32>,
    c: Point2<f32>,
    area: f32,
) -> Option<Vector3<f32>> {
    if !(area > 0.0) {
        return None;
    }

    let edges = edge_areas(p, a, b, c);
    if edges.x < 0.0 || edges.y < 0.0 || edges.z < 0.0 {
        return None;
    }

    let inv_area = 1.0 / area;
    Some(Vector3::new(
        edges.y * inv_area, // BC, opposite A
        edges.z * inv_area, // CA, opposite B
        edges.x * inv_area, // AB, opposite C
    ))
}

/// Interpolates a per-vertex scalar in reciprocal space: `1 / Σ(wᵢ / vᵢ)`.
///
/// Used both for the non-linear depth (with NDC z) and for the perspective
/// correction factor (with the un-divided clip w).
#[inline]
pub fn interpolate_reciprocal(weights: &Vector3<f32>, values: [f32; 3]) -> f32 {
    1.0 / (weights.x / values[0] + weights.y / values[1] + weights.z / values[2])
}

/// Perspective-correct attribute interpolation.
///
/// Each vertex attribute is divided by its own clip w, blended with the screen
/// space weights and multiplied back by the interpolated w (`w_lerp`).
#[inline]
pub fn perspective_correct<T>(
    weights: &Vector3<f32>,
    attributes: [T; 3],
    w: [f32; 3],
    w_lerp: f32,
) -> T
where
    T: Copy + Add<Output = T> + Mul<f32, Output = T>,
{
    (attributes[0] * (weights.x / w[0])
        + attributes[1] * (weights.y / w[1])
        + attributes[2] * (weights.z / w[2]))
        * w_lerp
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const EPS: f32 = 1e-4;

    fn example_triangle() -> (Point2<f32>, Point2<f32>, Point2<f32>) {
        // Top, bottom-right, bottom-left in screen space (y down).
        (
            Point2::new(50.0, 25.0),
            Point2::new(75.0, 75.0),
            Point2::new(25.0, 75.0),
        )
    }

    #[test]
    fn edge_areas_sum_to_triangle_area() {
        let (a, b, c) = example_triangle();
        let area = triangle_area(a, b, c);
        let edges = edge_areas(Point2::new(50.5, 50.5), a, b, c);

        assert!((area - 2500.0).abs() < EPS);
        assert!((edges.x + edges.y + edges.z - area).abs() < EPS);
    }

    #[test]
    fn weights_at_vertices_select_that_vertex() {
        let (a, b, c) = example_triangle();
        let area = triangle_area(a, b, c);

        let wa = barycentric_weights(a, a, b, c, area).unwrap();
        let wb = barycentric_weights(b, a, b, c, area).unwrap();
        let wc = barycentric_weights(c, a, b, c, area).unwrap();

        assert!((wa - Vector3::new(1.0, 0.0, 0.0)).norm() < EPS);
        assert!((wb - Vector3::new(0.0, 1.0, 0.0)).norm() < EPS);
        assert!((wc - Vector3::new(0.0, 0.0, 1.0)).norm() < EPS);
    }

    #[test]
    fn outside_point_has_no_weights() {
        let (a, b, c) = example_triangle();
        let area = triangle_area(a, b, c);
        assert!(barycentric_weights(Point2::new(0.5, 0.5), a, b, c, area).is_none());
    }

    #[test]
    fn degenerate_triangle_has_no_weights() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(10.0, 10.0);
        let c = Point2::new(20.0, 20.0);
        let area = triangle_area(a, b, c);

        assert_eq!(area, 0.0);
        assert!(barycentric_weights(Point2::new(10.0, 10.0), a, b, c, area).is_none());
        assert!(barycentric_weights(Point2::new(10.0, 10.0), a, b, c, f32::NAN).is_none());
    }

    #[test]
    fn opposite_winding_never_covers_a_pixel() {
        let (a, b, c) = example_triangle();
        // Swapping two vertices flips the winding.
        let area = triangle_area(a, c, b);
        assert!(area < 0.0);
        assert!(barycentric_weights(Point2::new(50.5, 50.5), a, c, b, area).is_none());
    }

    #[test]
    fn weights_sum_to_one_for_random_covered_pixels() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut covered = 0;

        for _ in 0..200 {
            let mut pts: Vec<Point2<f32>> = (0..3)
                .map(|_| Point2::new(rng.random_range(0.0..64.0), rng.random_range(0.0..64.0)))
                .collect();
            if triangle_area(pts[0], pts[1], pts[2]) < 0.0 {
                pts.swap(1, 2);
            }
            let area = triangle_area(pts[0], pts[1], pts[2]);
            if area < 1.0 {
                continue;
            }

            for y in 0..64 {
                for x in 0..64 {
                    let p = Point2::new(x as f32 + 0.5, y as f32 + 0.5);
                    if let Some(w) = barycentric_weights(p, pts[0], pts[1], pts[2], area) {
                        covered += 1;
                        assert!((w.x + w.y + w.z - 1.0).abs() < EPS);
                        assert!(w.iter().all(|&v| v >= 0.0));
                    }
                }
            }
        }

        assert!(covered > 0);
    }

    #[test]
    fn reciprocal_interpolation_of_equal_values_is_that_value() {
        let weights = Vector3::new(0.2, 0.3, 0.5);
        let z = interpolate_reciprocal(&weights, [0.5, 0.5, 0.5]);
        assert!((z - 0.5).abs() < 1e-6);
    }

    #[test]
    fn perspective_correct_equals_affine_for_equal_w() {
        let weights = Vector3::new(0.25, 0.35, 0.4);
        let uvs = [
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(0.5, 1.0),
        ];

        for w in [0.5f32, 1.0, 7.0, 50.0] {
            let ws = [w, w, w];
            let w_lerp = interpolate_reciprocal(&weights, ws);
            let corrected = perspective_correct(&weights, uvs, ws, w_lerp);
            let affine = uvs[0] * weights.x + uvs[1] * weights.y + uvs[2] * weights.z;
            assert!((corrected - affine).norm() < 1e-5, "w = {w}");
        }
    }

    #[test]
    fn perspective_correct_favors_nearer_vertex() {
        // Halfway in screen space between a near (w=1) and far (w=9) vertex the
        // attribute leans towards the near one.
        let weights = Vector3::new(0.5, 0.5, 0.0);
        let ws = [1.0, 9.0, 1.0];
        let w_lerp = interpolate_reciprocal(&weights, ws);
        let value = perspective_correct(&weights, [0.0f32, 1.0, 0.0], ws, w_lerp);

        assert!((w_lerp - 1.8).abs() < EPS);
        assert!((value - 0.1).abs() < EPS);
    }
}
