use nalgebra::{Matrix4, Point2, Point3, Vector3, Vector4};

//=================================
// Transform Matrix Factory
//=================================

/// Factory for the transformation matrices used by the pipeline.
///
/// All matrices use the column-vector convention (`M * p`) and a left-handed
/// coordinate system: +X right, +Y up, the camera looks down +Z, and the
/// projections map the visible depth range to NDC z in [0, 1].
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Creates a rotation matrix around the Y-axis.
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
           -s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a translation matrix.
    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, translation.x,
            0.0, 1.0, 0.0, translation.y,
            0.0, 0.0, 1.0, translation.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a non-uniform scaling matrix.
    pub fn scaling_nonuniform(scale: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            scale.x, 0.0,     0.0,     0.0,
            0.0,     scale.y, 0.0,     0.0,
            0.0,     0.0,     scale.z, 0.0,
            0.0,     0.0,     0.0,     1.0,
        )
    }

    /// Creates a View matrix (Look-At, Left-Handed).
    /// Transforms world space coordinates to camera space, camera looking down +Z.
    pub fn view(eye: &Point3<f32>, target: &Point3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
        let z_axis = (target - eye).normalize();
        let x_axis = up.cross(&z_axis).normalize();
        let y_axis = z_axis.cross(&x_axis);

        let rotation = Matrix4::new(
            x_axis.x, x_axis.y, x_axis.z, 0.0,
            y_axis.x, y_axis.y, y_axis.z, 0.0,
            z_axis.x, z_axis.y, z_axis.z, 0.0,
            0.0,      0.0,      0.0,      1.0,
        );

        rotation * Self::translation(&-eye.coords)
    }

    /// Creates a Perspective Projection matrix (Left-Handed).
    /// Maps the view frustum to NDC x,y in [-1, 1] and z in [0, 1]; clip w is view-space z.
    pub fn perspective(aspect_ratio: f32, fov_y_rad: f32, near: f32, far: f32) -> Matrix4<f32> {
        let f = 1.0 / (fov_y_rad / 2.0).tan();
        let range = far / (far - near);

        Matrix4::new(
            f / aspect_ratio, 0.0, 0.0,   0.0,
            0.0,              f,   0.0,   0.0,
            0.0,              0.0, range, -near * range,
            0.0,              0.0, 1.0,   0.0,
        )
    }

    /// Creates an Orthographic Projection matrix (Left-Handed, depth in [0, 1]).
    pub fn orthographic(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Matrix4<f32> {
        let rl = 1.0 / (right - left);
        let tb = 1.0 / (top - bottom);
        let inv_depth = 1.0 / (far - near);

        Matrix4::new(
            2.0 * rl, 0.0,      0.0, -(right + left) * rl,
            0.0,      2.0 * tb, 0.0, -(top + bottom) * tb,
            0.0,      0.0,      inv_depth, -near * inv_depth,
            0.0,      0.0,      0.0, 1.0,
        )
    }
}

//=================================
// Core Transformation Functions
//=================================

/// Performs the perspective divide on x, y and z, keeping the original w.
///
/// The raw w is what perspective-correct interpolation divides by later, so it
/// is carried through untouched.
#[inline]
pub fn apply_perspective_division(clip: &Vector4<f32>) -> Vector4<f32> {
    let w = clip.w;
    Vector4::new(clip.x / w, clip.y / w, clip.z / w, w)
}

/// Converts NDC coordinates to Screen coordinates (Viewport Transform).
/// Note: Y-axis is flipped (NDC +Y is up, Screen +Y is down).
#[inline]
pub fn ndc_to_screen(ndc_x: f32, ndc_y: f32, width: f32, height: f32) -> Point2<f32> {
    Point2::new(
        (ndc_x + 1.0) * 0.5 * width,
        (1.0 - ndc_y) * 0.5 * height,
    )
}

/// Normalizes a direction, mapping zero-length input to the zero vector instead of NaN.
#[inline]
pub fn normalize_or_zero(v: Vector3<f32>) -> Vector3<f32> {
    v.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn ndc_corners_map_to_screen_corners() {
        let top_left = ndc_to_screen(-1.0, 1.0, 640.0, 480.0);
        let bottom_right = ndc_to_screen(1.0, -1.0, 640.0, 480.0);
        let center = ndc_to_screen(0.0, 0.0, 640.0, 480.0);

        assert!((top_left - Point2::new(0.0, 0.0)).norm() < EPS);
        assert!((bottom_right - Point2::new(640.0, 480.0)).norm() < EPS);
        assert!((center - Point2::new(320.0, 240.0)).norm() < EPS);
    }

    #[test]
    fn perspective_maps_near_and_far_to_unit_depth_range() {
        let proj = TransformFactory::perspective(1.0, 45f32.to_radians(), 0.1, 100.0);

        let near = apply_perspective_division(&(proj * Vector4::new(0.0, 0.0, 0.1, 1.0)));
        let far = apply_perspective_division(&(proj * Vector4::new(0.0, 0.0, 100.0, 1.0)));

        assert!(near.z.abs() < EPS);
        assert!((far.z - 1.0).abs() < EPS);
        // w keeps the view-space depth
        assert!((near.w - 0.1).abs() < EPS);
        assert!((far.w - 100.0).abs() < 1e-3);
    }

    #[test]
    fn orthographic_maps_depth_linearly() {
        let proj = TransformFactory::orthographic(-1.0, 1.0, -1.0, 1.0, 1.0, 3.0);
        let mid = proj * Vector4::new(0.5, -0.5, 2.0, 1.0);

        assert!((mid.z - 0.5).abs() < EPS);
        assert!((mid.x - 0.5).abs() < EPS);
        assert!((mid.y + 0.5).abs() < EPS);
        assert!((mid.w - 1.0).abs() < EPS);
    }

    #[test]
    fn view_looking_down_z_is_identity_at_origin() {
        let view = TransformFactory::view(
            &Point3::origin(),
            &Point3::new(0.0, 0.0, 1.0),
            &Vector3::y(),
        );
        assert!((view - Matrix4::identity()).norm() < EPS);
    }

    #[test]
    fn view_moves_eye_to_origin() {
        let eye = Point3::new(3.0, 2.0, -5.0);
        let view = TransformFactory::view(&eye, &Point3::new(3.0, 2.0, 0.0), &Vector3::y());
        let p = view * eye.to_homogeneous();
        assert!(p.xyz().norm() < EPS);
    }

    #[test]
    fn perspective_division_keeps_w() {
        let v = apply_perspective_division(&Vector4::new(2.0, 4.0, 1.0, 4.0));
        assert_eq!(v, Vector4::new(0.5, 1.0, 0.25, 4.0));
    }

    #[test]
    fn normalize_or_zero_handles_zero_vector() {
        assert_eq!(normalize_or_zero(Vector3::zeros()), Vector3::zeros());
        let n = normalize_or_zero(Vector3::new(0.0, 3.0, 4.0));
        assert!((n.norm() - 1.0).abs() < EPS);
    }
}
