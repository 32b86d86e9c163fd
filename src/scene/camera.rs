use crate::core::math::transform::TransformFactory;
use nalgebra::{Matrix4, Point3, Vector3};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionType {
    Perspective { fov_y_rad: f32, aspect_ratio: f32 },
    Orthographic { height: f32, aspect_ratio: f32 },
}

/// Projection family selected in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionKind {
    #[default]
    Perspective,
    Orthographic,
}

impl FromStr for ProjectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "perspective" => Ok(Self::Perspective),
            "orthographic" | "ortho" => Ok(Self::Orthographic),
            other => Err(format!(
                "unknown projection '{other}' (expected perspective or orthographic)"
            )),
        }
    }
}

impl fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProjectionKind::Perspective => "perspective",
            ProjectionKind::Orthographic => "orthographic",
        })
    }
}

/// Left-handed camera producing the view and projection matrices consumed by
/// the vertex transformer.
#[derive(Debug, Clone)]
pub struct Camera {
    // --- Common Parameters ---
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub near: f32,
    pub far: f32,

    // --- Projection Specifics ---
    pub projection_type: ProjectionType,

    // --- Cached Matrices ---
    view_matrix: Matrix4<f32>,
    projection_matrix: Matrix4<f32>,
}

impl Default for Camera {
    /// At the origin looking down +Z with a 45° vertical field of view.
    fn default() -> Self {
        Self::new_perspective(
            Point3::origin(),
            Point3::new(0.0, 0.0, 1.0),
            Vector3::y(),
            45f32.to_radians(),
            640.0 / 480.0,
            0.1,
            100.0,
        )
    }
}

impl Camera {
    pub fn new_perspective(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov_y_rad: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let mut cam = Self {
            position,
            target,
            up,
            near,
            far,
            projection_type: ProjectionType::Perspective {
                fov_y_rad,
                aspect_ratio,
            },
            view_matrix: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
        };
        cam.update_matrices();
        cam
    }

    pub fn new_orthographic(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        height: f32, // View height
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let mut cam = Self {
            position,
            target,
            up,
            near,
            far,
            projection_type: ProjectionType::Orthographic {
                height,
                aspect_ratio,
            },
            view_matrix: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
        };
        cam.update_matrices();
        cam
    }

    /// Recalculates View and Projection matrices based on current parameters.
    pub fn update_matrices(&mut self) {
        self.view_matrix = TransformFactory::view(&self.position, &self.target, &self.up);

        self.projection_matrix = match self.projection_type {
            ProjectionType::Perspective {
                fov_y_rad,
                aspect_ratio,
            } => TransformFactory::perspective(aspect_ratio, fov_y_rad, self.near, self.far),

            ProjectionType::Orthographic {
                height,
                aspect_ratio,
            } => {
                let half_height = height / 2.0;
                let half_width = half_height * aspect_ratio;

                TransformFactory::orthographic(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    self.near,
                    self.far,
                )
            }
        };
    }

    pub fn set_aspect_ratio(&mut self, ratio: f32) {
        match &mut self.projection_type {
            ProjectionType::Perspective { aspect_ratio, .. }
            | ProjectionType::Orthographic { aspect_ratio, .. } => *aspect_ratio = ratio,
        }
        self.update_matrices();
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view_matrix
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix
    }

    /// `projection * view`, applied after the world matrix.
    pub fn view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix * self.view_matrix
    }

    pub fn origin(&self) -> Point3<f32> {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::transform::apply_perspective_division;
    use nalgebra::Vector4;

    #[test]
    fn default_camera_sees_point_ahead_in_center() {
        let cam = Camera::default();
        let clip = cam.view_projection_matrix() * Vector4::new(0.0, 0.0, 50.0, 1.0);
        let ndc = apply_perspective_division(&clip);

        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.995 && ndc.z < 1.0);
        assert!((ndc.w - 50.0).abs() < 1e-3);
    }

    #[test]
    fn aspect_ratio_change_rebuilds_projection() {
        let mut cam = Camera::default();
        let before = cam.projection_matrix();
        cam.set_aspect_ratio(2.0);
        assert_ne!(before, cam.projection_matrix());
        assert_eq!(before[(1, 1)], cam.projection_matrix()[(1, 1)]);
    }

    #[test]
    fn orthographic_keeps_unit_w() {
        let cam = Camera::new_orthographic(
            Point3::origin(),
            Point3::new(0.0, 0.0, 1.0),
            Vector3::y(),
            10.0,
            1.0,
            0.1,
            100.0,
        );
        let clip = cam.view_projection_matrix() * Vector4::new(5.0, 0.0, 50.0, 1.0);
        assert!((clip.w - 1.0).abs() < 1e-6);
        assert!((clip.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn projection_kind_parses() {
        assert_eq!("Ortho".parse(), Ok(ProjectionKind::Orthographic));
        assert!("fisheye".parse::<ProjectionKind>().is_err());
    }
}
