use crate::core::math::transform::TransformFactory;
use log::info;
use nalgebra::{Matrix4, Vector3};
use std::f32::consts::TAU;

/// Spin around the Y axis followed by a fixed translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    /// Current angle in radians, kept in [0, 2π).
    pub angle: f32,
    /// Radians per second.
    pub rotation_speed: f32,
    pub rotating: bool,
    pub translation: Vector3<f32>,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            angle: 0.0,
            rotation_speed: 0.8,
            rotating: true,
            translation: Vector3::new(0.0, 0.0, 50.0),
        }
    }
}

impl Animation {
    /// Advances the angle by `dt` seconds when rotating.
    pub fn update(&mut self, dt: f32) {
        if self.rotating {
            self.angle = (self.angle + self.rotation_speed * dt).rem_euclid(TAU);
        }
    }

    pub fn toggle_rotation(&mut self) {
        self.rotating = !self.rotating;
        info!("Rotation: {}", if self.rotating { "on" } else { "off" });
    }

    /// `translation * rotation_y(angle)`.
    pub fn world_matrix(&self) -> Matrix4<f32> {
        TransformFactory::translation(&self.translation) * TransformFactory::rotation_y(self.angle)
    }
}
