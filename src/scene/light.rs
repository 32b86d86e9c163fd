use nalgebra::Vector3;

/// A light infinitely far away; every ray travels along `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector in the direction the light travels.
    pub direction: Vector3<f32>,
    pub intensity: f32,
}

impl DirectionalLight {
    /// Creates a light, normalizing `direction`.
    ///
    /// A zero direction falls back to the default light direction.
    pub fn new(direction: Vector3<f32>, intensity: f32) -> Self {
        let direction = direction
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(default_direction);
        Self {
            direction,
            intensity,
        }
    }

    /// Direction from a surface towards the light.
    pub fn direction_to_light(&self) -> Vector3<f32> {
        -self.direction
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: default_direction(),
            intensity: 7.0,
        }
    }
}

fn default_direction() -> Vector3<f32> {
    Vector3::new(0.577, -0.577, 0.577).normalize()
}
