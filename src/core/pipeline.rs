use nalgebra::{Vector2, Vector3};
use std::fmt;
use std::str::FromStr;

/// Surface attributes at one covered pixel, interpolated perspective-correctly.
///
/// `normal`, `tangent` and `view_direction` are re-normalized after
/// interpolation; `view_direction` points from the surface towards the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    pub uv: Vector2<f32>,
    pub normal: Vector3<f32>,
    pub tangent: Vector3<f32>,
    pub view_direction: Vector3<f32>,
}

/// Which lighting terms the shading model outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    /// Lambert cosine only, broadcast to gray.
    ObservedArea,
    /// Diffuse (Lambert) term.
    Diffuse,
    /// Phong specular term.
    Specular,
    /// Diffuse, specular and ambient together.
    #[default]
    Combined,
}

impl ShadingMode {
    /// The next mode in cycling order, wrapping after `Combined`.
    pub fn next(self) -> Self {
        match self {
            ShadingMode::ObservedArea => ShadingMode::Diffuse,
            ShadingMode::Diffuse => ShadingMode::Specular,
            ShadingMode::Specular => ShadingMode::Combined,
            ShadingMode::Combined => ShadingMode::ObservedArea,
        }
    }
}

impl fmt::Display for ShadingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShadingMode::ObservedArea => "observed_area",
            ShadingMode::Diffuse => "diffuse",
            ShadingMode::Specular => "specular",
            ShadingMode::Combined => "combined",
        };
        f.write_str(name)
    }
}

impl FromStr for ShadingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "observed_area" | "observedarea" | "lambert_cosine" => Ok(Self::ObservedArea),
            "diffuse" => Ok(Self::Diffuse),
            "specular" | "phong" => Ok(Self::Specular),
            "combined" => Ok(Self::Combined),
            other => Err(format!(
                "unknown shading mode '{other}' (expected observed_area, diffuse, specular or combined)"
            )),
        }
    }
}

/// Per-frame switches passed into every shading call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadingOptions {
    pub mode: ShadingMode,
    /// Replace the interpolated normal with the normal-map sample when available.
    pub normal_map: bool,
}

impl Default for ShadingOptions {
    fn default() -> Self {
        Self {
            mode: ShadingMode::Combined,
            normal_map: true,
        }
    }
}

/// The per-pixel shading stage.
///
/// Implementations must be thread-safe (Send + Sync) because the rasterizer
/// shades the rows of a triangle concurrently.
pub trait Shader: Send + Sync {
    /// Computes the linear RGB color of a covered pixel.
    ///
    /// Channels may exceed 1.0; the rasterizer clamps before packing.
    fn fragment(&self, fragment: &Fragment, options: ShadingOptions) -> Vector3<f32>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shading_mode_cycles_through_all_modes() {
        let mut mode = ShadingMode::ObservedArea;
        let mut seen = vec![mode];
        for _ in 0..3 {
            mode = mode.next();
            seen.push(mode);
        }
        assert_eq!(
            seen,
            vec![
                ShadingMode::ObservedArea,
                ShadingMode::Diffuse,
                ShadingMode::Specular,
                ShadingMode::Combined
            ]
        );
        assert_eq!(mode.next(), ShadingMode::ObservedArea);
    }

    #[test]
    fn shading_mode_parses_config_names() {
        assert_eq!("Combined".parse(), Ok(ShadingMode::Combined));
        assert_eq!("observed_area".parse(), Ok(ShadingMode::ObservedArea));
        assert_eq!("phong".parse(), Ok(ShadingMode::Specular));
        assert!("toon".parse::<ShadingMode>().is_err());
    }
}
