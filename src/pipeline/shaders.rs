use std::fmt;
use std::str::FromStr;

pub mod phong;
pub mod unlit;

/// Which fragment shader the renderer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShaderKind {
    /// [`phong::PhongShader`], the lit shading model.
    #[default]
    Phong,
    /// [`unlit::UnlitShader`], normals as colors.
    Unlit,
}

impl FromStr for ShaderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "phong" => Ok(Self::Phong),
            "unlit" | "normals" => Ok(Self::Unlit),
            other => Err(format!("unknown shader '{other}' (expected phong or unlit)")),
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderKind::Phong => "phong",
            ShaderKind::Unlit => "unlit",
        })
    }
}
