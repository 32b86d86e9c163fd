//! A CPU software rasterizer.
//!
//! The whole pipeline a GPU would normally run for a textured, lit mesh is done
//! here on the CPU: vertex transform, coarse triangle rejection, scan conversion,
//! perspective-correct attribute interpolation, depth testing and per-pixel
//! Phong shading into a packed-pixel frame buffer.

pub mod app;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod scene;
