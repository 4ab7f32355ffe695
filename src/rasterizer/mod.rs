//! Scanline software rasterizer
//!
//! Triangles are sorted by screen Y, split at the middle vertex and walked
//! one row at a time with forward-differenced edges. Each row is filled
//! left to right with a per-pixel depth test against the distance from the
//! camera, an optional shader and a blend stage.
//!
//! Features:
//! - Configurable face culling (front, back, both)
//! - Six blend equations, unclamped until output
//! - Per-pixel shader hook that can skip the color or depth write
//! - Power-of-two textures with repeat and offset
//! - PNG dumps of the color and depth buffers

mod blend;
mod camera;
mod error;
mod framebuffer;
mod math;
mod mesh;
mod primitive;
mod render;
mod scanline;
mod settings;
mod shader;
mod span;
mod state;
mod texture;
mod types;

pub use blend::*;
pub use camera::*;
pub use error::*;
pub use framebuffer::*;
pub use math::*;
pub use mesh::*;
pub use primitive::*;
pub use render::*;
pub use scanline::{walk, Interpolants};
pub use settings::*;
pub use shader::*;
pub use state::*;
pub use texture::*;
pub use types::*;

/// Default framebuffer dimensions
pub const WIDTH: usize = 320;
pub const HEIGHT: usize = 240;
