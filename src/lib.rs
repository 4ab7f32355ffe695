//! Scanline: a CPU triangle rasterizer with depth testing, face culling,
//! blending and per-pixel shaders.

pub mod rasterizer;

pub use rasterizer::*;
