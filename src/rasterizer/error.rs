//! Error type for the rasterizer
//!
//! Degenerate triangles are not errors; they simply draw nothing. What ends
//! up here is caller misuse (bad colors, bad meshes) and I/O.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("color channel outside [0, 1]: r={r} g={g} b={b} a={a}")]
    InvalidColor { r: f32, g: f32, b: f32, a: f32 },

    #[error("texture dimensions must be powers of two, got {width}x{height}")]
    TextureDimension { width: usize, height: usize },

    #[error("expected {expected} pixels, got {actual}")]
    PixelCount { expected: usize, actual: usize },

    #[error("face {face} references vertex {index}, mesh has {vertex_count}")]
    FaceIndex { face: usize, index: usize, vertex_count: usize },

    #[error("framebuffer dimensions must be non-zero, got {width}x{height}")]
    EmptyFramebuffer { width: usize, height: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Parse error: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),

    #[error("Serialize error: {0}")]
    ConfigSerialize(#[from] ron::Error),
}

pub type Result<T> = std::result::Result<T, RasterError>;
