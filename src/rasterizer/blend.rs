//! Blend unit: how a shaded color combines with the pixel already stored

use serde::{Deserialize, Serialize};
use super::types::Color;

/// Per-channel combine operation. Results are not clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlendMode {
    /// d = s
    #[default]
    Set,
    /// d = d + s
    Add,
    /// d = d - s
    Subtract,
    /// d = s - d
    ReverseSubtract,
    /// d = min(d, s)
    Min,
    /// d = max(d, s)
    Max,
}

impl BlendMode {
    pub const ALL: [BlendMode; 6] = [
        BlendMode::Set,
        BlendMode::Add,
        BlendMode::Subtract,
        BlendMode::ReverseSubtract,
        BlendMode::Min,
        BlendMode::Max,
    ];

    /// Combine `src` into `dst`
    #[inline]
    pub fn apply(self, dst: Color, src: Color) -> Color {
        match self {
            BlendMode::Set => src,
            BlendMode::Add => dst.zip_with(src, |d, s| d + s),
            BlendMode::Subtract => dst.zip_with(src, |d, s| d - s),
            BlendMode::ReverseSubtract => dst.zip_with(src, |d, s| s - d),
            BlendMode::Min => dst.zip_with(src, f32::min),
            BlendMode::Max => dst.zip_with(src, f32::max),
        }
    }
}
