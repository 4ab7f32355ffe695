//! Per-pixel shader hook and the built-in shaders
//!
//! A shader runs only for pixels that already passed the depth test. It
//! decides the color handed to the blend unit and the depth that gets
//! stored, and may skip either.

use super::math::{remap, Vec2, Vec3};
use super::texture::Sampler;
use super::types::Color;

/// Everything a shader can see about the pixel being drawn
pub struct Fragment<'a> {
    /// Interpolated world position
    pub world: Vec3,
    pub uv: Vec2,
    /// Unit face normal, world space
    pub normal: Vec3,
    /// Face centroid, world space
    pub center: Vec3,
    pub x: usize,
    pub y: usize,
    /// Color currently in the color buffer
    pub destination_color: Color,
    /// Depth currently in the depth buffer
    pub destination_depth: f32,
    /// Distance from the camera to `world`
    pub source_depth: f32,
    pub(crate) sampler: &'a dyn Sampler,
}

impl Fragment<'_> {
    /// The surface texture at this pixel's UV
    pub fn texture_color(&self) -> Color {
        self.sampler.sample(self.uv.x, self.uv.y)
    }

    /// Write `color` and store this fragment's depth
    pub fn write(&self, color: Color) -> Shaded {
        Shaded { color: Some(color), depth: Some(self.source_depth) }
    }

    /// Leave both buffers as they are
    pub fn discard(&self) -> Shaded {
        Shaded { color: None, depth: None }
    }
}

/// What a shader decided for one pixel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shaded {
    /// Color to blend in; `None` skips the color write
    pub color: Option<Color>,
    /// Depth to store; `None` keeps the old depth
    pub depth: Option<f32>,
}

pub trait Shader: Send + Sync {
    fn shade(&self, frag: &Fragment<'_>) -> Shaded;
}

/// Closures work as custom shaders
impl<F> Shader for F
where
    F: Fn(&Fragment<'_>) -> Shaded + Send + Sync,
{
    fn shade(&self, frag: &Fragment<'_>) -> Shaded {
        self(frag)
    }
}

/// Colors a face by its normal
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalShader;

impl Shader for NormalShader {
    fn shade(&self, frag: &Fragment<'_>) -> Shaded {
        let n = frag.normal;
        frag.write(Color::clamped(0.5 + n.x / 2.0, 0.5 + n.y / 2.0, 0.5 + n.z / 2.0, 1.0))
    }
}

/// Colors by absolute world position, one axis per channel
#[derive(Debug, Clone, Copy)]
pub struct WorldSpaceShader {
    pub extent: Vec3,
}

impl Shader for WorldSpaceShader {
    fn shade(&self, frag: &Fragment<'_>) -> Shaded {
        let w = frag.world;
        let e = self.extent;
        frag.write(Color::clamped(
            remap(w.x.abs(), -e.x, e.x, 0.0, 1.0),
            remap(w.y.abs(), -e.y, e.y, 0.0, 1.0),
            remap(w.z.abs(), -e.z, e.z, 0.0, 1.0),
            1.0,
        ))
    }
}

/// Is `y` (shifted by `offset`) in the first half of a band of `height`?
fn in_band(y: f32, offset: f32, height: f32) -> bool {
    ((y + offset) % height).abs() < height / 2.0
}

/// Horizontal stripes of two colors
#[derive(Debug, Clone, Copy)]
pub struct StripShader {
    pub height: f32,
    pub offset: f32,
    pub color_a: Color,
    pub color_b: Color,
}

impl Shader for StripShader {
    fn shade(&self, frag: &Fragment<'_>) -> Shaded {
        if in_band(frag.world.y, self.offset, self.height) {
            frag.write(self.color_a)
        } else {
            frag.write(self.color_b)
        }
    }
}

/// Cuts the surface into horizontal slices; the gaps draw nothing and let
/// whatever is behind show through.
#[derive(Debug, Clone, Copy)]
pub struct SliceShader {
    pub height: f32,
    pub offset: f32,
}

impl Shader for SliceShader {
    fn shade(&self, frag: &Fragment<'_>) -> Shaded {
        if in_band(frag.world.y, self.offset, self.height) {
            frag.write(frag.texture_color())
        } else {
            frag.discard()
        }
    }
}

/// Point light with linear falloff, lighting the surface texture
#[derive(Debug, Clone, Copy)]
pub struct PointLightShader {
    pub light: Vec3,
    /// Distance at which the light reaches zero
    pub falloff: f32,
}

impl Shader for PointLightShader {
    fn shade(&self, frag: &Fragment<'_>) -> Shaded {
        let to_light = self.light - frag.world;
        let dist = to_light.len();
        if dist > self.falloff {
            return frag.write(Color::BLACK);
        }
        let facing = frag.normal.dot(to_light.normalize());
        if facing < 0.0 {
            return frag.write(Color::BLACK);
        }
        let intensity = (1.0 - dist / self.falloff) * facing;
        frag.write(frag.texture_color().shade(intensity))
    }
}
