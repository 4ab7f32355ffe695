//! Core types for the rasterizer

use super::error::{RasterError, Result};
use super::math::{Vec2, Vec3};

/// RGBA color, one `f32` per channel.
///
/// Public constructors only accept channels in `[0, 1]`. Blending may push
/// a stored color outside that range; it is clamped when converted to bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Color {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

impl Color {
    pub const BLACK: Color = Color::raw(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::raw(1.0, 1.0, 1.0, 1.0);
    pub const RED: Color = Color::raw(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::raw(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color::raw(0.0, 0.0, 1.0, 1.0);
    pub const MAGENTA: Color = Color::raw(1.0, 0.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::raw(0.0, 0.0, 0.0, 0.0);

    /// Validated constructor
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Result<Self> {
        if [r, g, b, a].iter().all(|c| (0.0..=1.0).contains(c)) {
            Ok(Self { r, g, b, a })
        } else {
            Err(RasterError::InvalidColor { r, g, b, a })
        }
    }

    /// Opaque color, validated
    pub fn rgb(r: f32, g: f32, b: f32) -> Result<Self> {
        Self::new(r, g, b, 1.0)
    }

    /// Build a color by clamping every channel into `[0, 1]`. NaN becomes 0.
    pub fn clamped(r: f32, g: f32, b: f32, a: f32) -> Self {
        let c = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        Self::raw(c(r), c(g), c(b), c(a))
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::raw(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// From packed `0xAARRGGBB`
    pub fn from_argb(argb: u32) -> Self {
        let [a, r, g, b] = argb.to_be_bytes();
        Self::from_rgba8(r, g, b, a)
    }

    /// Unchecked constructor for blend results and other internal math
    pub(crate) const fn raw(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Replace all channels, validated. On error the color is unchanged.
    pub fn set(&mut self, r: f32, g: f32, b: f32, a: f32) -> Result<()> {
        *self = Self::new(r, g, b, a)?;
        Ok(())
    }

    pub fn r(&self) -> f32 {
        self.r
    }

    pub fn g(&self) -> f32 {
        self.g
    }

    pub fn b(&self) -> f32 {
        self.b
    }

    pub fn a(&self) -> f32 {
        self.a
    }

    pub fn channels(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Apply a per-channel function (results are not validated)
    pub(crate) fn zip_with(self, other: Color, f: impl Fn(f32, f32) -> f32) -> Color {
        Color::raw(
            f(self.r, other.r),
            f(self.g, other.g),
            f(self.b, other.b),
            f(self.a, other.a),
        )
    }

    /// Multiply RGB by intensity, keep alpha
    pub fn shade(self, intensity: f32) -> Self {
        Self::raw(self.r * intensity, self.g * intensity, self.b * intensity, self.a)
    }

    /// Convert to [u8; 4], clamping each channel to [0, 1] first
    pub fn to_rgba8(self) -> [u8; 4] {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [byte(self.r), byte(self.g), byte(self.b), byte(self.a)]
    }

    /// Convert to packed `0xAARRGGBB`, clamped
    pub fn to_argb(self) -> u32 {
        let [r, g, b, a] = self.to_rgba8();
        u32::from_be_bytes([a, r, g, b])
    }
}

/// Everything the rasterizer knows about one triangle corner
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VertexAttributes {
    /// World-space position
    pub world: Vec3,
    /// Screen-space position: x/y in pixels, z = view depth
    pub screen: Vec3,
    /// Texture coordinate
    pub uv: Vec2,
}

impl VertexAttributes {
    pub fn new(world: Vec3, screen: Vec3, uv: Vec2) -> Self {
        Self { world, screen, uv }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(Color::new(1.1, 0.0, 0.0, 1.0).is_err());
        assert!(Color::new(0.0, -0.01, 0.0, 1.0).is_err());
        assert!(Color::new(0.0, 0.0, 0.0, f32::NAN).is_err());
        assert!(Color::new(0.0, 0.5, 1.0, 1.0).is_ok());
    }

    #[test]
    fn test_set_failure_keeps_old_value() {
        let mut c = Color::RED;
        assert!(c.set(2.0, 0.0, 0.0, 1.0).is_err());
        assert_eq!(c, Color::RED);
        c.set(0.0, 0.0, 1.0, 1.0).unwrap();
        assert_eq!(c, Color::BLUE);
    }

    #[test]
    fn test_output_conversion_clamps() {
        let c = Color::raw(1.5, -0.5, 0.5, 1.0);
        assert_eq!(c.to_rgba8(), [255, 0, 128, 255]);
    }

    #[test]
    fn test_argb_roundtrip() {
        let c = Color::from_argb(0x80FF4000);
        assert_eq!(c.to_argb(), 0x80FF4000);
    }
}
