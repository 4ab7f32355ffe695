//! Color and depth buffers
//!
//! Both buffers are row-major, share one size and are resized together.
//! Depth holds the Euclidean distance from the camera to the nearest surface
//! drawn so far; `f32::MAX` means nothing has been drawn there.

use std::path::Path;

use image::{GrayImage, Luma, RgbaImage};

use super::error::{RasterError, Result};
use super::math::remap;
use super::types::Color;

/// Depth value of a cleared pixel
pub const DEPTH_CLEAR: f32 = f32::MAX;

/// Framebuffer for software rendering
#[derive(Debug, Clone)]
pub struct Framebuffer {
    pub width: usize,
    pub height: usize,
    color: Vec<Color>,
    depth: Vec<f32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            color: vec![Color::TRANSPARENT; width * height],
            depth: vec![DEPTH_CLEAR; width * height],
        }
    }

    /// Resize both buffers, discarding their contents
    pub fn resize(&mut self, width: usize, height: usize) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.color = vec![Color::TRANSPARENT; width * height];
        self.depth = vec![DEPTH_CLEAR; width * height];
    }

    pub fn clear_color(&mut self, color: Color) {
        self.color.fill(color);
    }

    pub fn clear_depth(&mut self) {
        self.depth.fill(DEPTH_CLEAR);
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{}",
            self.width,
            self.height
        );
        y * self.width + x
    }

    pub fn color_at(&self, x: usize, y: usize) -> Color {
        self.color[self.index(x, y)]
    }

    pub fn depth_at(&self, x: usize, y: usize) -> f32 {
        self.depth[self.index(x, y)]
    }

    pub fn colors(&self) -> &[Color] {
        &self.color
    }

    pub fn depths(&self) -> &[f32] {
        &self.depth
    }

    #[inline]
    pub(crate) fn color_mut(&mut self, idx: usize) -> &mut Color {
        &mut self.color[idx]
    }

    #[inline]
    pub(crate) fn depth_mut(&mut self, idx: usize) -> &mut f32 {
        &mut self.depth[idx]
    }

    /// RGBA bytes, 4 per pixel, channels clamped to [0, 1]
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.color.iter().flat_map(|c| c.to_rgba8()).collect()
    }

    pub fn to_image(&self) -> Result<RgbaImage> {
        if self.width == 0 || self.height == 0 {
            return Err(RasterError::EmptyFramebuffer { width: self.width, height: self.height });
        }
        RgbaImage::from_raw(self.width as u32, self.height as u32, self.to_rgba8())
            .ok_or(RasterError::EmptyFramebuffer { width: self.width, height: self.height })
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_image()?.save(path.as_ref())?;
        log::info!("Saved color buffer to {}", path.as_ref().display());
        Ok(())
    }

    /// Nearest and farthest depth actually written, if any
    pub fn depth_range(&self) -> Option<(f32, f32)> {
        self.depth
            .iter()
            .copied()
            .filter(|&d| d < DEPTH_CLEAR)
            .fold(None, |range, d| match range {
                None => Some((d, d)),
                Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
            })
    }

    /// Grayscale view of the depth buffer: nearest written depth is white,
    /// farthest is dark, untouched pixels are black.
    pub fn depth_image(&self) -> GrayImage {
        let range = self.depth_range();
        GrayImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let d = self.depth[y as usize * self.width + x as usize];
            let value = match range {
                Some((lo, hi)) if d < DEPTH_CLEAR => {
                    if hi > lo {
                        remap(d, lo, hi, 255.0, 1.0).round() as u8
                    } else {
                        255
                    }
                }
                _ => 0,
            };
            Luma([value])
        })
    }

    pub fn save_depth_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.depth_image().save(path.as_ref())?;
        log::info!("Saved depth buffer to {}", path.as_ref().display());
        Ok(())
    }
}
