//! Texture samplers
//!
//! The rasterizer only ever asks for `sample(u, v)`. Wrapping of
//! coordinates outside `[0, 1]` is the sampler's business.

use std::path::Path;

use image::GenericImageView;

use super::error::{RasterError, Result};
use super::framebuffer::Framebuffer;
use super::types::Color;

/// Anything that can be looked up by texture coordinate
pub trait Sampler: Send + Sync {
    fn sample(&self, u: f32, v: f32) -> Color;
}

/// Same color everywhere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidColor(pub Color);

impl Sampler for SolidColor {
    fn sample(&self, _u: f32, _v: f32) -> Color {
        self.0
    }
}

impl Default for SolidColor {
    /// Magenta, the usual "texture missing" color
    fn default() -> Self {
        Self(Color::MAGENTA)
    }
}

/// Image texture with nearest-neighbour lookup (no filtering).
///
/// Dimensions must be powers of two so coordinates wrap with a bit mask.
#[derive(Debug, Clone)]
pub struct ImageTexture {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
    pub name: String,
    /// How many times the image repeats across one UV unit
    pub repeat_x: f32,
    pub repeat_y: f32,
    offset_x: i32,
    offset_y: i32,
}

fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width.is_power_of_two() && height.is_power_of_two() {
        Ok(())
    } else {
        Err(RasterError::TextureDimension { width, height })
    }
}

impl ImageTexture {
    /// Blank (white) texture
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::from_pixels(width, height, vec![Color::WHITE; width * height], String::new())
    }

    pub fn from_pixels(
        width: usize,
        height: usize,
        pixels: Vec<Color>,
        name: String,
    ) -> Result<Self> {
        check_dimensions(width, height)?;
        if pixels.len() != width * height {
            return Err(RasterError::PixelCount { expected: width * height, actual: pixels.len() });
        }
        Ok(Self {
            width,
            height,
            pixels,
            name,
            repeat_x: 1.0,
            repeat_y: 1.0,
            offset_x: 0,
            offset_y: 0,
        })
    }

    /// Load texture from an image file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let tex = Self::from_image(&img, name)?;
        log::info!("Loaded texture: {} ({}x{})", tex.name, tex.width, tex.height);
        Ok(tex)
    }

    /// Load texture from encoded image bytes (PNG)
    pub fn from_bytes(bytes: &[u8], name: String) -> Result<Self> {
        let img = image::load_from_memory(bytes)?;
        Self::from_image(&img, name)
    }

    fn from_image(img: &image::DynamicImage, name: String) -> Result<Self> {
        let (width, height) = img.dimensions();
        let pixels: Vec<Color> = img
            .to_rgba8()
            .pixels()
            .map(|p| Color::from_rgba8(p[0], p[1], p[2], p[3]))
            .collect();
        Self::from_pixels(width as usize, height as usize, pixels, name)
    }

    /// Snapshot of a rendered frame, for render-to-texture
    pub fn from_framebuffer(fb: &Framebuffer) -> Result<Self> {
        Self::from_pixels(fb.width, fb.height, fb.colors().to_vec(), "framebuffer".to_string())
    }

    /// Overwrite with the contents of a framebuffer of the same size
    pub fn copy_from(&mut self, fb: &Framebuffer) {
        let n = self.pixels.len().min(fb.colors().len());
        self.pixels[..n].copy_from_slice(&fb.colors()[..n]);
    }

    /// Checkerboard test texture, cells of 4x4 texels
    pub fn checkerboard(width: usize, height: usize, color1: Color, color2: Color) -> Result<Self> {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let checker = ((x / 4) + (y / 4)) % 2 == 0;
                pixels.push(if checker { color1 } else { color2 });
            }
        }
        Self::from_pixels(width, height, pixels, "checkerboard".to_string())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn set_offset(&mut self, x: i32, y: i32) {
        self.offset_x = x.rem_euclid(self.width as i32);
        self.offset_y = y.rem_euclid(self.height as i32);
    }

    /// Get pixel at x,y coordinates
    pub fn get_pixel(&self, x: usize, y: usize) -> Color {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            Color::BLACK
        }
    }
}

impl Sampler for ImageTexture {
    /// Negative coordinates mirror, everything wraps
    fn sample(&self, u: f32, v: f32) -> Color {
        // The float-to-int cast saturates for huge coordinates, so the offset wraps
        let tx = (u.abs() * self.width as f32 * self.repeat_x) as i32;
        let ty = (v.abs() * self.height as f32 * self.repeat_y) as i32;
        let tx = tx.wrapping_add(self.offset_x);
        let ty = ty.wrapping_add(self.offset_y);
        let tx = (tx & (self.width as i32 - 1)) as usize;
        let ty = (ty & (self.height as i32 - 1)) as usize;
        self.pixels[ty * self.width + tx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_texels() -> ImageTexture {
        ImageTexture::from_pixels(
            2,
            2,
            vec![Color::RED, Color::GREEN, Color::BLUE, Color::WHITE],
            "quad".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_non_power_of_two() {
        assert!(matches!(
            ImageTexture::new(3, 4),
            Err(RasterError::TextureDimension { width: 3, height: 4 })
        ));
    }

    #[test]
    fn test_rejects_wrong_pixel_count() {
        let err = ImageTexture::from_pixels(2, 2, vec![Color::RED; 3], String::new());
        assert!(matches!(err, Err(RasterError::PixelCount { expected: 4, actual: 3 })));
    }

    #[test]
    fn test_nearest_lookup_and_wrap() {
        let tex = four_texels();
        assert_eq!(tex.sample(0.0, 0.0), Color::RED);
        assert_eq!(tex.sample(0.75, 0.0), Color::GREEN);
        assert_eq!(tex.sample(0.25, 0.75), Color::BLUE);
        assert_eq!(tex.sample(1.75, 1.75), Color::WHITE);
        assert_eq!(tex.sample(-0.75, 0.0), Color::GREEN);
    }

    #[test]
    fn test_repeat_and_offset() {
        let mut tex = four_texels();
        tex.repeat_x = 2.0;
        assert_eq!(tex.sample(0.3, 0.0), Color::GREEN);
        tex.repeat_x = 1.0;
        tex.set_offset(1, 0);
        assert_eq!(tex.sample(0.0, 0.0), Color::GREEN);
        tex.set_offset(-1, 0);
        assert_eq!(tex.sample(0.0, 0.0), Color::GREEN);
    }

    #[test]
    fn test_huge_coordinates_stay_in_bounds() {
        let mut tex = ImageTexture::checkerboard(64, 64, Color::RED, Color::BLUE).unwrap();
        tex.set_offset(3, 5);
        for (u, v) in [(1e8, 0.0), (0.0, -1e8), (f32::MAX, f32::NAN), (f32::INFINITY, 2.5)] {
            let c = tex.sample(u, v);
            assert!(c == Color::RED || c == Color::BLUE, "({u}, {v}) gave {:?}", c);
        }
    }

    #[test]
    fn test_from_bytes_decodes_png() {
        let img = image::RgbaImage::from_fn(2, 2, |x, y| {
            image::Rgba([x as u8 * 255, y as u8 * 255, 0, 255])
        });
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let tex = ImageTexture::from_bytes(&bytes, "gradient".to_string()).unwrap();
        assert_eq!(tex.name, "gradient");
        assert_eq!(tex.get_pixel(0, 0), Color::from_rgba8(0, 0, 0, 255));
        assert_eq!(tex.get_pixel(1, 0), Color::RED);
        assert_eq!(tex.get_pixel(0, 1), Color::GREEN);
        assert!(ImageTexture::from_bytes(b"not a png", String::new()).is_err());
    }

    #[test]
    fn test_solid_color() {
        let s = SolidColor(Color::BLUE);
        assert_eq!(s.sample(123.0, -4.0), Color::BLUE);
    }

    #[test]
    fn test_render_to_texture_copy() {
        let mut fb = Framebuffer::new(2, 2);
        fb.clear_color(Color::GREEN);
        let mut tex = four_texels();
        tex.copy_from(&fb);
        assert_eq!(tex.sample(0.0, 0.0), Color::GREEN);
        assert!(ImageTexture::from_framebuffer(&Framebuffer::new(3, 2)).is_err());
    }
}
