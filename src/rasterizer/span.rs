//! Span filler: draws one row of a triangle between its left and right edge

use super::blend::BlendMode;
use super::framebuffer::Framebuffer;
use super::math::{Vec2, Vec3};
use super::render::{RenderStats, Surface};
use super::scanline::Interpolants;
use super::shader::Fragment;

pub(crate) struct SpanFiller<'a> {
    pub fb: &'a mut Framebuffer,
    pub blend: BlendMode,
    /// Camera position; depth is the distance from here
    pub eye: Vec3,
    pub surface: &'a Surface<'a>,
    pub stats: &'a mut RenderStats,
}

impl SpanFiller<'_> {
    /// Fill pixels `[floor(left.x), floor(right.x))` of row `y`, clipped to
    /// the framebuffer. The first pixel takes the left edge's values.
    pub fn fill(&mut self, y: i32, left: Interpolants, right: Interpolants) {
        debug_assert!(y >= 0 && (y as usize) < self.fb.height);
        // Column math stays in f32 so far off-screen edges cannot overflow
        let start = left.x.floor();
        let end = right.x.floor();
        if !(end > start) {
            return;
        }

        let step = (right - left) / (end - start);
        let mut value = left;

        if start < 0.0 {
            value += step * -start;
        }
        let first = start.max(0.0).min(self.fb.width as f32) as usize;
        let last = end.max(0.0).min(self.fb.width as f32) as usize;

        for x in first..last {
            self.pixel(x, y as usize, &value);
            value += step;
        }
    }

    #[inline]
    fn pixel(&mut self, x: usize, y: usize, value: &Interpolants) {
        let idx = self.fb.index(x, y);
        let distance = value.world.distance(self.eye);
        let stored = self.fb.depths()[idx];

        // Ties keep what is already there
        if !(distance < stored) {
            self.stats.depth_failed += 1;
            return;
        }

        let (color, depth) = match self.surface.shader {
            Some(shader) => {
                let frag = Fragment {
                    world: value.world,
                    uv: Vec2::new(value.u, value.v),
                    normal: self.surface.normal,
                    center: self.surface.center,
                    x,
                    y,
                    destination_color: self.fb.colors()[idx],
                    destination_depth: stored,
                    source_depth: distance,
                    sampler: self.surface.sampler,
                };
                let shaded = shader.shade(&frag);
                (shaded.color, shaded.depth)
            }
            None => (Some(self.surface.sampler.sample(value.u, value.v)), Some(distance)),
        };

        if let Some(depth) = depth {
            *self.fb.depth_mut(idx) = depth;
        }
        if let Some(color) = color {
            let dst = self.fb.color_mut(idx);
            *dst = self.blend.apply(*dst, color);
            self.stats.pixels_written += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::framebuffer::DEPTH_CLEAR;
    use crate::rasterizer::texture::SolidColor;
    use crate::rasterizer::types::Color;

    fn edge(x: f32, world_x: f32, u: f32) -> Interpolants {
        Interpolants { x, world: Vec3::new(world_x, 0.0, 0.0), u, v: 0.0 }
    }

    fn fill_row(fb: &mut Framebuffer, left: Interpolants, right: Interpolants) -> RenderStats {
        let sampler = SolidColor(Color::WHITE);
        let surface = Surface {
            sampler: &sampler,
            shader: None,
            normal: Vec3::UP,
            center: Vec3::ZERO,
        };
        let mut stats = RenderStats::default();
        let mut filler = SpanFiller {
            fb,
            blend: BlendMode::Set,
            eye: Vec3::new(0.0, 0.0, -10.0),
            surface: &surface,
            stats: &mut stats,
        };
        filler.fill(0, left, right);
        stats
    }

    fn written(fb: &Framebuffer) -> Vec<usize> {
        (0..fb.width).filter(|&x| fb.depth_at(x, 0) < DEPTH_CLEAR).collect()
    }

    #[test]
    fn test_half_open_span() {
        let mut fb = Framebuffer::new(16, 1);
        let stats = fill_row(&mut fb, edge(2.3, 0.0, 0.0), edge(7.9, 0.0, 0.0));
        assert_eq!(written(&fb), vec![2, 3, 4, 5, 6]);
        assert_eq!(stats.pixels_written, 5);
    }

    #[test]
    fn test_degenerate_and_reversed_spans_write_nothing() {
        let mut fb = Framebuffer::new(16, 1);
        fill_row(&mut fb, edge(5.0, 0.0, 0.0), edge(5.9, 0.0, 0.0));
        fill_row(&mut fb, edge(9.0, 0.0, 0.0), edge(3.0, 0.0, 0.0));
        assert!(written(&fb).is_empty());
    }

    #[test]
    fn test_left_clip_resumes_interpolation() {
        // World x runs 0..20 across screen x -10..10
        let mut clipped = Framebuffer::new(10, 1);
        fill_row(&mut clipped, edge(-10.0, 0.0, 0.0), edge(10.0, 20.0, 0.0));
        assert_eq!(written(&clipped), (0..10).collect::<Vec<_>>());

        // Pixel 0 sits 10 steps in, so world x = 10 and depth = |(10,0,0) - eye|
        let expected = Vec3::new(10.0, 0.0, 0.0).distance(Vec3::new(0.0, 0.0, -10.0));
        assert!((clipped.depth_at(0, 0) - expected).abs() < 1e-3);
    }

    #[test]
    fn test_left_edge_far_outside_i32_range() {
        // World x runs 0..1 across screen x -3e9..10
        let mut fb = Framebuffer::new(10, 1);
        fill_row(&mut fb, edge(-3e9, 0.0, 0.0), edge(10.0, 1.0, 0.0));
        assert_eq!(written(&fb), (0..10).collect::<Vec<_>>());
        let expected = Vec3::new(1.0, 0.0, 0.0).distance(Vec3::new(0.0, 0.0, -10.0));
        assert!((fb.depth_at(9, 0) - expected).abs() < 1e-2);
    }

    #[test]
    fn test_right_clip() {
        let mut fb = Framebuffer::new(8, 1);
        fill_row(&mut fb, edge(5.0, 0.0, 0.0), edge(30.0, 0.0, 0.0));
        assert_eq!(written(&fb), vec![5, 6, 7]);
    }

    #[test]
    fn test_depth_tie_keeps_existing() {
        let mut fb = Framebuffer::new(4, 1);
        fill_row(&mut fb, edge(0.0, 0.0, 0.0), edge(4.0, 0.0, 0.0));
        let again = fill_row(&mut fb, edge(0.0, 0.0, 0.0), edge(4.0, 0.0, 0.0));
        assert_eq!(again.pixels_written, 0);
        assert_eq!(again.depth_failed, 4);
    }
}
