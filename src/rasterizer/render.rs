//! The rasterizer front end
//!
//! Owns the buffers and the render state, turns mesh faces into sorted
//! primitives and hands them to the scanline walker.

use super::blend::BlendMode;
use super::camera::Camera;
use super::error::Result;
use super::framebuffer::Framebuffer;
use super::math::{face_center, face_normal, Vec3};
use super::mesh::Mesh;
use super::primitive::Primitive;
use super::scanline;
use super::settings::RasterSettings;
use super::shader::Shader;
use super::span::SpanFiller;
use super::state::{Capability, CullFace, RenderState};
use super::texture::Sampler;
use super::types::{Color, VertexAttributes};

/// Per-face data the span filler needs besides the interpolated values
pub struct Surface<'a> {
    pub sampler: &'a dyn Sampler,
    pub shader: Option<&'a dyn Shader>,
    /// Unit face normal, world space
    pub normal: Vec3,
    /// Face centroid, world space
    pub center: Vec3,
}

/// Counters for one render or draw call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub faces: usize,
    pub culled: usize,
    /// Faces with a corner at or behind the near plane
    pub behind_camera: usize,
    /// Faces whose bounding box misses the viewport
    pub off_screen: usize,
    pub rasterized: usize,
    pub pixels_written: usize,
    pub depth_failed: usize,
}

impl std::ops::AddAssign for RenderStats {
    fn add_assign(&mut self, o: RenderStats) {
        self.faces += o.faces;
        self.culled += o.culled;
        self.behind_camera += o.behind_camera;
        self.off_screen += o.off_screen;
        self.rasterized += o.rasterized;
        self.pixels_written += o.pixels_written;
        self.depth_failed += o.depth_failed;
    }
}

/// Scanline rasterizer with its own color and depth buffer
pub struct Rasterizer {
    fb: Framebuffer,
    state: RenderState,
    // Scratch, reused across faces and frames
    primitive: Primitive,
    world: Vec<Vec3>,
    screen: Vec<Option<Vec3>>,
}

impl Rasterizer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            fb: Framebuffer::new(width, height),
            state: RenderState::default(),
            primitive: Primitive::default(),
            world: Vec::new(),
            screen: Vec::new(),
        }
    }

    pub fn from_settings(settings: &RasterSettings) -> Result<Self> {
        let mut r = Self::new(settings.width, settings.height);
        r.state = settings.render_state()?;
        r.clear(true, true);
        Ok(r)
    }

    pub fn width(&self) -> usize {
        self.fb.width
    }

    pub fn height(&self) -> usize {
        self.fb.height
    }

    /// Resize color and depth buffers together, contents are lost
    pub fn resize(&mut self, width: usize, height: usize) {
        self.fb.resize(width, height);
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.state.clear_color = color;
    }

    /// Clear the color buffer to the clear color and/or reset depth
    pub fn clear(&mut self, color: bool, depth: bool) {
        if color {
            self.fb.clear_color(self.state.clear_color);
        }
        if depth {
            self.fb.clear_depth();
        }
    }

    pub fn enable(&mut self, cap: Capability) {
        match cap {
            Capability::CullFace => self.state.cull_enabled = true,
        }
    }

    pub fn disable(&mut self, cap: Capability) {
        match cap {
            Capability::CullFace => self.state.cull_enabled = false,
        }
    }

    pub fn is_enabled(&self, cap: Capability) -> bool {
        match cap {
            Capability::CullFace => self.state.cull_enabled,
        }
    }

    pub fn cull_face(&mut self, mode: CullFace) {
        self.state.cull_face = mode;
    }

    pub fn blend_equation(&mut self, mode: BlendMode) {
        self.state.blend = mode;
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.fb
    }

    pub fn color_buffer(&self) -> &[Color] {
        self.fb.colors()
    }

    pub fn depth_buffer(&self) -> &[f32] {
        self.fb.depths()
    }

    /// Draw every face of `mesh` as seen from `camera`
    pub fn render(&mut self, mesh: &Mesh, camera: &Camera) -> RenderStats {
        let mut stats = RenderStats::default();
        if self.state.culls_everything() {
            log::trace!("{}: front and back culled, skipping", mesh.name);
            return stats;
        }

        let (width, height) = (self.fb.width, self.fb.height);
        let eye = camera.position();

        mesh.world_positions_into(&mut self.world);
        self.screen.clear();
        self.screen
            .extend(self.world.iter().map(|&p| camera.project(p, width, height)));

        let surface_sampler = mesh.sampler.as_ref();
        let surface_shader = mesh.shader.as_deref();

        for (n, face) in mesh.faces.iter().enumerate() {
            stats.faces += 1;
            let [i1, i2, i3] = face.indices;
            let (Some(&w1), Some(&w2), Some(&w3)) =
                (self.world.get(i1), self.world.get(i2), self.world.get(i3))
            else {
                log::warn!("{}: face {} references a missing vertex, skipped", mesh.name, n);
                continue;
            };

            let normal = face_normal(w1, w2, w3).normalize();
            let center = face_center(w1, w2, w3);
            if self.state.should_cull(normal, center, eye) {
                stats.culled += 1;
                continue;
            }

            let (Some(s1), Some(s2), Some(s3)) =
                (self.screen[i1], self.screen[i2], self.screen[i3])
            else {
                log::trace!("{}: face {} crosses the near plane", mesh.name, n);
                stats.behind_camera += 1;
                continue;
            };

            let surface = Surface {
                sampler: surface_sampler,
                shader: surface_shader,
                normal,
                center,
            };
            let vertices = [
                VertexAttributes::new(w1, s1, face.uvs[0]),
                VertexAttributes::new(w2, s2, face.uvs[1]),
                VertexAttributes::new(w3, s3, face.uvs[2]),
            ];
            self.rasterize(eye, vertices, &surface, &mut stats);
        }

        log::debug!(
            "{}: {} faces, {} culled, {} behind camera, {} off screen, {} drawn, {} pixels",
            mesh.name,
            stats.faces,
            stats.culled,
            stats.behind_camera,
            stats.off_screen,
            stats.rasterized,
            stats.pixels_written
        );
        stats
    }

    /// Draw one triangle whose world and screen positions are already known.
    /// No culling happens here; `eye` is where depth is measured from.
    pub fn draw_triangle(
        &mut self,
        eye: Vec3,
        vertices: [VertexAttributes; 3],
        surface: &Surface<'_>,
    ) -> RenderStats {
        let mut stats = RenderStats { faces: 1, ..Default::default() };
        self.rasterize(eye, vertices, surface, &mut stats);
        stats
    }

    fn rasterize(
        &mut self,
        eye: Vec3,
        [v1, v2, v3]: [VertexAttributes; 3],
        surface: &Surface<'_>,
        stats: &mut RenderStats,
    ) {
        self.primitive.set(v1, v2, v3);
        if !self.primitive.bounds().intersects_viewport(self.fb.width, self.fb.height) {
            stats.off_screen += 1;
            return;
        }
        stats.rasterized += 1;

        let height = self.fb.height;
        let mut filler = SpanFiller {
            fb: &mut self.fb,
            blend: self.state.blend,
            eye,
            surface,
            stats,
        };
        scanline::walk(&self.primitive, height, |y, left, right| filler.fill(y, left, right));
    }
}
