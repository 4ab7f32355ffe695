//! Triangle meshes as the rasterizer consumes them
//!
//! Loading meshes from files is someone else's job; this is the already
//! parsed form plus a couple of generators for previews and tests.

use std::sync::Arc;

use super::error::{RasterError, Result};
use super::math::{face_normal, Vec2, Vec3};
use super::shader::Shader;
use super::texture::{Sampler, SolidColor};

/// A triangle: three vertex indices and the UV used at each corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub indices: [usize; 3],
    pub uvs: [Vec2; 3],
}

impl Face {
    pub fn new(indices: [usize; 3], uvs: [Vec2; 3]) -> Self {
        Self { indices, uvs }
    }
}

/// Positions, faces, a model transform and what to paint the faces with
#[derive(Clone)]
pub struct Mesh {
    pub name: String,
    pub positions: Vec<Vec3>,
    pub faces: Vec<Face>,
    /// World translation
    pub position: Vec3,
    /// Euler angles in radians (x = pitch, y = yaw, z = roll)
    pub rotation: Vec3,
    pub sampler: Arc<dyn Sampler>,
    pub shader: Option<Arc<dyn Shader>>,
}

impl Mesh {
    pub fn new(
        name: &str,
        positions: Vec<Vec3>,
        faces: Vec<Face>,
        sampler: Arc<dyn Sampler>,
    ) -> Result<Self> {
        let mesh = Self {
            name: name.to_string(),
            positions,
            faces,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            sampler,
            shader: None,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    pub fn with_shader(mut self, shader: Arc<dyn Shader>) -> Self {
        self.shader = Some(shader);
        self
    }

    pub fn with_sampler(mut self, sampler: Arc<dyn Sampler>) -> Self {
        self.sampler = sampler;
        self
    }

    /// Check every face index points at a vertex
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.positions.len();
        for (face, f) in self.faces.iter().enumerate() {
            if let Some(&index) = f.indices.iter().find(|&&i| i >= vertex_count) {
                return Err(RasterError::FaceIndex { face, index, vertex_count });
            }
        }
        Ok(())
    }

    /// Model-space position to world space: rotate, then translate
    pub fn to_world(&self, p: Vec3) -> Vec3 {
        p.rotate(self.rotation) + self.position
    }

    /// World positions of all vertices, written into `out`
    pub fn world_positions_into(&self, out: &mut Vec<Vec3>) {
        out.clear();
        out.extend(self.positions.iter().map(|&p| self.to_world(p)));
    }

    pub fn world_positions(&self) -> Vec<Vec3> {
        let mut out = Vec::with_capacity(self.positions.len());
        self.world_positions_into(&mut out);
        out
    }

    /// Axis-aligned cube centered on the origin, faces wound outward
    pub fn cube(size: f32, sampler: Arc<dyn Sampler>) -> Self {
        let h = size / 2.0;
        let sides = [
            (Vec3::new(0.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
            (Vec3::new(0.0, 0.0, 1.0), Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
            (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 0.0)),
            (Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 1.0, 0.0)),
            (Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)),
            (Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0)),
        ];

        let mut positions = Vec::with_capacity(24);
        let mut faces = Vec::with_capacity(12);
        for (normal, tangent, bitangent) in sides {
            let center = normal * h;
            let corners = [
                center - tangent * h - bitangent * h,
                center + tangent * h - bitangent * h,
                center + tangent * h + bitangent * h,
                center - tangent * h + bitangent * h,
            ];
            push_quad(&mut positions, &mut faces, corners, normal, 1.0);
        }

        Self {
            name: "cube".to_string(),
            positions,
            faces,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            sampler,
            shader: None,
        }
    }

    /// Square floor on the XZ plane facing +Y, UVs running `0..repeat`
    pub fn plane(size: f32, repeat: f32, sampler: Arc<dyn Sampler>) -> Self {
        let h = size / 2.0;
        let corners = [
            Vec3::new(-h, 0.0, -h),
            Vec3::new(h, 0.0, -h),
            Vec3::new(h, 0.0, h),
            Vec3::new(-h, 0.0, h),
        ];
        let mut positions = Vec::with_capacity(4);
        let mut faces = Vec::with_capacity(2);
        push_quad(&mut positions, &mut faces, corners, Vec3::UP, repeat);

        Self {
            name: "plane".to_string(),
            positions,
            faces,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            sampler,
            shader: None,
        }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::cube(1.0, Arc::new(SolidColor::default()))
    }
}

/// Append a quad as two triangles whose normals agree with `normal`
fn push_quad(
    positions: &mut Vec<Vec3>,
    faces: &mut Vec<Face>,
    corners: [Vec3; 4],
    normal: Vec3,
    repeat: f32,
) {
    let base = positions.len();
    positions.extend_from_slice(&corners);
    let uvs = [
        Vec2::new(0.0, repeat),
        Vec2::new(repeat, repeat),
        Vec2::new(repeat, 0.0),
        Vec2::new(0.0, 0.0),
    ];

    for [a, b, c] in [[0, 1, 2], [0, 2, 3]] {
        let outward = face_normal(corners[a], corners[b], corners[c]).dot(normal) > 0.0;
        let (b, c) = if outward { (b, c) } else { (c, b) };
        faces.push(Face::new([base + a, base + b, base + c], [uvs[a], uvs[b], uvs[c]]));
    }
}
