//! Primitive assembly: sort a triangle's corners by screen Y and work out
//! which side of the long edge the middle corner sits on.

use super::types::VertexAttributes;

/// Integer pixel bounds, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl ScreenRect {
    /// Does this box touch the viewport `[0, width) x [0, height)`?
    pub fn intersects_viewport(&self, width: usize, height: usize) -> bool {
        self.max_x >= 0
            && self.max_y >= 0
            && (self.min_x as i64) < width as i64
            && (self.min_y as i64) < height as i64
    }
}

/// A triangle with its corners in top, middle, bottom order.
///
/// Each corner keeps its world position, screen position and UV together;
/// sorting moves whole `VertexAttributes`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Primitive {
    pub top: VertexAttributes,
    pub middle: VertexAttributes,
    pub bottom: VertexAttributes,
}

impl Primitive {
    pub fn assemble(v1: VertexAttributes, v2: VertexAttributes, v3: VertexAttributes) -> Self {
        let mut p = Self::default();
        p.set(v1, v2, v3);
        p
    }

    /// Reassemble in place from three unordered corners
    pub fn set(
        &mut self,
        mut v1: VertexAttributes,
        mut v2: VertexAttributes,
        mut v3: VertexAttributes,
    ) {
        if v1.screen.y > v2.screen.y {
            std::mem::swap(&mut v1, &mut v2);
        }
        if v2.screen.y > v3.screen.y {
            std::mem::swap(&mut v2, &mut v3);
        }
        if v1.screen.y > v2.screen.y {
            std::mem::swap(&mut v1, &mut v2);
        }
        self.top = v1;
        self.middle = v2;
        self.bottom = v3;
    }

    pub fn bounds(&self) -> ScreenRect {
        let (t, m, b) = (self.top.screen, self.middle.screen, self.bottom.screen);
        ScreenRect {
            min_x: t.x.min(m.x).min(b.x).floor() as i32,
            max_x: t.x.max(m.x).max(b.x).floor() as i32,
            // Sorted, so the Y extremes are known
            min_y: t.y.floor() as i32,
            max_y: b.y.floor() as i32,
        }
    }

    /// True when the middle corner lies right of the top-to-bottom edge.
    ///
    /// Compares the top→middle slope against the top→bottom slope, with both
    /// sides multiplied through by the (non-negative) heights so a flat top
    /// does not divide by zero.
    pub fn middle_on_right(&self) -> bool {
        let (t, m, b) = (self.top.screen, self.middle.screen, self.bottom.screen);
        (m.x - t.x) * (b.y - t.y) > (b.x - t.x) * (m.y - t.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::math::{Vec2, Vec3};

    fn vert(x: f32, y: f32, tag: f32) -> VertexAttributes {
        VertexAttributes::new(Vec3::new(tag, tag, tag), Vec3::new(x, y, 1.0), Vec2::new(tag, -tag))
    }

    fn tri(corners: [(f32, f32, f32); 3]) -> Primitive {
        let [a, b, c] = corners.map(|(x, y, tag)| vert(x, y, tag));
        Primitive::assemble(a, b, c)
    }

    #[test]
    fn test_sort_every_permutation() {
        let a = vert(0.0, 1.0, 1.0);
        let b = vert(5.0, 2.0, 2.0);
        let c = vert(3.0, 3.0, 3.0);
        let perms = [[a, b, c], [a, c, b], [b, a, c], [b, c, a], [c, a, b], [c, b, a]];
        for [p, q, r] in perms {
            let prim = Primitive::assemble(p, q, r);
            assert_eq!(prim.top, a);
            assert_eq!(prim.middle, b);
            assert_eq!(prim.bottom, c);
        }
    }

    #[test]
    fn test_attributes_stay_paired() {
        let prim = tri([(1.0, 9.0, 9.0), (2.0, 4.0, 4.0), (3.0, 6.0, 6.0)]);
        for v in [prim.top, prim.middle, prim.bottom] {
            assert_eq!(v.world.x, v.screen.y);
            assert_eq!(v.uv.x, v.screen.y);
        }
    }

    #[test]
    fn test_ties_are_fine() {
        let prim = tri([(10.0, 10.0, 1.0), (50.0, 10.0, 2.0), (30.0, 50.0, 3.0)]);
        assert!(prim.top.screen.y <= prim.middle.screen.y);
        assert!(prim.middle.screen.y <= prim.bottom.screen.y);
        assert!(prim.middle_on_right());
    }

    #[test]
    fn test_middle_side() {
        // Middle pokes out to the right of the long edge
        let right = tri([(0.0, 0.0, 0.0), (10.0, 5.0, 0.0), (0.0, 10.0, 0.0)]);
        assert!(right.middle_on_right());
        let left = tri([(0.0, 0.0, 0.0), (-10.0, 5.0, 0.0), (0.0, 10.0, 0.0)]);
        assert!(!left.middle_on_right());
    }

    #[test]
    fn test_bounds_and_viewport() {
        let prim = tri([(-5.5, 2.0, 0.0), (3.2, 7.9, 0.0), (1.0, 4.0, 0.0)]);
        assert_eq!(prim.bounds(), ScreenRect { min_x: -6, min_y: 2, max_x: 3, max_y: 7 });
        assert!(prim.bounds().intersects_viewport(10, 10));

        let off = tri([(20.0, 2.0, 0.0), (30.0, 3.0, 0.0), (25.0, 9.0, 0.0)]);
        assert!(!off.bounds().intersects_viewport(10, 10));
        let above = tri([(1.0, -20.0, 0.0), (3.0, -10.0, 0.0), (2.0, -0.5, 0.0)]);
        assert!(!above.bounds().intersects_viewport(10, 10));
    }
}
