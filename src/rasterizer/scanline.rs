//! Scanline walker
//!
//! Walks a sorted `Primitive` one pixel row at a time. The triangle is split
//! at the middle corner into an upper and a lower phase. The long edge
//! (top to bottom) is set up once and keeps stepping through both phases;
//! the short edge is top to middle in the upper phase and is rebuilt as
//! middle to bottom for the lower one.
//!
//! Every attribute moves by forward differences: one division per attribute
//! when an edge is built, then one addition per row.

use std::ops::{Add, AddAssign, Div, Mul, Sub};

use super::math::Vec3;
use super::primitive::Primitive;
use super::types::VertexAttributes;

/// The values interpolated across a triangle: screen X, world position, UV
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Interpolants {
    pub x: f32,
    pub world: Vec3,
    pub u: f32,
    pub v: f32,
}

impl Interpolants {
    pub fn from_vertex(v: &VertexAttributes) -> Self {
        Self {
            x: v.screen.x,
            world: v.world,
            u: v.uv.x,
            v: v.uv.y,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.world.is_finite() && self.u.is_finite() && self.v.is_finite()
    }
}

impl Add for Interpolants {
    type Output = Interpolants;
    fn add(self, o: Interpolants) -> Interpolants {
        Interpolants {
            x: self.x + o.x,
            world: self.world + o.world,
            u: self.u + o.u,
            v: self.v + o.v,
        }
    }
}

impl AddAssign for Interpolants {
    fn add_assign(&mut self, o: Interpolants) {
        *self = *self + o;
    }
}

impl Sub for Interpolants {
    type Output = Interpolants;
    fn sub(self, o: Interpolants) -> Interpolants {
        Interpolants {
            x: self.x - o.x,
            world: self.world - o.world,
            u: self.u - o.u,
            v: self.v - o.v,
        }
    }
}

impl Mul<f32> for Interpolants {
    type Output = Interpolants;
    fn mul(self, s: f32) -> Interpolants {
        Interpolants {
            x: self.x * s,
            world: self.world * s,
            u: self.u * s,
            v: self.v * s,
        }
    }
}

impl Div<f32> for Interpolants {
    type Output = Interpolants;
    fn div(self, s: f32) -> Interpolants {
        Interpolants {
            x: self.x / s,
            world: self.world / s,
            u: self.u / s,
            v: self.v / s,
        }
    }
}

/// One triangle edge being stepped down the screen
#[derive(Debug, Clone, Copy)]
struct Edge {
    value: Interpolants,
    step: Interpolants,
}

impl Edge {
    /// `None` for an edge with no vertical extent
    fn between(from: &VertexAttributes, to: &VertexAttributes) -> Option<Self> {
        let dy = to.screen.y - from.screen.y;
        if !(dy > 0.0) {
            return None;
        }
        let start = Interpolants::from_vertex(from);
        let end = Interpolants::from_vertex(to);
        Some(Self {
            value: start,
            step: (end - start) / dy,
        })
    }

    #[inline]
    fn advance(&mut self) {
        self.value += self.step;
    }

    /// Jump ahead as if `rows` rows had been stepped
    #[inline]
    fn skip(&mut self, rows: f32) {
        if rows > 0.0 {
            self.value += self.step * rows;
        }
    }
}

/// First and one-past-last row of `[from, to)` that fall inside `[0, height)`.
/// Both bounds are already floored.
#[inline]
fn visible_rows(from: f32, to: f32, height: f32) -> (i32, i32) {
    let first = from.clamp(0.0, height);
    let last = to.clamp(0.0, height);
    (first as i32, last as i32)
}

/// Call `span(y, left, right)` once for every row the primitive covers
/// inside `[0, height)`, top to bottom.
///
/// Rows above the screen are skipped analytically rather than stepped.
/// Phases with zero height produce no rows and never divide by zero.
/// Row distances are kept in `f32`, so vertices far outside the `i32`
/// range still resume at the right place on row 0.
pub fn walk<F>(prim: &Primitive, height: usize, mut span: F)
where
    F: FnMut(i32, Interpolants, Interpolants),
{
    let height = height.min(i32::MAX as usize) as f32;
    let top_row = prim.top.screen.y.floor();
    let middle_row = prim.middle.screen.y.floor();
    let bottom_row = prim.bottom.screen.y.floor();

    let Some(mut long) = Edge::between(&prim.top, &prim.bottom) else {
        return;
    };
    let mut long_row = top_row;
    let middle_right = prim.middle_on_right();

    let mut emit = |y: i32, long: &Edge, short: &Edge| {
        if middle_right {
            span(y, long.value, short.value);
        } else {
            span(y, short.value, long.value);
        }
    };

    // Upper phase
    let (first, last) = visible_rows(top_row, middle_row, height);
    if first < last {
        if let Some(mut short) = Edge::between(&prim.top, &prim.middle) {
            long.skip(first as f32 - long_row);
            short.skip(first as f32 - top_row);
            for y in first..last {
                emit(y, &long, &short);
                long.advance();
                short.advance();
            }
            long_row = last as f32;
        }
    }

    // Lower phase
    let (first, last) = visible_rows(middle_row, bottom_row, height);
    if first < last {
        if let Some(mut short) = Edge::between(&prim.middle, &prim.bottom) {
            long.skip(first as f32 - long_row);
            short.skip(first as f32 - middle_row);
            for y in first..last {
                emit(y, &long, &short);
                long.advance();
                short.advance();
            }
        }
    }
}
