//! Axis-aligned rectangle geometry
//!
//! Screen-style coordinates: x grows right, y grows down. A rectangle is
//! anchored at its top-left corner.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict AABB overlap; touching edges do not count
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Inclusive point test (points on the boundary are inside)
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Overlap extent along each axis (negative when separated)
    pub fn overlap(&self, other: &Rect) -> Vec2 {
        Vec2::new(
            self.right().min(other.right()) - self.x.max(other.x),
            self.bottom().min(other.bottom()) - self.y.max(other.y),
        )
    }

    /// Regular grid of sample points covering this rectangle, edges included.
    ///
    /// The grid has `ceil(width / spacing) + 1` columns and
    /// `ceil(height / spacing) + 1` rows, evenly distributed, so a 36-unit
    /// square at spacing 4 yields 10x10 points. Column-major order.
    pub fn sample_grid(&self, spacing: f32) -> impl Iterator<Item = Vec2> + '_ {
        let cols = divisions(self.width, spacing);
        let rows = divisions(self.height, spacing);
        let step_x = self.width / cols as f32;
        let step_y = self.height / rows as f32;

        (0..=cols).flat_map(move |i| {
            (0..=rows).map(move |j| Vec2::new(self.x + i as f32 * step_x, self.y + j as f32 * step_y))
        })
    }

    /// Whether all four fields are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// Number of grid intervals along an edge (at least one)
fn divisions(extent: f32, spacing: f32) -> u32 {
    ((extent / spacing).ceil() as u32).max(1)
}
