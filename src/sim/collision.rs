//! Axis-aligned bounding box collision
//!
//! Every entity in the game is a rectangle, so overlap testing is a single
//! comparison per edge.

use glam::Vec2;

/// An axis-aligned rectangle with a top-left origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }
}

/// Check whether two rectangles overlap with positive area.
///
/// Rectangles that only share an edge do not collide.
#[inline]
pub fn intersects(a: &Aabb, b: &Aabb) -> bool {
    let (a_max, b_max) = (a.max(), b.max());
    a.min.x < b_max.x && a_max.x > b.min.x && a.min.y < b_max.y && a_max.y > b.min.y
}
