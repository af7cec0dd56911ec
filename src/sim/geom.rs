//! Axis-aligned geometry in pixel space
//!
//! Screen convention: y grows downward, so `top < bottom`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Color;

/// An axis-aligned rectangle
///
/// A zero width or zero height rectangle stands for a single edge when
/// testing a ball against one side of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
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

    /// Square of side `2 * half` centred on `center`
    pub fn around(center: Vec2, half: f32) -> Self {
        Self::new(center.x - half, center.y - half, 2.0 * half, 2.0 * half)
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

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Strict overlap on both axes; rectangles that only touch do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Degenerate rectangle covering one side of this one
    pub fn edge(&self, edge: Edge) -> Rect {
        match edge {
            Edge::Left => Rect::new(self.left(), self.top(), 0.0, self.height),
            Edge::Right => Rect::new(self.right(), self.top(), 0.0, self.height),
            Edge::Top => Rect::new(self.left(), self.top(), self.width, 0.0),
            Edge::Bottom => Rect::new(self.left(), self.bottom(), self.width, 0.0),
        }
    }

    /// Map a normalized point in [0,1]x[0,1] into this rectangle
    pub fn denormalize(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            self.left() + self.width * point.x,
            self.top() + self.height * point.y,
        )
    }
}

/// One side of an axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Anything with a rectangular footprint the ball can collide with
pub trait Bounded {
    fn bounds(&self) -> Rect;
}

/// Anything the renderer paints with a single color
pub trait Tinted {
    fn color(&self) -> Color;
}

impl Bounded for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}
