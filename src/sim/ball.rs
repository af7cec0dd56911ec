//! Ball motion and directional collision tests
//!
//! The ball lives in normalized playfield coordinates: each component of
//! `position` stays in [0,1]. Only the signs of `direction` and the ratio of
//! its components matter; `speed` is the normalized distance covered per tick.

use glam::Vec2;
use rand::Rng;

use super::geom::{Bounded, Edge, Rect, Tinted};
use crate::consts::{BOUNCE_JITTER, MAX_ADVANCE_CORRECTIONS};
use crate::settings::{Color, GameSettings};

/// Which approach directions count as a hit against an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitMode {
    /// Only a ball moving toward the edge from inside the box can hit it
    Inside,
    /// A ball moving either way across the edge can hit it
    Outside,
}

/// The ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub position: Vec2,
    pub direction: Vec2,
    speed: f32,
    /// Pixels, only used to build the bounding box
    pub radius: f32,
    /// Largest pixel displacement allowed in one tick
    pub max_step: f32,
    color: Color,
    /// Bounding box at the current position, in pixels
    rect: Rect,
    /// Set when the last advance ran out of corrections
    stalled: bool,
}

impl Ball {
    pub fn new(position: Vec2, direction: Vec2, speed: f32, radius: f32, max_step: f32) -> Self {
        Self {
            position,
            direction,
            speed,
            radius,
            max_step,
            color: Color::White,
            rect: Rect::default(),
            stalled: false,
        }
    }

    /// Ball at its starting position, laid out in `playfield`
    pub fn from_settings(settings: &GameSettings, playfield: &Rect) -> Self {
        let mut ball = Self::new(
            settings.ball_start_position,
            settings.ball_start_direction,
            settings.ball_speed_base,
            settings.ball_radius,
            settings.ball_max_step(),
        );
        ball.place(playfield);
        ball
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn speed_up(&mut self, factor: f32) {
        self.speed *= factor;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Whether the last advance gave up without moving
    pub fn stalled(&self) -> bool {
        self.stalled
    }

    /// Side wall the ball is stuck against, if its last advance stalled
    pub fn pinned_side(&self) -> Option<Edge> {
        if !self.stalled {
            None
        } else if self.moving_left() {
            Some(Edge::Left)
        } else if self.moving_right() {
            Some(Edge::Right)
        } else {
            None
        }
    }

    #[inline]
    pub fn moving_left(&self) -> bool {
        self.direction.x < 0.0
    }

    #[inline]
    pub fn moving_right(&self) -> bool {
        self.direction.x > 0.0
    }

    #[inline]
    pub fn moving_up(&self) -> bool {
        self.direction.y < 0.0
    }

    #[inline]
    pub fn moving_down(&self) -> bool {
        self.direction.y > 0.0
    }

    /// Recompute the pixel bounding box for `playfield`
    pub fn place(&mut self, playfield: &Rect) {
        self.rect = Rect::around(playfield.denormalize(self.position), self.radius);
    }

    /// Normalized displacement for one tick at `speed`
    fn displacement(&self, speed: f32) -> Vec2 {
        let angle = (self.direction.x.abs() / self.direction.y.abs()).atan();
        let mut step = Vec2::new(speed * angle.sin(), speed * angle.cos());
        if self.direction.x.is_sign_negative() {
            step.x = -step.x;
        }
        if self.direction.y.is_sign_negative() {
            step.y = -step.y;
        }
        step
    }

    /// Move one tick along `direction`
    ///
    /// A step that would leave the field is retried at half speed for this
    /// tick only. A step longer than `max_step` pixels permanently scales the
    /// stored speed down before retrying. Returns whether the ball moved.
    pub fn advance(&mut self, playfield: &Rect) -> bool {
        self.stalled = false;
        if self.direction.x == 0.0 && self.direction.y == 0.0 {
            return false;
        }

        let mut speed = self.speed;
        for _ in 0..MAX_ADVANCE_CORRECTIONS {
            let step = self.displacement(speed);
            let next = self.position + step;

            if !(0.0..=1.0).contains(&next.x) || !(0.0..=1.0).contains(&next.y) {
                speed /= 2.0;
                continue;
            }

            let shift = Vec2::new(step.x * playfield.width, step.y * playfield.height).length();
            if shift > self.max_step {
                self.speed *= self.max_step / shift;
                speed = self.speed;
                continue;
            }

            self.position = next;
            self.place(playfield);
            return true;
        }

        // Only reachable when the ball sits on a field boundary heading out.
        // It stays put until a wall bounce turns it around, which cannot
        // happen while the paddle keeps claiming the hit first.
        self.stalled = true;
        log::warn!(
            "Ball advance gave up after {} corrections at {:?} heading {:?}",
            MAX_ADVANCE_CORRECTIONS,
            self.position,
            self.direction
        );
        false
    }

    fn can_hit(&self, edge: Edge, mode: HitMode) -> bool {
        let outside = mode == HitMode::Outside;
        match edge {
            Edge::Left => self.moving_left() || (outside && self.moving_right()),
            Edge::Right => self.moving_right() || (outside && self.moving_left()),
            Edge::Top => self.moving_up() || (outside && self.moving_down()),
            Edge::Bottom => self.moving_down() || (outside && self.moving_up()),
        }
    }

    /// Test the ball against one edge of `other`, bouncing on a hit
    ///
    /// The bounced axis is inverted and nudged by a random amount in
    /// [-0.01, 0.01] so trajectories never settle into a fixed loop.
    pub fn hit_edge<B, R>(&mut self, other: &B, edge: Edge, mode: HitMode, rng: &mut R) -> bool
    where
        B: Bounded + ?Sized,
        R: Rng + ?Sized,
    {
        if !self.can_hit(edge, mode) {
            return false;
        }

        let hit = self.rect.intersects(&other.bounds().edge(edge));
        if hit {
            let jitter = rng.random_range(-100i32..=100) as f32 / 100.0 * BOUNCE_JITTER;
            match edge {
                Edge::Left | Edge::Right => self.direction.x = -self.direction.x + jitter,
                Edge::Top | Edge::Bottom => self.direction.y = -self.direction.y + jitter,
            }
        }
        hit
    }

    /// Test the ball against a target box
    ///
    /// A box can overlap the ball on two perpendicular edges at once, so the
    /// edges are tried in an order that depends on the heading. Whenever the
    /// ball moves vertically only the top and bottom faces are considered.
    pub fn hit_target<B, R>(&mut self, other: &B, rng: &mut R) -> bool
    where
        B: Bounded + ?Sized,
        R: Rng + ?Sized,
    {
        let order = if self.moving_up() {
            [Edge::Bottom, Edge::Top]
        } else if self.moving_down() {
            [Edge::Top, Edge::Bottom]
        } else if self.moving_left() {
            [Edge::Right, Edge::Left]
        } else if self.moving_right() {
            [Edge::Left, Edge::Right]
        } else {
            return false;
        };

        order
            .into_iter()
            .any(|edge| self.hit_edge(other, edge, HitMode::Outside, rng))
    }
}

impl Bounded for Ball {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

impl Tinted for Ball {
    fn color(&self) -> Color {
        self.color
    }
}
