//! The player's paddle
//!
//! The paddle snaps between `slot_count` equal lanes along the playfield
//! bottom rather than sliding continuously.

use serde::{Deserialize, Serialize};

use super::geom::{Bounded, Rect, Tinted};
use crate::settings::{Color, GameSettings};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    slot: usize,
    slot_count: usize,
    pub height: f32,
    rect: Rect,
}

impl Paddle {
    /// `slot` is clamped into `0..slot_count`; `slot_count` must be positive
    pub fn new(slot: usize, slot_count: usize, height: f32) -> Self {
        let slot_count = slot_count.max(1);
        Self {
            slot: slot.min(slot_count - 1),
            slot_count,
            height,
            rect: Rect::default(),
        }
    }

    pub fn from_settings(settings: &GameSettings, playfield: &Rect) -> Self {
        let mut paddle = Self::new(
            settings.paddle_start_slot,
            settings.paddle_slot_count,
            settings.paddle_height,
        );
        paddle.place(playfield);
        paddle
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Lane width in pixels for `playfield`
    pub fn slot_width(&self, playfield: &Rect) -> f32 {
        playfield.width / self.slot_count as f32
    }

    pub fn move_left(&mut self) {
        self.slot = self.slot.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.slot + 1 < self.slot_count {
            self.slot += 1;
        }
    }

    /// Refine the lanes by `factor`, keeping the paddle where it is
    pub fn split_by(&mut self, factor: usize) {
        let factor = factor.max(1);
        self.slot_count *= factor;
        self.slot *= factor;
    }

    /// Recompute the pixel rectangle: current lane, resting on the playfield bottom
    pub fn place(&mut self, playfield: &Rect) {
        let width = self.slot_width(playfield);
        self.rect = Rect::new(
            playfield.left() + self.slot as f32 * width,
            playfield.bottom() - self.height,
            width,
            self.height,
        );
    }
}

impl Bounded for Paddle {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

impl Tinted for Paddle {
    fn color(&self) -> Color {
        Color::White
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_moves_clamp_at_edges() {
        let mut paddle = Paddle::new(1, 3, 10.0);
        paddle.move_left();
        paddle.move_left();
        assert_eq!(paddle.slot(), 0);
        paddle.move_right();
        paddle.move_right();
        paddle.move_right();
        assert_eq!(paddle.slot(), 2);
    }

    #[test]
    fn test_split_preserves_relative_position() {
        let field = Rect::new(0.0, 0.0, 400.0, 500.0);
        let mut paddle = Paddle::new(5, 10, 10.0);
        paddle.place(&field);
        let before = paddle.bounds();

        paddle.split_by(2);
        paddle.place(&field);
        assert_eq!(paddle.slot(), 10);
        assert_eq!(paddle.slot_count(), 20);
        let after = paddle.bounds();
        assert_eq!(after.left(), before.left());
        assert_eq!(after.width, before.width / 2.0);
    }

    #[test]
    fn test_place_sits_on_bottom() {
        let field = Rect::new(0.0, 0.0, 500.0, 540.0);
        let mut paddle = Paddle::new(9, 10, 10.0);
        paddle.place(&field);
        assert_eq!(paddle.bounds(), Rect::new(450.0, 530.0, 50.0, 10.0));
    }

    #[test]
    fn test_new_clamps_start_slot() {
        let paddle = Paddle::new(12, 10, 10.0);
        assert_eq!(paddle.slot(), 9);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Left,
        Right,
        Split(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Left),
            Just(Op::Right),
            (1usize..4).prop_map(Op::Split),
        ]
    }

    proptest! {
        #[test]
        fn prop_slot_stays_in_range(
            start in 0usize..10,
            ops in prop::collection::vec(op(), 0..64),
        ) {
            let mut paddle = Paddle::new(start, 10, 10.0);
            for op in ops {
                match op {
                    Op::Left => paddle.move_left(),
                    Op::Right => paddle.move_right(),
                    // Keep the lane count bounded
                    Op::Split(k) if paddle.slot_count() < 10_000 => paddle.split_by(k),
                    Op::Split(_) => {}
                }
                prop_assert!(paddle.slot() < paddle.slot_count());
            }
        }
    }
}
