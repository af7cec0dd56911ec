//! Demo mode: steer the paddle under the ball
//!
//! Produces the same commands a player would, so an unattended game goes
//! through the normal input path. The paddle tracks the ball's lane, except
//! when the ball is stuck against a side wall above it.

use super::geom::{Bounded, Edge};
use super::state::GameState;
use super::tick::Command;

/// Next move that brings the paddle's lane under the ball, if any
pub fn steer(state: &GameState) -> Option<Command> {
    if state.paused || state.is_over() {
        return None;
    }

    let field = state.playfield;
    let lane_width = state.paddle.slot_width(&field);
    if lane_width <= 0.0 {
        return None;
    }

    let ball = state.ball.bounds();
    let last = state.paddle.slot_count() - 1;
    let lane = |x: f32| ((x - field.left()) / lane_width).floor().max(0.0) as usize;
    // A ball stuck against a side wall over the paddle only gets its wall
    // bounce once the paddle is out of the way
    let wanted = match state.ball.pinned_side() {
        Some(Edge::Left) => lane(ball.right()) + 1,
        Some(Edge::Right) => lane(ball.left()).saturating_sub(1),
        _ => lane(ball.center().x),
    }
    .min(last);

    let slot = state.paddle.slot();
    if wanted < slot {
        Some(Command::MoveLeft)
    } else if wanted > slot {
        Some(Command::MoveRight)
    } else {
        None
    }
}
