//! Fixed cadence simulation tick
//!
//! One tick resolves at most one bounce per collision group in a fixed
//! priority order, then moves the ball.

use serde::{Deserialize, Serialize};

use super::ball::HitMode;
use super::geom::Edge;
use super::state::{GameState, Outcome};
use super::targets::Target;
use crate::settings::Color;

/// Discrete player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    TogglePause,
    NewGame,
    /// Stop the host loop; the game state itself ignores it
    Quit,
}

impl Command {
    /// Default key bindings: arrows move, Space pauses, Enter restarts, Escape quits
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "left" | "arrowleft" => Some(Command::MoveLeft),
            "right" | "arrowright" => Some(Command::MoveRight),
            "space" | " " => Some(Command::TogglePause),
            "enter" | "return" => Some(Command::NewGame),
            "escape" | "esc" => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Apply a player command. Returns whether the change should be redrawn.
pub fn apply_command(state: &mut GameState, command: Command) -> bool {
    match command {
        Command::MoveLeft | Command::MoveRight => {
            if state.paused {
                return false;
            }
            if command == Command::MoveLeft {
                state.paddle.move_left();
            } else {
                state.paddle.move_right();
            }
            let playfield = state.playfield;
            state.paddle.place(&playfield);
            true
        }
        Command::TogglePause => {
            if state.is_over() {
                return false;
            }
            state.paused = !state.paused;
            log::debug!("Paused: {}", state.paused);
            true
        }
        Command::NewGame => {
            state.reset();
            true
        }
        Command::Quit => false,
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState) {
    if state.is_over() || state.paused {
        return;
    }

    if state.targets.is_empty() {
        state.paused = true;
        state.outcome = Outcome::Victory;
        log::info!(
            "Victory with score {} after {} ticks",
            state.score,
            state.time_ticks
        );
        return;
    }

    state.time_ticks += 1;
    resolve_collisions(state);

    if state.outcome == Outcome::InProgress {
        let playfield = state.playfield;
        state.ball.advance(&playfield);
    }
}

fn resolve_collisions(state: &mut GameState) {
    let playfield = state.playfield;

    // The paddle rests on the floor, so it must win over the floor check
    if state
        .ball
        .hit_edge(&state.paddle, Edge::Top, HitMode::Outside, &mut state.rng)
        || state
            .ball
            .hit_edge(&state.paddle, Edge::Bottom, HitMode::Outside, &mut state.rng)
    {
        return;
    }

    if state
        .ball
        .hit_edge(&playfield, Edge::Bottom, HitMode::Inside, &mut state.rng)
    {
        if state.settings().practice_mode {
            return;
        }
        lose_life(state);
    }

    if state
        .ball
        .hit_edge(&playfield, Edge::Top, HitMode::Inside, &mut state.rng)
        && !state.hit_top_once
    {
        state.hit_top_once = true;
        let factor = state.settings().paddle_split_factor;
        state.paddle.split_by(factor);
        state.paddle.place(&playfield);
        log::debug!(
            "Top reached, paddle split into {} slots",
            state.paddle.slot_count()
        );
    }

    if let Some(target) = state.targets.find_hit(&mut state.ball, &mut state.rng) {
        score_target(state, &target);
        state.targets.remove(target.line, target.column);
        log::debug!(
            "Target ({}, {}) destroyed, {} left",
            target.line,
            target.column,
            state.targets.len()
        );
        return;
    }

    state
        .ball
        .hit_edge(&playfield, Edge::Left, HitMode::Inside, &mut state.rng);
    state
        .ball
        .hit_edge(&playfield, Edge::Right, HitMode::Inside, &mut state.rng);
}

fn lose_life(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    log::debug!("Ball lost, {} lives left", state.lives);

    if state.lives == 0 {
        state.ball.set_color(Color::Red);
        state.paused = true;
        state.outcome = Outcome::Fail;
        log::info!("Game over with score {}", state.score);
    }
}

/// Credit a destroyed target and apply at most one speed-up
fn score_target(state: &mut GameState, target: &Target) {
    state.score += u64::from(target.points);
    state.hit_count += 1;
    let first_on_line = state.hit_lines.insert(target.line);

    let settings = state.settings();
    let speed_up = settings.hits_for_speed_up.contains(&state.hit_count)
        || (first_on_line && settings.lines_for_speed_up.contains(&target.line));

    if speed_up {
        let factor = settings.ball_speed_up_multiplier;
        state.ball.speed_up(factor);
        log::debug!(
            "Speed up after {} hits: {}",
            state.hit_count,
            state.ball.speed()
        );
    }
}
