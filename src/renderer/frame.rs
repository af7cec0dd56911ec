//! Immutable per-frame snapshot of everything the renderer draws

use serde::Serialize;

use crate::settings::Color;
use crate::sim::{Bounded, GameState, Outcome, Rect, Tinted};

pub const PAUSED_TEXT: &str = "Paused";
pub const VICTORY_TEXT: &str = "Congratulations - You won the game!";
pub const FAIL_TEXT: &str = "You failed the game!";
pub const CONTROLS_TEXT: &str = "Space - Pause, Enter - New game, Esc - Quit";

/// A filled rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sprite {
    pub rect: Rect,
    pub color: Color,
}

impl Sprite {
    fn of<T: Bounded + Tinted>(entity: &T) -> Self {
        Self {
            rect: entity.bounds(),
            color: entity.color(),
        }
    }
}

/// A live target cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cell {
    pub rect: Rect,
    pub color: Color,
    pub points: u32,
}

/// Contents of the info board
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoPanel {
    pub score: u64,
    pub lives: u32,
    pub paused: bool,
    pub outcome: Outcome,
    pub hit_top: bool,
    /// "Paused" while paused
    pub status: Option<&'static str>,
    /// Win or fail message once the game is over
    pub result: Option<&'static str>,
    pub controls: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub tick: u64,
    pub playfield: Sprite,
    pub info_board: Sprite,
    pub info: InfoPanel,
    pub paddle: Sprite,
    pub ball: Sprite,
    pub targets: Vec<Cell>,
}

impl Frame {
    pub fn capture(state: &GameState) -> Self {
        let result = match state.outcome {
            Outcome::Victory => Some(VICTORY_TEXT),
            Outcome::Fail => Some(FAIL_TEXT),
            Outcome::InProgress => None,
        };

        Self {
            tick: state.time_ticks,
            playfield: Sprite {
                rect: state.playfield,
                color: Color::Black,
            },
            info_board: Sprite {
                rect: state.info_board,
                color: Color::DarkBlue,
            },
            info: InfoPanel {
                score: state.score,
                lives: state.lives,
                paused: state.paused,
                outcome: state.outcome,
                hit_top: state.hit_top_once,
                status: state.paused.then_some(PAUSED_TEXT),
                result,
                controls: CONTROLS_TEXT,
            },
            paddle: Sprite::of(&state.paddle),
            ball: Sprite::of(&state.ball),
            targets: state
                .targets
                .iter()
                .map(|t| Cell {
                    rect: t.bounds(),
                    color: t.color(),
                    points: t.points,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameSettings;
    use crate::sim::{Command, apply_command};

    fn new_game() -> GameState {
        GameState::new(GameSettings::default(), GameState::default_viewport(), 3).unwrap()
    }

    #[test]
    fn test_capture_fresh_game() {
        let frame = Frame::capture(&new_game());
        assert_eq!(frame.targets.len(), 104);
        assert_eq!(frame.info.lives, 3);
        assert_eq!(frame.info.status, None);
        assert_eq!(frame.info.result, None);
        assert_eq!(frame.info.controls, CONTROLS_TEXT);
        assert_eq!(frame.ball.color, Color::White);
        assert_eq!(frame.info_board.rect, Rect::new(0.0, 540.0, 500.0, 60.0));
        // Bottom row first, yellow and worth one point
        assert_eq!(frame.targets[0].color, Color::Yellow);
        assert_eq!(frame.targets[0].points, 1);
    }

    #[test]
    fn test_capture_paused_and_failed() {
        let mut state = new_game();
        apply_command(&mut state, Command::TogglePause);
        assert_eq!(Frame::capture(&state).info.status, Some(PAUSED_TEXT));

        state.outcome = Outcome::Fail;
        state.ball.set_color(Color::Red);
        let frame = Frame::capture(&state);
        assert_eq!(frame.info.result, Some(FAIL_TEXT));
        assert_eq!(frame.ball.color, Color::Red);
    }

    #[test]
    fn test_frame_serializes() {
        let json = serde_json::to_string(&Frame::capture(&new_game())).unwrap();
        assert!(json.contains("\"score\":0"));
        assert!(json.contains("Yellow"));
    }
}
