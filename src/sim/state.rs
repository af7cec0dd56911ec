//! Game state and core simulation types
//!
//! A `GameState` owns every entity of one game. Starting a new game rebuilds
//! all of them from the settings; nothing outlives the state that made it.

use std::collections::BTreeSet;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::geom::Rect;
use super::paddle::Paddle;
use super::targets::TargetGrid;
use crate::consts::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
use crate::error::Error;
use crate::settings::GameSettings;

/// How the current game ended, if it has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Outcome {
    #[default]
    InProgress,
    Victory,
    Fail,
}

/// Current phase of gameplay, derived from the pause flag and the outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Paused,
    /// Every target destroyed
    Victory,
    /// Out of lives
    Fail,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    settings: GameSettings,
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Whole client area in pixels
    pub viewport: Rect,
    /// Area the ball moves in (viewport minus the info board)
    pub playfield: Rect,
    /// Strip at the bottom of the viewport showing score and lives
    pub info_board: Rect,
    pub ball: Ball,
    pub paddle: Paddle,
    pub targets: TargetGrid,
    pub score: u64,
    pub lives: u32,
    pub paused: bool,
    pub outcome: Outcome,
    /// Latched the first time the ball reaches the playfield top
    pub hit_top_once: bool,
    /// Lines that have already been hit at least once
    pub hit_lines: BTreeSet<u32>,
    /// Targets destroyed this game
    pub hit_count: u32,
    /// Simulation ticks run this game
    pub time_ticks: u64,
}

impl GameState {
    /// Start a game with validated `settings` in `viewport`
    pub fn new(settings: GameSettings, viewport: Rect, seed: u64) -> Result<Self, Error> {
        settings.validate()?;

        let (playfield, info_board) = split_viewport(&viewport, settings.info_board_height);
        let state = Self {
            ball: Ball::from_settings(&settings, &playfield),
            paddle: Paddle::from_settings(&settings, &playfield),
            targets: TargetGrid::from_settings(&settings, &playfield),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            playfield,
            info_board,
            score: 0,
            lives: settings.lives_start,
            paused: false,
            outcome: Outcome::InProgress,
            hit_top_once: false,
            hit_lines: BTreeSet::new(),
            hit_count: 0,
            time_ticks: 0,
            settings,
        };

        log::info!(
            "New game: {} targets in {} lines, {} lives, seed {}",
            state.targets.len(),
            state.targets.row_count(),
            state.lives,
            seed
        );
        Ok(state)
    }

    /// The client area used before the host reports a real size
    pub fn default_viewport() -> Rect {
        Rect::new(0.0, 0.0, DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT)
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Throw away the current game and start a fresh one
    ///
    /// The RNG keeps running, so consecutive games bounce differently.
    pub fn reset(&mut self) {
        let playfield = self.playfield;
        self.ball = Ball::from_settings(&self.settings, &playfield);
        self.paddle = Paddle::from_settings(&self.settings, &playfield);
        self.targets = TargetGrid::from_settings(&self.settings, &playfield);
        self.score = 0;
        self.lives = self.settings.lives_start;
        self.paused = false;
        self.outcome = Outcome::InProgress;
        self.hit_top_once = false;
        self.hit_lines.clear();
        self.hit_count = 0;
        self.time_ticks = 0;
        log::info!("Game reset ({} targets)", self.targets.len());
    }

    /// Lay everything out again for a new client area
    pub fn resize(&mut self, viewport: Rect) {
        let (playfield, info_board) = split_viewport(&viewport, self.settings.info_board_height);
        self.viewport = viewport;
        self.playfield = playfield;
        self.info_board = info_board;
        self.ball.place(&playfield);
        self.paddle.place(&playfield);
        self.targets.place(&playfield);
    }

    pub fn is_over(&self) -> bool {
        matches!(self.outcome, Outcome::Victory | Outcome::Fail)
    }

    pub fn phase(&self) -> GamePhase {
        match self.outcome {
            Outcome::Victory => GamePhase::Victory,
            Outcome::Fail => GamePhase::Fail,
            Outcome::InProgress if self.paused => GamePhase::Paused,
            Outcome::InProgress => GamePhase::Playing,
        }
    }
}

/// Split the viewport into the playfield and the info board strip below it
fn split_viewport(viewport: &Rect, info_height: f32) -> (Rect, Rect) {
    let info_height = info_height.min(viewport.height);
    let playfield = Rect::new(
        viewport.x,
        viewport.y,
        viewport.width,
        viewport.height - info_height,
    );
    let info_board = Rect::new(
        viewport.x,
        viewport.bottom() - info_height,
        viewport.width,
        info_height,
    );
    (playfield, info_board)
}
