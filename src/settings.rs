//! Game settings
//!
//! An immutable bundle read once when a game (re)starts. Defaults match the
//! classic layout: eight lines of thirteen bricks, three lives, a ten-slot
//! paddle.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, SettingsViolation};

/// Color tag for anything the renderer paints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Color {
    #[default]
    White,
    Black,
    DarkBlue,
    Yellow,
    Green,
    Orange,
    Red,
}

/// Appearance and value shared by every target of one line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetLine {
    pub color: Color,
    pub points: u32,
}

impl TargetLine {
    pub const fn new(color: Color, points: u32) -> Self {
        Self { color, points }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameSettings {
    // === Progress ===
    pub lives_start: u32,
    /// Pixels reserved at the bottom of the viewport for score/lives
    pub info_board_height: f32,
    /// Cumulative hit counts that speed the ball up
    pub hits_for_speed_up: BTreeSet<u32>,
    /// Line indices whose first hit speeds the ball up
    pub lines_for_speed_up: BTreeSet<u32>,
    /// Bounce off the playfield bottom instead of losing a life
    pub practice_mode: bool,

    // === Paddle ===
    pub paddle_height: f32,
    pub paddle_start_slot: usize,
    pub paddle_slot_count: usize,
    /// Applied once, the first time the ball reaches the playfield top
    pub paddle_split_factor: usize,

    // === Ball ===
    pub ball_radius: f32,
    /// Normalized displacement per tick
    pub ball_speed_base: f32,
    pub ball_speed_up_multiplier: f32,
    /// Only the signs and the axis ratio matter (negative is up/left)
    pub ball_start_direction: Vec2,
    /// Relative to the playfield, (0.5, 0.5) is the center
    pub ball_start_position: Vec2,

    // === Targets ===
    /// Line index -> appearance; line 0 is drawn lowest
    pub target_lines: BTreeMap<u32, TargetLine>,
    pub targets_per_line: usize,
    pub target_margin: f32,
    pub target_top_margin: f32,
    pub target_height: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        let target_lines = [
            Color::Yellow,
            Color::Yellow,
            Color::Green,
            Color::Green,
            Color::Orange,
            Color::Orange,
            Color::Red,
            Color::Red,
        ]
        .into_iter()
        .enumerate()
        .map(|(line, color)| {
            let points = match color {
                Color::Yellow => 1,
                Color::Green => 3,
                Color::Orange => 5,
                _ => 7,
            };
            (line as u32, TargetLine::new(color, points))
        })
        .collect();

        Self {
            lives_start: 3,
            info_board_height: 60.0,
            hits_for_speed_up: BTreeSet::from([4, 12]),
            lines_for_speed_up: BTreeSet::from([4, 6]),
            practice_mode: false,

            paddle_height: 10.0,
            paddle_start_slot: 5,
            paddle_slot_count: 10,
            paddle_split_factor: 2,

            ball_radius: 7.0,
            ball_speed_base: 0.005,
            ball_speed_up_multiplier: 1.2,
            ball_start_direction: Vec2::new(0.5, 1.0),
            ball_start_position: Vec2::new(0.5, 0.5),

            target_lines,
            targets_per_line: 13,
            target_margin: 5.0,
            target_top_margin: 30.0,
            target_height: 10.0,
        }
    }
}

impl GameSettings {
    /// Parse settings from JSON and validate them. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Largest pixel distance the ball may travel in one tick
    ///
    /// Keeps the ball from tunnelling through a target row.
    pub fn ball_max_step(&self) -> f32 {
        self.target_height + self.ball_radius * 1.5
    }

    /// Number of target lines (rows) in a fresh grid
    pub fn line_count(&self) -> usize {
        self.target_lines.len()
    }

    pub fn validate(&self) -> Result<(), SettingsViolation> {
        let dimensions = [
            ("infoBoardHeight", self.info_board_height),
            ("paddleHeight", self.paddle_height),
            ("ballRadius", self.ball_radius),
            ("targetMargin", self.target_margin),
            ("targetTopMargin", self.target_top_margin),
            ("targetHeight", self.target_height),
        ];
        for (field, value) in dimensions {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsViolation::InvalidDimension { field, value });
            }
        }
        // The ball must be allowed to move at all
        if self.ball_max_step() <= 0.0 {
            return Err(SettingsViolation::InvalidDimension {
                field: "ballRadius",
                value: self.ball_radius,
            });
        }

        if !(self.ball_speed_base.is_finite() && self.ball_speed_base > 0.0) {
            return Err(SettingsViolation::BallSpeedNotPositive {
                value: self.ball_speed_base,
            });
        }
        if !(self.ball_speed_up_multiplier.is_finite() && self.ball_speed_up_multiplier > 1.0) {
            return Err(SettingsViolation::SpeedUpMultiplierTooSmall {
                value: self.ball_speed_up_multiplier,
            });
        }

        let start = self.ball_start_position;
        if !(0.0..=1.0).contains(&start.x) || !(0.0..=1.0).contains(&start.y) {
            return Err(SettingsViolation::BallStartOutOfField {
                x: start.x,
                y: start.y,
            });
        }
        if self.ball_start_direction.x == 0.0 && self.ball_start_direction.y == 0.0 {
            return Err(SettingsViolation::BallDirectionZero);
        }

        if self.paddle_slot_count == 0 {
            return Err(SettingsViolation::PaddleSlotCountZero);
        }
        if self.paddle_start_slot >= self.paddle_slot_count {
            return Err(SettingsViolation::PaddleStartOutOfRange {
                start: self.paddle_start_slot,
                count: self.paddle_slot_count,
            });
        }
        if self.paddle_split_factor == 0 {
            return Err(SettingsViolation::PaddleSplitFactorZero);
        }

        if self.targets_per_line == 0 {
            return Err(SettingsViolation::TargetsPerLineZero);
        }
        if self.target_lines.is_empty() {
            return Err(SettingsViolation::NoTargetLines);
        }
        // Keys are sorted, so a contiguous 0..n range means key i sits at position i
        for (expected, &line) in (0u32..).zip(self.target_lines.keys()) {
            if line != expected {
                return Err(SettingsViolation::TargetLinesNotContiguous { missing: expected });
            }
        }

        Ok(())
    }
}
