//! Destructible targets and the grid that holds them
//!
//! Rows are kept in ascending line order; line 0 is drawn lowest. A row with
//! no targets left is dropped, so an empty grid means the game is won.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::geom::{Bounded, Rect, Tinted};
use crate::settings::{Color, GameSettings};

/// A single brick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub line: u32,
    pub column: usize,
    pub points: u32,
    pub color: Color,
    rect: Rect,
}

impl Target {
    pub fn new(line: u32, column: usize, points: u32, color: Color) -> Self {
        Self {
            line,
            column,
            points,
            color,
            rect: Rect::default(),
        }
    }
}

impl Bounded for Target {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

impl Tinted for Target {
    fn color(&self) -> Color {
        self.color
    }
}

/// Pixel layout shared by every target
#[derive(Debug, Clone, Copy, PartialEq)]
struct GridLayout {
    per_line: usize,
    line_count: usize,
    margin: f32,
    top_margin: f32,
    height: f32,
}

impl GridLayout {
    fn rect(&self, line: u32, column: usize, playfield: &Rect) -> Rect {
        let per_line = self.per_line as f32;
        let width = (playfield.width - self.margin * (per_line + 1.0)) / per_line;
        let column = column as f32;
        let rows_above = self.line_count as f32 - line as f32 - 1.0;
        Rect::new(
            playfield.left() + self.margin * (column + 1.0) + width * column,
            playfield.top() + self.top_margin + (self.height + self.margin) * rows_above,
            width,
            self.height,
        )
    }
}

#[derive(Debug, Clone)]
pub struct TargetGrid {
    rows: Vec<Vec<Target>>,
    layout: GridLayout,
}

impl TargetGrid {
    /// Full grid from the settings' line table, laid out in `playfield`
    pub fn from_settings(settings: &GameSettings, playfield: &Rect) -> Self {
        let rows = settings
            .target_lines
            .iter()
            .map(|(&line, style)| {
                (0..settings.targets_per_line)
                    .map(|column| Target::new(line, column, style.points, style.color))
                    .collect()
            })
            .collect();

        let mut grid = Self {
            rows,
            layout: GridLayout {
                per_line: settings.targets_per_line,
                line_count: settings.line_count(),
                margin: settings.target_margin,
                top_margin: settings.target_top_margin,
                height: settings.target_height,
            },
        };
        grid.place(playfield);
        grid
    }

    /// Recompute every target's rectangle for `playfield`
    pub fn place(&mut self, playfield: &Rect) {
        let layout = self.layout;
        for target in self.rows.iter_mut().flatten() {
            target.rect = layout.rect(target.line, target.column, playfield);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Live targets, bottom row first
    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.rows.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// First target the ball hits, bouncing the ball off it
    ///
    /// A falling ball meets the top rows first, so the search runs top-down
    /// when the ball moves down and bottom-up otherwise. At most one target
    /// is resolved per call.
    pub fn find_hit<R: Rng + ?Sized>(&self, ball: &mut Ball, rng: &mut R) -> Option<Target> {
        let top_down = ball.moving_down();
        let mut hit = |row: &Vec<Target>| {
            row.iter()
                .find(|target| ball.hit_target(*target, rng))
                .copied()
        };

        if top_down {
            self.rows.iter().rev().find_map(&mut hit)
        } else {
            self.rows.iter().find_map(&mut hit)
        }
    }

    /// Remove the target at (`line`, `column`), dropping its row if that empties it
    pub fn remove(&mut self, line: u32, column: usize) -> Option<Target> {
        let row_idx = self
            .rows
            .iter()
            .position(|row| row.first().is_some_and(|t| t.line == line))?;
        let row = &mut self.rows[row_idx];
        let idx = row.iter().position(|t| t.column == column)?;
        let removed = row.remove(idx);
        if row.is_empty() {
            self.rows.remove(row_idx);
        }
        Some(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::TargetLine;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::BTreeMap;

    const FIELD: Rect = Rect::new(0.0, 0.0, 500.0, 540.0);

    fn small_settings(lines: u32, per_line: usize) -> GameSettings {
        GameSettings {
            target_lines: (0..lines)
                .map(|line| (line, TargetLine::new(Color::Green, line + 1)))
                .collect::<BTreeMap<_, _>>(),
            targets_per_line: per_line,
            ..Default::default()
        }
    }

    /// Ball centred on `target`, offset vertically by `dy` pixels
    fn ball_near(target: &Target, dy: f32, direction: Vec2) -> Ball {
        let center = target.bounds().center() + Vec2::new(0.0, dy);
        let mut ball = Ball::new(
            Vec2::new(center.x / FIELD.width, center.y / FIELD.height),
            direction,
            0.005,
            7.0,
            20.5,
        );
        ball.place(&FIELD);
        ball
    }

    #[test]
    fn test_default_layout() {
        let grid = TargetGrid::from_settings(&GameSettings::default(), &FIELD);
        assert_eq!(grid.row_count(), 8);
        assert_eq!(grid.len(), 8 * 13);

        let bottom_left = grid.iter().next().unwrap();
        assert_eq!((bottom_left.line, bottom_left.column), (0, 0));
        let r = bottom_left.bounds();
        // width = (500 - 5 * 14) / 13
        assert!((r.width - 430.0 / 13.0).abs() < 1e-4);
        assert_eq!(r.left(), 5.0);
        // line 0 sits seven rows below the top line
        assert_eq!(r.top(), 30.0 + 15.0 * 7.0);
        assert_eq!(r.height, 10.0);

        let top = grid.iter().last().unwrap();
        assert_eq!(top.line, 7);
        assert_eq!(top.bounds().top(), 30.0);
    }

    #[test]
    fn test_remove_drops_empty_rows() {
        let mut grid = TargetGrid::from_settings(&small_settings(2, 2), &FIELD);
        assert!(grid.remove(0, 1).is_some());
        assert_eq!(grid.row_count(), 2);
        assert!(grid.remove(0, 0).is_some());
        assert_eq!(grid.row_count(), 1);
        assert!(!grid.is_empty());

        // Already gone
        assert!(grid.remove(0, 0).is_none());

        grid.remove(1, 0);
        assert!(!grid.is_empty());
        grid.remove(1, 1);
        assert!(grid.is_empty());
        assert_eq!(grid.len(), 0);
    }

    #[test]
    fn test_remove_keeps_remaining_layout() {
        let mut grid = TargetGrid::from_settings(&small_settings(1, 3), &FIELD);
        let third = grid.iter().nth(2).copied().unwrap();
        grid.remove(0, 1);
        let still_third = grid.iter().nth(1).copied().unwrap();
        assert_eq!(still_third.column, 2);
        assert_eq!(still_third.bounds(), third.bounds());
    }

    #[test]
    fn test_find_hit_rising_ball_hits_lowest_row() {
        let grid = TargetGrid::from_settings(&small_settings(2, 1), &FIELD);
        let bottom = grid.iter().next().copied().unwrap();
        // Just under the bottom target, rising
        let mut ball = ball_near(&bottom, 8.0, Vec2::new(0.0, -1.0));
        let mut rng = Pcg32::seed_from_u64(1);

        let hit = grid.find_hit(&mut ball, &mut rng).unwrap();
        assert_eq!(hit.line, 0);
        assert_eq!(hit.points, 1);
        assert!(ball.moving_down());
    }

    #[test]
    fn test_find_hit_falling_ball_searches_top_down() {
        // Two lines whose rectangles overlap, so one ball touches both
        let settings = GameSettings {
            target_margin: -5.0,
            ..small_settings(2, 1)
        };
        let grid = TargetGrid::from_settings(&settings, &FIELD);
        let top = grid.iter().last().copied().unwrap();
        assert_eq!(top.line, 1);
        let mut ball = ball_near(&top, 0.0, Vec2::new(0.0, 1.0));
        let mut rng = Pcg32::seed_from_u64(1);

        let hit = grid.find_hit(&mut ball, &mut rng).unwrap();
        assert_eq!(hit.line, 1);
    }

    #[test]
    fn test_find_hit_resolves_at_most_one() {
        let grid = TargetGrid::from_settings(&small_settings(1, 13), &FIELD);
        let first = grid.iter().next().copied().unwrap();
        let second = grid.iter().nth(1).copied().unwrap();
        // Straddle the gap between the first two targets
        let gap = (first.bounds().right() + second.bounds().left()) / 2.0;
        let dx = gap - first.bounds().center().x;
        let center = first.bounds().center() + Vec2::new(dx, 8.0);
        let mut ball = Ball::new(
            Vec2::new(center.x / FIELD.width, center.y / FIELD.height),
            Vec2::new(0.0, -1.0),
            0.005,
            7.0,
            20.5,
        );
        ball.place(&FIELD);
        assert!(ball.bounds().intersects(&second.bounds().edge(crate::sim::geom::Edge::Bottom)));

        let mut rng = Pcg32::seed_from_u64(1);
        let hit = grid.find_hit(&mut ball, &mut rng).unwrap();
        assert_eq!(hit.column, 0);
        // Bounced once, not once per overlapped target
        assert!(ball.moving_down());
    }

    #[test]
    fn test_find_hit_miss() {
        let grid = TargetGrid::from_settings(&GameSettings::default(), &FIELD);
        let mut ball = Ball::new(Vec2::new(0.5, 0.9), Vec2::new(0.5, -1.0), 0.005, 7.0, 20.5);
        ball.place(&FIELD);
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(grid.find_hit(&mut ball, &mut rng).is_none());
        assert_eq!(ball.direction, Vec2::new(0.5, -1.0));
    }
}
