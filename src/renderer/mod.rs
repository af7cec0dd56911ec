//! Rendering seam
//!
//! The simulation never draws. After each tick the host captures a `Frame`
//! and hands it to a `Renderer`.

pub mod frame;

pub use frame::{Cell, Frame, InfoPanel, Sprite};

/// Anything that can present a frame
pub trait Renderer {
    fn draw(&mut self, frame: &Frame);
}

/// Headless renderer that logs a one-line summary every `every` frames
/// and on every change of outcome
#[derive(Debug)]
pub struct LogRenderer {
    every: u64,
    frames: u64,
    last_outcome: Option<crate::sim::Outcome>,
}

impl LogRenderer {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            frames: 0,
            last_outcome: None,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LogRenderer {
    fn draw(&mut self, frame: &Frame) {
        self.frames += 1;
        let changed = self.last_outcome != Some(frame.info.outcome);
        self.last_outcome = Some(frame.info.outcome);

        if changed || self.frames.is_multiple_of(self.every) {
            log::info!(
                "tick {}: score {} lives {} targets {} ball ({:.0}, {:.0}){}",
                frame.tick,
                frame.info.score,
                frame.info.lives,
                frame.targets.len(),
                frame.ball.rect.center().x,
                frame.ball.rect.center().y,
                frame.info.result.map(|r| format!(" - {r}")).unwrap_or_default()
            );
        }
    }
}
