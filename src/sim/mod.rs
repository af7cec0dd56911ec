//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed-size step per tick
//! - Seeded RNG only
//! - Stable iteration order (rows by line, targets by column)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod ball;
pub mod geom;
pub mod paddle;
pub mod state;
pub mod targets;
pub mod tick;

pub use autopilot::steer;
pub use ball::{Ball, HitMode};
pub use geom::{Bounded, Edge, Rect, Tinted};
pub use paddle::Paddle;
pub use state::{GamePhase, GameState, Outcome};
pub use targets::{Target, TargetGrid};
pub use tick::{Command, apply_command, tick};
