//! Brick Breaker - a paddle-and-ball arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball motion, collisions, game state)
//! - `settings`: Validated game configuration
//! - `renderer`: Frame snapshots handed to whatever draws the game
//! - `host`: Shared state and the fixed-cadence driver thread

pub mod error;
pub mod host;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Error, SettingsViolation};
pub use host::{Driver, SharedGame};
pub use renderer::{Frame, LogRenderer, Renderer};
pub use settings::{Color, GameSettings, TargetLine};

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Fixed simulation cadence (one tick every 10 ms)
    pub const TICK_INTERVAL: Duration = Duration::from_millis(10);

    /// Default client area in pixels, used until the host reports a real size
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 500.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 600.0;

    /// Upper bound on speed/bounds corrections in a single ball advance
    pub const MAX_ADVANCE_CORRECTIONS: u32 = 32;

    /// Magnitude of the random perturbation added to a bounced axis
    pub const BOUNCE_JITTER: f32 = 0.01;
}
