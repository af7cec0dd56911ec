//! Brick Breaker entry point
//!
//! Headless runner: the driver thread ticks the game while the main thread
//! plays the part of the input dispatcher, feeding autopilot commands until
//! the game ends. The final frame is printed as JSON.

use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Context;

use brick_breaker::consts::TICK_INTERVAL;
use brick_breaker::sim::{Command, GameState, steer};
use brick_breaker::{Driver, GameSettings, LogRenderer, SharedGame};

/// Give up on an unfinished game after this long
const RUN_LIMIT: Duration = Duration::from_secs(600);
/// How often the main thread checks the ball and steers
const INPUT_POLL: Duration = Duration::from_millis(2);

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Brick Breaker (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => GameSettings::load(&path)
            .with_context(|| format!("could not use settings file {path}"))?,
        None => GameSettings::default(),
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let state = GameState::new(settings, GameState::default_viewport(), seed)?;
    let game = SharedGame::new(state);

    let mut driver = Driver::spawn(game.clone(), TICK_INTERVAL, LogRenderer::new(500));

    let started = Instant::now();
    loop {
        let (command, over) = game.with(|state| (steer(state), state.is_over()));
        if over {
            break;
        }
        if started.elapsed() > RUN_LIMIT {
            log::warn!("Run limit reached, stopping unfinished game");
            break;
        }
        if let Some(command) = command {
            driver.dispatch(command);
        }
        thread::sleep(INPUT_POLL);
    }

    driver.dispatch(Command::Quit);
    driver.stop();

    let frame = game.snapshot();
    println!("{}", serde_json::to_string_pretty(&frame)?);
    Ok(())
}
