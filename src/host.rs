//! Shared game state and the fixed-cadence driver
//!
//! Every read and write of the game goes through one mutex, so a frame is
//! always captured between two whole ticks, never in the middle of one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::renderer::{Frame, Renderer};
use crate::sim::{Command, GameState, Rect, apply_command, tick};

/// Cloneable handle to the single game state
#[derive(Debug, Clone)]
pub struct SharedGame {
    inner: Arc<Mutex<GameState>>,
}

impl SharedGame {
    pub fn new(state: GameState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, GameState> {
        // A panic mid-tick leaves the state consistent enough to keep drawing
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run one simulation tick
    pub fn tick(&self) {
        tick(&mut self.lock());
    }

    /// Apply a player command. Returns whether a redraw is warranted.
    pub fn apply(&self, command: Command) -> bool {
        apply_command(&mut self.lock(), command)
    }

    pub fn resize(&self, viewport: Rect) {
        self.lock().resize(viewport);
    }

    pub fn snapshot(&self) -> Frame {
        Frame::capture(&self.lock())
    }

    /// Run `f` with exclusive access to the state
    pub fn with<T>(&self, f: impl FnOnce(&mut GameState) -> T) -> T {
        f(&mut self.lock())
    }
}

/// Background thread that ticks the game and redraws after every tick
#[derive(Debug)]
pub struct Driver {
    game: SharedGame,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Driver {
    pub fn spawn<R>(game: SharedGame, interval: Duration, mut renderer: R) -> Self
    where
        R: Renderer + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let handle = {
            let game = game.clone();
            let running = Arc::clone(&running);
            thread::spawn(move || {
                log::info!("Driver started ({:?} per tick)", interval);
                while running.load(Ordering::Acquire) {
                    thread::sleep(interval);
                    game.tick();
                    renderer.draw(&game.snapshot());
                }
                log::info!("Driver stopped");
            })
        };

        Self {
            game,
            running,
            handle: Some(handle),
        }
    }

    pub fn game(&self) -> &SharedGame {
        &self.game
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Forward a command; returns false once the driver should shut down
    pub fn dispatch(&self, command: Command) -> bool {
        if command == Command::Quit {
            self.running.store(false, Ordering::Release);
            return false;
        }
        self.game.apply(command);
        true
    }

    /// Stop ticking and wait for the thread to finish
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            log::error!("Driver thread panicked");
        }
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameSettings;
    use std::sync::mpsc;

    fn shared() -> SharedGame {
        SharedGame::new(
            GameState::new(GameSettings::default(), GameState::default_viewport(), 5).unwrap(),
        )
    }

    /// Sends every frame's tick number down a channel
    struct ChannelRenderer(mpsc::Sender<u64>);

    impl Renderer for ChannelRenderer {
        fn draw(&mut self, frame: &Frame) {
            let _ = self.0.send(frame.tick);
        }
    }

    #[test]
    fn test_shared_game_ticks_and_snapshots() {
        let game = shared();
        let before = game.snapshot();
        game.tick();
        let after = game.snapshot();
        assert_eq!(after.tick, before.tick + 1);
        assert_ne!(after.ball.rect, before.ball.rect);
    }

    #[test]
    fn test_apply_through_handle() {
        let game = shared();
        let other = game.clone();
        assert!(other.apply(Command::MoveRight));
        assert_eq!(game.with(|s| s.paddle.slot()), 6);
        assert!(game.apply(Command::TogglePause));
        assert!(game.snapshot().info.paused);
    }

    #[test]
    fn test_resize_through_handle() {
        let game = shared();
        game.resize(Rect::new(0.0, 0.0, 800.0, 660.0));
        assert_eq!(game.snapshot().playfield.rect, Rect::new(0.0, 0.0, 800.0, 600.0));
    }

    #[test]
    fn test_driver_ticks_in_order_and_quits() {
        let (tx, rx) = mpsc::channel();
        let mut driver = Driver::spawn(shared(), Duration::from_millis(1), ChannelRenderer(tx));

        let first: Vec<u64> = rx.iter().take(5).collect();
        assert_eq!(first, vec![1, 2, 3, 4, 5]);

        assert!(driver.dispatch(Command::MoveLeft));
        assert!(!driver.dispatch(Command::Quit));
        assert!(!driver.is_running());
        driver.stop();
        assert!(driver.game().snapshot().tick >= 5);
    }

    #[test]
    fn test_paused_driver_keeps_drawing_same_tick() {
        let (tx, rx) = mpsc::channel();
        let game = shared();
        game.apply(Command::TogglePause);
        let driver = Driver::spawn(game, Duration::from_millis(1), ChannelRenderer(tx));
        let frames: Vec<u64> = rx.iter().take(3).collect();
        assert_eq!(frames, vec![0, 0, 0]);
        drop(driver);
    }
}
