use std::{
    sync::{Arc, Weak},
    time::Duration,
};

use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

use super::engine::CodeBreaker;

/// Spawns the countdown for the round currently started on `game`.
///
/// The task ends when the round stops playing, when a newer round replaces
/// it, or when the game itself is dropped.
pub fn spawn_countdown(game: &Arc<Mutex<CodeBreaker>>, round: u64, period: Duration) -> JoinHandle<()> {
    let game: Weak<Mutex<CodeBreaker>> = Arc::downgrade(game);
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let Some(game) = game.upgrade() else {
                break;
            };
            let mut guard = game.lock().await;
            if guard.round() != round {
                break;
            }
            if !guard.tick() {
                debug!(round, phase = %guard.phase(), "countdown finished");
                break;
            }
        }
    })
}

/// Owns a game plus the countdown task driving it. Dropping the session
/// stops the countdown.
pub struct GameSession {
    game: Arc<Mutex<CodeBreaker>>,
    countdown: Option<JoinHandle<()>>,
}

impl GameSession {
    pub fn new(game: CodeBreaker) -> Self {
        Self {
            game: Arc::new(Mutex::new(game)),
            countdown: None,
        }
    }

    pub fn game(&self) -> &Arc<Mutex<CodeBreaker>> {
        &self.game
    }

    /// Replaces any running countdown with one for `round`.
    pub fn restart_countdown(&mut self, round: u64, period: Duration) {
        self.stop_countdown();
        self.countdown = Some(spawn_countdown(&self.game, round, period));
    }

    pub fn stop_countdown(&mut self) {
        if let Some(handle) = self.countdown.take() {
            handle.abort();
        }
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        self.stop_countdown();
    }
}
