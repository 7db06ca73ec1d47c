use std::time::Duration;

use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tracing::debug;

use crate::state::AppState;

/// Evicts idle login sessions, games and quizzes every `every`.
pub fn spawn(state: AppState, every: Duration, max_idle: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            let removed = sweep(&state, max_idle).await;
            if removed > 0 {
                debug!(removed, "evicted idle state");
            }
        }
    })
}

pub async fn sweep(state: &AppState, max_idle: Duration) -> usize {
    state.sessions.evict_idle(max_idle).await
        + state.games.evict_idle(max_idle).await
        + state.quizzes.evict_idle(max_idle).await
}
