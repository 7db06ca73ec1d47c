use std::{collections::HashMap, time::Duration};

use tokio::{sync::Mutex, time::Instant};
use tracing::{debug, info};
use uuid::Uuid;

use super::{
    dto::{GameView, StartedGame},
    engine::{CodeBreaker, Difficulty, Outcome},
    timer::GameSession,
};
use crate::error::AppError;

struct Entry {
    session: GameSession,
    /// Login session that created the game, if the caller was signed in.
    owner: Option<Uuid>,
    last_touched: Instant,
}

impl Entry {
    fn touch(&mut self) -> &mut GameSession {
        self.last_touched = Instant::now();
        &mut self.session
    }
}

/// Live CodeBreaker sessions keyed by id.
#[derive(Default)]
pub struct GameRegistry {
    sessions: Mutex<HashMap<Uuid, Entry>>,
}

impl GameRegistry {
    pub async fn create(&self, difficulty: Difficulty, owner: Option<Uuid>) -> GameView {
        let id = Uuid::new_v4();
        let game = CodeBreaker::new(difficulty);
        let view = GameView::of(id, &game);
        let entry = Entry {
            session: GameSession::new(game),
            owner,
            last_touched: Instant::now(),
        };
        self.sessions.lock().await.insert(id, entry);
        info!(game_id = %id, ?difficulty, signed_in = owner.is_some(), "game created");
        view
    }

    pub async fn view(&self, id: Uuid) -> Result<GameView, AppError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or(AppError::NotFound("Game"))?.touch();
        let game = session.game().lock().await;
        Ok(GameView::of(id, &game))
    }

    /// Starts a new round and (re)arms its countdown. Without an explicit
    /// difficulty the session keeps its current one.
    pub async fn start(
        &self,
        id: Uuid,
        difficulty: Option<Difficulty>,
        tick: Duration,
    ) -> Result<StartedGame, AppError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or(AppError::NotFound("Game"))?.touch();

        let (round, started) = {
            let mut game = session.game().lock().await;
            let difficulty = difficulty.unwrap_or_else(|| game.difficulty());
            game.start(difficulty, &mut rand::thread_rng());
            let started = StartedGame {
                state: GameView::of(id, &game),
                sequence: game.sequence().to_vec(),
            };
            (game.round(), started)
        };
        session.restart_countdown(round, tick);

        debug!(
            game_id = %id,
            level = started.state.level,
            length = started.sequence.len(),
            "round started"
        );
        Ok(started)
    }

    pub async fn press(&self, id: Uuid, value: u8) -> Result<GameView, AppError> {
        let game = {
            let mut sessions = self.sessions.lock().await;
            sessions
                .get_mut(&id)
                .ok_or(AppError::NotFound("Game"))?
                .touch()
                .game()
                .clone()
        };
        let mut game = game.lock().await;
        match game.submit(value)? {
            Outcome::Progress => {}
            Outcome::Cleared => {
                info!(game_id = %id, score = game.score(), level = game.level(), "sequence cleared")
            }
            Outcome::Mismatch => info!(game_id = %id, "sequence failed"),
        }
        Ok(GameView::of(id, &game))
    }

    /// Drops the session, stopping its countdown. Returns whether it existed.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.lock().await.remove(&id).is_some();
        if removed {
            info!(game_id = %id, "game discarded");
        }
        removed
    }

    /// Drops every game created under the login session `owner`.
    pub async fn remove_owned_by(&self, owner: Uuid) -> usize {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.owner != Some(owner));
        let removed = before - sessions.len();
        if removed > 0 {
            info!(%owner, removed, "games discarded with their owner");
        }
        removed
    }

    /// Drops games nobody has touched for `max_idle`.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_touched) < max_idle);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{engine::Phase, GameError};

    const TICK: Duration = Duration::from_secs(1);

    #[tokio::test]
    async fn new_game_is_idle_at_level_one() {
        let registry = GameRegistry::default();
        let view = registry.create(Difficulty::Easy, None).await;
        assert_eq!(view.phase, Phase::Idle);
        assert_eq!(view.level, 1);
        assert_eq!(view.target_length, 3);
        assert!(view.revealed.is_none());
    }

    #[tokio::test]
    async fn playing_through_a_round_reveals_sequence() {
        let registry = GameRegistry::default();
        let id = registry.create(Difficulty::Easy, None).await.id;
        let started = registry.start(id, None, TICK).await.unwrap();
        assert_eq!(started.sequence.len(), 3);
        assert_eq!(started.state.phase, Phase::Playing);
        assert!(started.state.revealed.is_none());

        let mut last = None;
        for v in &started.sequence {
            last = Some(registry.press(id, *v).await.unwrap());
        }
        let last = last.unwrap();
        assert_eq!(last.phase, Phase::Success);
        assert_eq!(last.score, 10);
        assert_eq!(last.level, 2);
        assert_eq!(last.revealed.as_deref(), Some(started.sequence.as_slice()));
    }

    #[tokio::test]
    async fn pressing_before_start_is_not_playing() {
        let registry = GameRegistry::default();
        let id = registry.create(Difficulty::Medium, None).await.id;
        let err = registry.press(id, 0).await.unwrap_err();
        assert!(matches!(err, AppError::Game(GameError::NotPlaying)));
    }

    #[tokio::test]
    async fn start_can_switch_difficulty() {
        let registry = GameRegistry::default();
        let id = registry.create(Difficulty::Easy, None).await.id;
        let started = registry.start(id, Some(Difficulty::Hard), TICK).await.unwrap();
        assert_eq!(started.state.difficulty, Difficulty::Hard);
        assert_eq!(started.sequence.len(), 6);
        assert_eq!(started.state.time_left, 12);
    }

    #[tokio::test]
    async fn removed_game_is_gone() {
        let registry = GameRegistry::default();
        let id = registry.create(Difficulty::Easy, None).await.id;
        registry.start(id, None, TICK).await.unwrap();
        assert!(registry.remove(id).await);
        assert!(!registry.remove(id).await);
        assert_eq!(registry.len().await, 0);
        assert!(matches!(
            registry.view(id).await.unwrap_err(),
            AppError::NotFound("Game")
        ));
    }

    #[tokio::test]
    async fn owner_removal_only_hits_that_owner() {
        let registry = GameRegistry::default();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let mine = registry.create(Difficulty::Easy, Some(alice)).await.id;
        registry.start(mine, None, TICK).await.unwrap();
        let theirs = registry.create(Difficulty::Easy, Some(bob)).await.id;
        let anonymous = registry.create(Difficulty::Easy, None).await.id;

        assert_eq!(registry.remove_owned_by(alice).await, 1);
        assert!(registry.view(mine).await.is_err());
        assert!(registry.view(theirs).await.is_ok());
        assert!(registry.view(anonymous).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn idle_games_are_evicted_and_active_ones_kept() {
        let registry = GameRegistry::default();
        let idle = registry.create(Difficulty::Easy, None).await.id;
        let active = registry.create(Difficulty::Easy, None).await.id;

        tokio::time::advance(Duration::from_secs(50)).await;
        registry.view(active).await.unwrap();
        tokio::time::advance(Duration::from_secs(20)).await;

        assert_eq!(registry.evict_idle(Duration::from_secs(60)).await, 1);
        assert!(registry.view(idle).await.is_err());
        assert!(registry.view(active).await.is_ok());
    }
}
