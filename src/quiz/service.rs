use std::{collections::HashMap, time::Duration};

use tokio::{sync::RwLock, time::Instant};
use tracing::info;
use uuid::Uuid;

use super::{bank::QUESTIONS, dto::QuizView, engine::QuizAttempt};
use crate::error::AppError;

struct Entry {
    attempt: QuizAttempt,
    last_touched: Instant,
}

/// Live quiz attempts keyed by id.
#[derive(Default)]
pub struct QuizRegistry {
    attempts: RwLock<HashMap<Uuid, Entry>>,
}

impl QuizRegistry {
    pub async fn create(&self) -> QuizView {
        let id = Uuid::new_v4();
        let attempt = QuizAttempt::new(QUESTIONS);
        let view = QuizView::of(id, &attempt);
        let entry = Entry {
            attempt,
            last_touched: Instant::now(),
        };
        self.attempts.write().await.insert(id, entry);
        info!(quiz_id = %id, "quiz created");
        view
    }

    pub async fn view(&self, id: Uuid) -> Result<QuizView, AppError> {
        self.update(id, |_| Ok(())).await
    }

    /// Applies `f` to the attempt and returns the resulting view.
    pub async fn update<F>(&self, id: Uuid, f: F) -> Result<QuizView, AppError>
    where
        F: FnOnce(&mut QuizAttempt) -> Result<(), AppError>,
    {
        let mut attempts = self.attempts.write().await;
        let entry = attempts.get_mut(&id).ok_or(AppError::NotFound("Quiz"))?;
        entry.last_touched = Instant::now();
        let attempt = &mut entry.attempt;
        let was_completed = attempt.is_completed();
        f(attempt)?;
        if attempt.is_completed() && !was_completed {
            info!(quiz_id = %id, score = attempt.score(), total = attempt.total(), "quiz completed");
        }
        Ok(QuizView::of(id, attempt))
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.attempts.write().await.remove(&id).is_some()
    }

    /// Drops attempts nobody has touched for `max_idle`.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let now = Instant::now();
        let mut attempts = self.attempts.write().await;
        let before = attempts.len();
        attempts.retain(|_, entry| now.duration_since(entry.last_touched) < max_idle);
        before - attempts.len()
    }

    pub async fn len(&self) -> usize {
        self.attempts.read().await.len()
    }
}
