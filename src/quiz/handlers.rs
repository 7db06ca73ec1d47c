use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::dto::{QuizView, SelectRequest};
use crate::{error::AppError, state::AppState};

pub fn quiz_routes() -> Router<AppState> {
    Router::new()
        .route("/challenges/quiz", post(create_quiz))
        .route("/challenges/quiz/:id", get(get_quiz).delete(delete_quiz))
        .route("/challenges/quiz/:id/select", post(select_answer))
        .route("/challenges/quiz/:id/check", post(check_answer))
        .route("/challenges/quiz/:id/next", post(next_question))
        .route("/challenges/quiz/:id/reset", post(reset_quiz))
}

#[instrument(skip(state))]
pub async fn create_quiz(State(state): State<AppState>) -> (StatusCode, Json<QuizView>) {
    (StatusCode::CREATED, Json(state.quizzes.create().await))
}

#[instrument(skip(state))]
pub async fn get_quiz(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuizView>, AppError> {
    state.quizzes.view(id).await.map(Json)
}

#[instrument(skip(state, body))]
pub async fn select_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SelectRequest>,
) -> Result<Json<QuizView>, AppError> {
    state
        .quizzes
        .update(id, |quiz| Ok(quiz.select(body.answer)?))
        .await
        .map(Json)
}

#[instrument(skip(state))]
pub async fn check_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuizView>, AppError> {
    state
        .quizzes
        .update(id, |quiz| {
            let feedback = quiz.check()?;
            debug!(quiz_id = %id, correct = feedback.correct, "answer checked");
            Ok(())
        })
        .await
        .map(Json)
}

#[instrument(skip(state))]
pub async fn next_question(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuizView>, AppError> {
    state
        .quizzes
        .update(id, |quiz| Ok(quiz.next()?))
        .await
        .map(Json)
}

#[instrument(skip(state))]
pub async fn reset_quiz(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuizView>, AppError> {
    state
        .quizzes
        .update(id, |quiz| {
            quiz.reset();
            Ok(())
        })
        .await
        .map(Json)
}

#[instrument(skip(state))]
pub async fn delete_quiz(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.quizzes.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Quiz"))
    }
}
