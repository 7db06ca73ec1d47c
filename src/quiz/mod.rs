use crate::state::AppState;
use axum::{http::StatusCode, Router};

pub mod bank;
pub mod dto;
pub mod engine;
pub mod handlers;
pub mod service;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("Please select an answer before submitting.")]
    NoAnswerSelected,
    #[error("Answer does not fit the current question")]
    InvalidAnswer,
    #[error("Answer already submitted")]
    AlreadyChecked,
    #[error("Submit an answer before moving on")]
    NotChecked,
    #[error("Quiz already completed")]
    Completed,
}

impl QuizError {
    pub fn status(&self) -> StatusCode {
        match self {
            QuizError::NoAnswerSelected | QuizError::InvalidAnswer => StatusCode::BAD_REQUEST,
            QuizError::AlreadyChecked | QuizError::NotChecked | QuizError::Completed => {
                StatusCode::CONFLICT
            }
        }
    }
}

pub fn router() -> Router<AppState> {
    handlers::quiz_routes()
}
