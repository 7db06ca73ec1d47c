use crate::state::AppState;
use axum::{http::StatusCode, Router};

pub mod dto;
pub mod engine;
pub mod handlers;
pub mod service;
pub mod timer;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Game is not in progress")]
    NotPlaying,
    #[error("Unknown button {0}")]
    InvalidButton(u8),
    #[error("Unknown difficulty `{0}`")]
    UnknownDifficulty(String),
}

impl GameError {
    pub fn status(&self) -> StatusCode {
        match self {
            GameError::NotPlaying => StatusCode::CONFLICT,
            GameError::InvalidButton(_) | GameError::UnknownDifficulty(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

pub fn router() -> Router<AppState> {
    handlers::game_routes()
}
