use axum::{extract::State, routing::{get, post}, Json, Router};
use tracing::instrument;

use super::{
    dto::{AuthResponse, LoginRequest, LogoutResponse, PublicUser, RefreshRequest, RegisterRequest},
    extractors::AuthUser,
    services::{self, LOGIN_ROUTE},
};
use crate::{error::AppError, state::AppState};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    services::register(&state, payload).await.map(Json)
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    services::login(&state, payload).await.map(Json)
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    services::refresh(&state, &payload.refresh_token).await.map(Json)
}

#[instrument(skip(state, auth), fields(user_id = %auth.user.id))]
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> Json<LogoutResponse> {
    services::logout(&state, auth.sid).await;
    Json(LogoutResponse {
        redirect: LOGIN_ROUTE,
    })
}

#[instrument(skip(auth), fields(user_id = %auth.user.id))]
pub async fn get_me(auth: AuthUser) -> Json<PublicUser> {
    Json(auth.user)
}
