use axum::{extract::FromRef, http::StatusCode};
use lazy_static::lazy_static;
use regex::Regex;
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use super::{
    dto::{AuthResponse, LoginRequest, PublicUser, RegisterRequest},
    jwt::JwtKeys,
    repo_types::User,
    role::Role,
};
use crate::{error::AppError, state::AppState, storage};

/// Where the client lands after a successful login or register.
pub const HOME_ROUTE: &str = "/dashboard";
/// Where unauthenticated clients are sent.
pub const LOGIN_ROUTE: &str = "/login";

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Password must be at least 8 characters")]
    PasswordTooShort,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("User already exists")]
    UserExists,
    #[error("{0}")]
    Unauthenticated(&'static str),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingFields | AuthError::InvalidEmail | AuthError::PasswordTooShort => {
                StatusCode::BAD_REQUEST
            }
            AuthError::InvalidCredentials | AuthError::Unauthenticated(_) => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::UserExists => StatusCode::CONFLICT,
        }
    }
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub async fn login(state: &AppState, payload: LoginRequest) -> Result<AuthResponse, AppError> {
    let email = normalize_email(&payload.email);
    if email.is_empty() || payload.password.is_empty() {
        return Err(AuthError::MissingFields.into());
    }
    if !is_valid_email(&email) {
        warn!(%email, "invalid email");
        return Err(AuthError::InvalidEmail.into());
    }

    tokio::time::sleep(state.config.auth_delay).await;

    let Some(user) = state.users.find_by_email(&email).await else {
        warn!(%email, "login unknown email");
        return Err(AuthError::InvalidCredentials.into());
    };
    if !user.password_matches(&payload.password)? {
        warn!(%email, user_id = %user.id, "login invalid password");
        return Err(AuthError::InvalidCredentials.into());
    }

    let resp = open_session(state, &user).await?;
    info!(user_id = %user.id, role = %user.role, "user logged in");
    Ok(resp)
}

pub async fn register(
    state: &AppState,
    payload: RegisterRequest,
) -> Result<AuthResponse, AppError> {
    let name = payload.name.trim().to_string();
    let email = normalize_email(&payload.email);
    if name.is_empty() || email.is_empty() || payload.password.is_empty() {
        return Err(AuthError::MissingFields.into());
    }
    if !is_valid_email(&email) {
        warn!(%email, "invalid email");
        return Err(AuthError::InvalidEmail.into());
    }
    if payload.password.len() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(AuthError::PasswordTooShort.into());
    }

    tokio::time::sleep(state.config.auth_delay).await;

    if state.users.find_by_email(&email).await.is_some() {
        warn!(%email, "email already registered");
        return Err(AuthError::UserExists.into());
    }

    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let user = User::with_password(
        format!("student-{millis}"),
        name,
        email,
        Role::Student,
        &payload.password,
    )?;
    // A concurrent register may have claimed the email since the lookup.
    if !state.users.insert(user.clone()).await {
        warn!(email = %user.email, "email already registered");
        return Err(AuthError::UserExists.into());
    }

    let resp = open_session(state, &user).await?;
    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(resp)
}

/// Clears the session's stored user and drops the games it started. Tokens
/// bound to the session stop working.
pub async fn logout(state: &AppState, sid: Uuid) {
    storage::clear_user(state.sessions.as_ref(), sid).await;
    let games = state.games.remove_owned_by(sid).await;
    info!(%sid, games, "user logged out");
}

pub async fn refresh(state: &AppState, refresh_token: &str) -> Result<AuthResponse, AppError> {
    let keys = JwtKeys::from_ref(state);
    let claims = keys.verify_refresh(refresh_token).map_err(|e| {
        warn!(error = %e, "refresh rejected");
        AuthError::Unauthenticated("Invalid or expired token")
    })?;

    let user = storage::load_user(state.sessions.as_ref(), claims.sid)
        .await
        .ok_or(AuthError::Unauthenticated("Session expired"))?;

    Ok(AuthResponse {
        access_token: keys.sign_access(&user.id, claims.sid)?,
        refresh_token: keys.sign_refresh(&user.id, claims.sid)?,
        user,
        redirect: HOME_ROUTE,
    })
}

async fn open_session(state: &AppState, user: &User) -> Result<AuthResponse, AppError> {
    let sid = Uuid::new_v4();
    let public = PublicUser::from(user);
    storage::persist_user(state.sessions.as_ref(), sid, &public).await?;

    let keys = JwtKeys::from_ref(state);
    Ok(AuthResponse {
        access_token: keys.sign_access(&user.id, sid)?,
        refresh_token: keys.sign_refresh(&user.id, sid)?,
        user: public,
        redirect: HOME_ROUTE,
    })
}
