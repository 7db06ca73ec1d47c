use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use super::{claims::TokenKind, dto::PublicUser, jwt::JwtKeys, services::AuthError};
use crate::{error::AppError, state::AppState, storage};

/// Authenticated caller: a valid access token whose session still holds a
/// stored user.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub sid: Uuid,
    pub user: PublicUser,
}

/// Caller that may or may not be signed in. Any authentication failure is
/// treated as anonymous.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthError::Unauthenticated("Missing Authorization header"))?;

        // Expect "Bearer <token>"
        let token = auth_header
            .strip_prefix("Bearer ")
            .or_else(|| auth_header.strip_prefix("bearer "))
            .ok_or(AuthError::Unauthenticated("Invalid Authorization header"))?;

        let keys = JwtKeys::from_ref(state);
        let claims = match keys.verify(token) {
            Ok(c) => c,
            Err(_) => {
                warn!("invalid or expired token");
                return Err(AuthError::Unauthenticated("Invalid or expired token").into());
            }
        };

        if claims.kind != TokenKind::Access {
            return Err(AuthError::Unauthenticated("Access token required").into());
        }

        let user = storage::load_user(state.sessions.as_ref(), claims.sid)
            .await
            .filter(|u| u.id == claims.sub)
            .ok_or(AuthError::Unauthenticated("Session expired"))?;

        Ok(AuthUser {
            sid: claims.sid,
            user,
        })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(
            AuthUser::from_request_parts(parts, state).await.ok(),
        ))
    }
}
