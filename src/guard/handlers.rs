use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{
    access::{self, RouteOutcome},
    navigation::{self, NavItem},
};
use crate::{
    auth::{
        extractors::{AuthUser, MaybeAuthUser},
        role::Role,
    },
    state::AppState,
    storage,
};

pub fn guard_routes() -> Router<AppState> {
    Router::new()
        .route("/routes/resolve", get(resolve_route))
        .route("/navigation", get(navigation_menu))
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    pub role: Role,
    pub items: Vec<NavItem>,
}

#[instrument(skip(caller))]
pub async fn resolve_route(
    caller: MaybeAuthUser,
    Query(query): Query<ResolveQuery>,
) -> Json<RouteOutcome> {
    let user = caller.0.as_ref().map(|a| &a.user);
    let outcome = access::resolve(&query.path, user);
    debug!(path = %query.path, ?outcome, "route resolved");
    Json(outcome)
}

#[instrument(skip(state, auth), fields(user_id = %auth.user.id))]
pub async fn navigation_menu(State(state): State<AppState>, auth: AuthUser) -> Json<NavigationResponse> {
    let role = storage::stored_role(state.sessions.as_ref(), auth.sid).await;
    Json(NavigationResponse {
        role,
        items: navigation::menu_for(role),
    })
}
