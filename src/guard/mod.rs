//! Role-based route guarding and the role-filtered sidebar menu.

use crate::state::AppState;
use axum::Router;

pub mod access;
pub mod handlers;
pub mod navigation;

pub fn router() -> Router<AppState> {
    handlers::guard_routes()
}
