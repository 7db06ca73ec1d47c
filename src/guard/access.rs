use serde::Serialize;

use crate::auth::{
    dto::PublicUser,
    role::Role,
    services::{HOME_ROUTE, LOGIN_ROUTE},
};

/// Result of gating a user against a set of roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(&'static str),
}

/// Signed-out callers always go to login. An empty role list admits any
/// signed-in user; otherwise the user's role must be listed.
pub fn authorize(user: Option<&PublicUser>, required: &[Role]) -> Access {
    let Some(user) = user else {
        return Access::Redirect(LOGIN_ROUTE);
    };
    if required.is_empty() || required.contains(&user.role) {
        Access::Allow
    } else {
        Access::Redirect(HOME_ROUTE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Public,
    Protected(&'static [Role]),
}

#[derive(Debug, Clone, Copy)]
pub struct RouteDef {
    pub path: &'static str,
    pub page: &'static str,
    pub guard: Guard,
}

const fn public(path: &'static str, page: &'static str) -> RouteDef {
    RouteDef { path, page, guard: Guard::Public }
}

const fn protected(path: &'static str, page: &'static str, roles: &'static [Role]) -> RouteDef {
    RouteDef { path, page, guard: Guard::Protected(roles) }
}

pub static ROUTES: &[RouteDef] = &[
    public("/", "landing"),
    public("/login", "login"),
    public("/register", "register"),
    public("/cyber-challenges", "cyber_challenges"),
    protected("/dashboard", "dashboard", &[]),
    protected("/courses", "courses", &[]),
    protected("/ctf", "ctf", &[]),
    protected("/paths", "paths", &[]),
    protected("/tools", "tools", &[]),
    protected("/profile", "profile", &[]),
    protected("/analytics", "analytics", &[Role::Admin, Role::Instructor]),
    protected("/users", "users", &[Role::Admin]),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RouteOutcome {
    Render { page: &'static str },
    Redirect { to: &'static str },
    NotFound,
}

/// Drops the query string and any trailing slash, keeping `/` itself.
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

pub fn resolve(path: &str, user: Option<&PublicUser>) -> RouteOutcome {
    let path = normalize(path);
    let Some(route) = ROUTES.iter().find(|r| r.path == path) else {
        return RouteOutcome::NotFound;
    };
    match route.guard {
        Guard::Public => RouteOutcome::Render { page: route.page },
        Guard::Protected(roles) => match authorize(user, roles) {
            Access::Allow => RouteOutcome::Render { page: route.page },
            Access::Redirect(to) => RouteOutcome::Redirect { to },
        },
    }
}
