//! User administration handlers

mod handler;
pub mod request;
pub mod response;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// User administration routes (all authenticated)
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_users))
        .route("/{id}/role", put(handler::update_role))
        .route("/{id}/ban", put(handler::ban_user))
        .route("/{id}/ban-manage", put(handler::manage_ban_request))
        .route("/{id}/unban", put(handler::unban_user))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
