//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod auth;
pub mod health;
pub mod tournaments;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest("/auth", auth::routes(state.clone()))
        .nest("/users", users::routes(state.clone()))
        .nest("/tournaments", tournaments::routes(state))
}
