//! Authentication handlers

mod handler;
pub mod request;
pub mod response;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Auth routes
pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
        .route("/refresh", post(handler::refresh));

    let protected = Router::new()
        .route("/me", get(handler::me))
        .route("/logout", post(handler::logout))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}
