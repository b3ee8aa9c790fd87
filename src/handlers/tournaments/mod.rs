//! Tournament management handlers

mod handler;
pub mod request;
pub mod response;

use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Tournament routes.
///
/// Listing, the aggregate view, and the chat log are public; every
/// mutation sits behind the authentication middleware.
pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(handler::list_tournaments))
        .route("/{id}", get(handler::get_tournament))
        .route("/{id}/chat", get(handler::get_messages));

    let protected = Router::new()
        .route("/", post(handler::create_tournament))
        .route("/{id}", put(handler::update_tournament))
        .route("/{id}/status", patch(handler::update_status))
        .route("/{id}/approve", post(handler::approve_tournament))
        .route("/{id}/reject", post(handler::reject_tournament))
        .route("/{id}/join", post(handler::join_tournament))
        .route("/{id}/declare-winners", post(handler::declare_winners))
        .route("/{id}/chat-toggle", put(handler::toggle_chat))
        .route("/{id}/chat", post(handler::post_message))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}
