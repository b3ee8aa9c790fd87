//! Authentication middleware

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{
    constants::roles,
    db::repositories::UserRepository,
    error::AppError,
    models::user::role_rank,
    services::AuthService,
    state::AppState,
};

/// Authenticated actor resolved at the request boundary.
///
/// Role and ban state are re-read from the store on every request rather
/// than trusted from the token, so a demotion or ban takes effect
/// immediately. Handlers receive this by value; nothing below the
/// middleware re-fetches identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub name: String,
    pub role: String,
}

impl AuthenticatedUser {
    /// Sub-admin or above
    pub fn is_staff(&self) -> bool {
        role_rank(&self.role) >= role_rank(roles::SUB_ADMIN)
    }

    /// Admin or above
    pub fn is_admin(&self) -> bool {
        role_rank(&self.role) >= role_rank(roles::ADMIN)
    }

    /// Super-admin only
    pub fn is_super_admin(&self) -> bool {
        self.role == roles::SUPER_ADMIN
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Authentication middleware
///
/// Verifies the bearer token, then resolves the user from the database.
/// Banned users (permanent, or temporary and unexpired) are rejected here,
/// before any handler runs.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| {
            debug!(path = %path, "Auth failed: missing or malformed Authorization header");
            AppError::Unauthorized
        })?;

    let claims = AuthService::verify_token(token, &state.config().jwt.secret)?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
        debug!(path = %path, sub = %claims.sub, "Auth failed: invalid user id in token");
        AppError::InvalidToken
    })?;

    let user = UserRepository::find_by_id(state.db(), &user_id)
        .await?
        .ok_or(AppError::InvalidToken)?;

    if user.is_currently_banned() {
        debug!(path = %path, user_id = %user_id, "Auth failed: user is banned");
        return Err(AppError::Forbidden("Access denied: you are banned".to_string()));
    }

    debug!(path = %path, user_id = %user_id, role = %user.role, "User authenticated");

    request.extensions_mut().insert(AuthenticatedUser {
        id: user.id,
        name: user.name,
        role: user.role,
    });

    Ok(next.run(request).await)
}
