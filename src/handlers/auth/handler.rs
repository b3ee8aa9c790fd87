//! Auth handler implementations

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    services::AuthService,
    state::AppState,
};

use super::{
    request::{LoginRequest, LogoutRequest, RefreshTokenRequest, RegisterRequest},
    response::{AuthResponse, TokenResponse, UserResponse},
};

/// Register a new player account
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    payload.validate()?;

    let user = AuthService::register(
        state.db(),
        &payload.name,
        &payload.ff_uid,
        &payload.email,
        &payload.password,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Login with email and password
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    payload.validate()?;

    let (user, access_token, refresh_token, expires_in) = AuthService::login(
        state.db(),
        state.redis(),
        state.config(),
        &payload.email,
        &payload.password,
    )
    .await?;

    Ok(Json(AuthResponse {
        user: user.into(),
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
        expires_in,
    }))
}

/// Exchange a refresh token for a new token pair
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let (access_token, refresh_token, expires_in) = AuthService::refresh_token(
        state.db(),
        state.redis(),
        state.config(),
        &payload.refresh_token,
    )
    .await?;

    Ok(Json(TokenResponse {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
        expires_in,
    }))
}

/// Current account profile, including the wallet balance
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<UserResponse>> {
    let user = AuthService::get_user_by_id(state.db(), &auth_user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

/// Logout, optionally invalidating every session's refresh token
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    payload: Option<Json<LogoutRequest>>,
) -> AppResult<StatusCode> {
    let all_sessions = payload.map(|Json(p)| p.all_sessions).unwrap_or(false);

    AuthService::logout(state.redis(), &auth_user.id, all_sessions).await?;

    Ok(StatusCode::NO_CONTENT)
}
