//! User administration handler implementations

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    services::UserService,
    state::AppState,
};

use super::{
    request::{BanUserRequest, ManageBanRequest, UpdateRoleRequest},
    response::{AdminUserResponse, UsersListResponse},
};

/// Verify the actor has staff privileges (sub-admin or above)
fn require_staff(auth_user: &AuthenticatedUser) -> AppResult<()> {
    if auth_user.is_staff() {
        Ok(())
    } else {
        Err(AppError::Forbidden("Admin access required".to_string()))
    }
}

/// Verify the actor has admin privileges (admin or above)
fn require_admin(auth_user: &AuthenticatedUser) -> AppResult<()> {
    if auth_user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden("Admin access required".to_string()))
    }
}

/// Verify the actor is a super-admin
fn require_super_admin(auth_user: &AuthenticatedUser) -> AppResult<()> {
    if auth_user.is_super_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Super-admin access required".to_string(),
        ))
    }
}

/// List user accounts (staff only)
pub async fn list_users(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<UsersListResponse>> {
    require_staff(&auth_user)?;

    let users = UserService::list_users(state.db(), &auth_user).await?;
    Ok(Json(users))
}

/// Change a user's role (super-admin only)
pub async fn update_role(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRoleRequest>,
) -> AppResult<Json<AdminUserResponse>> {
    require_super_admin(&auth_user)?;

    let user = UserService::update_role(state.db(), &id, &payload.role).await?;
    Ok(Json(user))
}

/// Ban a user directly (super-admin) or submit a ban request (admin)
pub async fn ban_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<BanUserRequest>,
) -> AppResult<Json<AdminUserResponse>> {
    require_staff(&auth_user)?;

    let user = UserService::ban_user(state.db(), &auth_user, &id, payload).await?;
    Ok(Json(user))
}

/// Approve or reject a pending ban request (super-admin only)
pub async fn manage_ban_request(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ManageBanRequest>,
) -> AppResult<Json<AdminUserResponse>> {
    require_super_admin(&auth_user)?;

    let user = UserService::manage_ban_request(state.db(), &id, payload).await?;
    Ok(Json(user))
}

/// Lift a ban (admin or above)
pub async fn unban_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AdminUserResponse>> {
    require_admin(&auth_user)?;

    let user = UserService::unban_user(state.db(), &auth_user, &id).await?;
    Ok(Json(user))
}
