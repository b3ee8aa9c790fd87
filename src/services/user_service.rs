//! User administration service: roles and the two-phase ban workflow

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::ban_statuses,
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    handlers::users::{
        request::{BanUserRequest, ManageBanRequest},
        response::{AdminUserResponse, UsersListResponse},
    },
    middleware::auth::AuthenticatedUser,
    utils::validation,
};

/// User administration service
pub struct UserService;

impl UserService {
    /// List user accounts for the staff dashboard.
    ///
    /// Viewers below super-admin rank see neither super-admin accounts nor
    /// user emails.
    pub async fn list_users(
        pool: &PgPool,
        viewer: &AuthenticatedUser,
    ) -> AppResult<UsersListResponse> {
        let include_super = viewer.is_super_admin();
        let users = UserRepository::list(pool, include_super).await?;

        let total = users.len() as i64;
        let users = users
            .into_iter()
            .map(|u| AdminUserResponse::from_user(u, include_super))
            .collect();

        Ok(UsersListResponse { users, total })
    }

    /// Change a user's role (super-admin only; gated at the handler).
    /// A super-admin's own role is immutable.
    pub async fn update_role(
        pool: &PgPool,
        target_id: &Uuid,
        role: &str,
    ) -> AppResult<AdminUserResponse> {
        validation::validate_role(role).map_err(|e| AppError::Validation(e.to_string()))?;

        let target = UserRepository::find_by_id(pool, target_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if target.is_super_admin() {
            return Err(AppError::Forbidden(
                "Cannot change the role of a super-admin".to_string(),
            ));
        }

        let updated = UserRepository::update_role(pool, target_id, role).await?;
        Ok(AdminUserResponse::from_user(updated, true))
    }

    /// Ban a user, or request it.
    ///
    /// Super-admins apply the ban immediately, clearing any pending
    /// request. Regular admins submit a pending request for super-admin
    /// review instead. Everyone below admin rank is refused.
    pub async fn ban_user(
        pool: &PgPool,
        actor: &AuthenticatedUser,
        target_id: &Uuid,
        payload: BanUserRequest,
    ) -> AppResult<AdminUserResponse> {
        validation::validate_ban_status(&payload.ban_status)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let target = UserRepository::find_by_id(pool, target_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if target.id == actor.id {
            return Err(AppError::Validation("Cannot ban yourself".to_string()));
        }

        if actor.is_super_admin() {
            let expires = ban_expiry(&payload.ban_status, payload.ban_expires);
            let updated =
                UserRepository::apply_ban(pool, target_id, &payload.ban_status, expires).await?;
            return Ok(AdminUserResponse::from_user(updated, true));
        }

        if actor.is_admin() {
            let updated = UserRepository::request_ban(pool, target_id, &actor.id).await?;
            return Ok(AdminUserResponse::from_user(updated, false));
        }

        Err(AppError::Forbidden(
            "Only admins may request bans".to_string(),
        ))
    }

    /// Approve or reject a pending ban request (super-admin only; gated at
    /// the handler). Acting on a user with no pending request is an error.
    pub async fn manage_ban_request(
        pool: &PgPool,
        target_id: &Uuid,
        payload: ManageBanRequest,
    ) -> AppResult<AdminUserResponse> {
        let target = UserRepository::find_by_id(pool, target_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if !target.has_pending_ban_request() {
            return Err(AppError::InvalidState(
                "No pending ban request for this user".to_string(),
            ));
        }

        let updated = match payload.action.as_str() {
            "reject" => UserRepository::clear_ban_request(pool, target_id).await?,
            "approve" => {
                let status = payload
                    .ban_status
                    .unwrap_or_else(|| ban_statuses::PERMANENT.to_string());
                validation::validate_ban_status(&status)
                    .map_err(|e| AppError::Validation(e.to_string()))?;

                let expires = ban_expiry(&status, payload.ban_expires);
                UserRepository::apply_ban(pool, target_id, &status, expires).await?
            }
            _ => {
                return Err(AppError::Validation(
                    "Action must be 'approve' or 'reject'".to_string(),
                ));
            }
        };

        Ok(AdminUserResponse::from_user(updated, true))
    }

    /// Lift a ban (admin or above; gated at the handler)
    pub async fn unban_user(
        pool: &PgPool,
        actor: &AuthenticatedUser,
        target_id: &Uuid,
    ) -> AppResult<AdminUserResponse> {
        UserRepository::find_by_id(pool, target_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let updated = UserRepository::clear_ban(pool, target_id).await?;
        Ok(AdminUserResponse::from_user(
            updated,
            actor.is_super_admin(),
        ))
    }
}

/// Expiry only makes sense for temporary bans; other statuses clear it
fn ban_expiry(status: &str, expires: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    if status == ban_statuses::TEMPORARY {
        expires
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_expiry_kept_only_for_temporary_bans() {
        let expires = Some(Utc::now() + Duration::days(7));
        assert_eq!(ban_expiry(ban_statuses::TEMPORARY, expires), expires);
        assert_eq!(ban_expiry(ban_statuses::PERMANENT, expires), None);
        assert_eq!(ban_expiry(ban_statuses::NONE, expires), None);
    }
}
