//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::{ban_request_statuses, ban_statuses, roles};

/// User database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// External player id for the underlying game, distinct from `id`
    pub ff_uid: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub wallet_balance: f64,
    pub ban_status: String,
    pub ban_expires: Option<DateTime<Utc>>,
    pub ban_request_status: String,
    pub ban_requested_by: Option<Uuid>,
    pub ban_requested_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check if the user is currently banned
    ///
    /// Permanent bans always hold; temporary bans hold until their expiry
    /// instant passes. A temporary ban with no expiry is treated as lapsed.
    pub fn is_currently_banned(&self) -> bool {
        match self.ban_status.as_str() {
            ban_statuses::PERMANENT => true,
            ban_statuses::TEMPORARY => self.ban_expires.map(|e| e > Utc::now()).unwrap_or(false),
            _ => false,
        }
    }

    /// Check if user has staff privileges (sub-admin or above)
    pub fn is_staff(&self) -> bool {
        role_rank(&self.role) >= role_rank(roles::SUB_ADMIN)
    }

    /// Check if user is a super-admin
    pub fn is_super_admin(&self) -> bool {
        self.role == roles::SUPER_ADMIN
    }

    /// Check if a ban request is awaiting super-admin review
    pub fn has_pending_ban_request(&self) -> bool {
        self.ban_request_status == ban_request_statuses::PENDING
    }
}

/// Privilege rank for a role string; unknown roles rank lowest.
/// Order: user < sub-admin < admin < super-admin.
pub fn role_rank(role: &str) -> u8 {
    match role {
        roles::SUPER_ADMIN => 3,
        roles::ADMIN => 2,
        roles::SUB_ADMIN => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user_with_ban(status: &str, expires: Option<DateTime<Utc>>) -> User {
        User {
            id: Uuid::new_v4(),
            name: "player".to_string(),
            ff_uid: "123456".to_string(),
            email: "player@example.com".to_string(),
            password_hash: String::new(),
            role: roles::USER.to_string(),
            wallet_balance: 0.0,
            ban_status: status.to_string(),
            ban_expires: expires,
            ban_request_status: ban_request_statuses::NONE.to_string(),
            ban_requested_by: None,
            ban_requested_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_role_rank_ordering() {
        assert!(role_rank(roles::USER) < role_rank(roles::SUB_ADMIN));
        assert!(role_rank(roles::SUB_ADMIN) < role_rank(roles::ADMIN));
        assert!(role_rank(roles::ADMIN) < role_rank(roles::SUPER_ADMIN));
        assert_eq!(role_rank("something-else"), role_rank(roles::USER));
    }

    #[test]
    fn test_permanent_ban_holds() {
        assert!(user_with_ban(ban_statuses::PERMANENT, None).is_currently_banned());
    }

    #[test]
    fn test_temporary_ban_expires() {
        let active = user_with_ban(
            ban_statuses::TEMPORARY,
            Some(Utc::now() + Duration::hours(1)),
        );
        assert!(active.is_currently_banned());

        let lapsed = user_with_ban(
            ban_statuses::TEMPORARY,
            Some(Utc::now() - Duration::hours(1)),
        );
        assert!(!lapsed.is_currently_banned());
    }

    #[test]
    fn test_unbanned_user() {
        assert!(!user_with_ban(ban_statuses::NONE, None).is_currently_banned());
    }
}
