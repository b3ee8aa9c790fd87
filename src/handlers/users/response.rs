//! User administration response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::User;

/// Staff view of a user account.
///
/// The email is withheld from viewers below super-admin rank.
#[derive(Debug, Serialize)]
pub struct AdminUserResponse {
    pub id: Uuid,
    pub name: String,
    pub ff_uid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: String,
    pub wallet_balance: f64,
    pub ban_status: String,
    pub ban_expires: Option<DateTime<Utc>>,
    pub ban_request_status: String,
    pub ban_requested_by: Option<Uuid>,
    pub ban_requested_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl AdminUserResponse {
    /// Build the staff view, withholding the email unless the viewer is a
    /// super-admin
    pub fn from_user(user: User, include_email: bool) -> Self {
        Self {
            id: user.id,
            name: user.name,
            ff_uid: user.ff_uid,
            email: include_email.then_some(user.email),
            role: user.role,
            wallet_balance: user.wallet_balance,
            ban_status: user.ban_status,
            ban_expires: user.ban_expires,
            ban_request_status: user.ban_request_status,
            ban_requested_by: user.ban_requested_by,
            ban_requested_at: user.ban_requested_at,
            created_at: user.created_at,
        }
    }
}

/// User list response
#[derive(Debug, Serialize)]
pub struct UsersListResponse {
    pub users: Vec<AdminUserResponse>,
    pub total: i64,
}
