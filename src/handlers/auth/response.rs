//! Auth response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::User;

/// Public view of a user account
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub ff_uid: String,
    pub email: String,
    pub role: String,
    pub wallet_balance: f64,
    pub ban_status: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            ff_uid: user.ff_uid,
            email: user.email,
            role: user.role,
            wallet_balance: user.wallet_balance,
            ban_status: user.ban_status,
            created_at: user.created_at,
        }
    }
}

/// Login / registration response with token pair
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Token refresh response
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}
