//! Auth request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::{MAX_NAME_LENGTH, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub name: String,

    /// External player id for the underlying game
    #[validate(length(min = 1, max = 32))]
    pub ff_uid: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = MIN_PASSWORD_LENGTH, max = MAX_PASSWORD_LENGTH))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Logout request
#[derive(Debug, Deserialize, Default)]
pub struct LogoutRequest {
    /// Invalidate every refresh token for this account
    #[serde(default)]
    pub all_sessions: bool,
}
