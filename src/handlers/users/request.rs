//! User administration request DTOs

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Role change request (super-admin only)
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

/// Ban request.
///
/// A super-admin applies the ban directly; a regular admin submits it for
/// super-admin review.
#[derive(Debug, Deserialize)]
pub struct BanUserRequest {
    /// "none", "temporary", or "permanent"
    pub ban_status: String,

    /// Expiry instant, meaningful only for temporary bans
    pub ban_expires: Option<DateTime<Utc>>,
}

/// Super-admin decision on a pending ban request
#[derive(Debug, Deserialize)]
pub struct ManageBanRequest {
    /// "approve" or "reject"
    pub action: String,

    /// Ban status to apply on approval; defaults to permanent
    pub ban_status: Option<String>,

    /// Expiry instant for temporary bans
    pub ban_expires: Option<DateTime<Utc>>,
}
