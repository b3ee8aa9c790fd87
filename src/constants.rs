//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Default refresh token expiry in days
pub const DEFAULT_REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

// =============================================================================
// USER ROLES
// =============================================================================

/// User role identifiers, ordered lowest to highest privilege
pub mod roles {
    pub const USER: &str = "user";
    pub const SUB_ADMIN: &str = "sub-admin";
    pub const ADMIN: &str = "admin";
    pub const SUPER_ADMIN: &str = "super-admin";

    /// All user roles
    pub const ALL: &[&str] = &[USER, SUB_ADMIN, ADMIN, SUPER_ADMIN];
}

// =============================================================================
// TOURNAMENT SETTINGS
// =============================================================================

/// Tournament team modes
pub mod team_modes {
    pub const SOLO: &str = "Solo";
    pub const DUO: &str = "Duo";
    pub const SQUAD: &str = "Squad";

    /// All supported team modes
    pub const ALL: &[&str] = &[SOLO, DUO, SQUAD];
}

/// Tournament lifecycle statuses
pub mod statuses {
    pub const OPEN: &str = "Open";
    pub const ONGOING: &str = "Ongoing";
    pub const RESULTS_PENDING: &str = "ResultsPending";
    pub const COMPLETED: &str = "Completed";
    pub const CLOSED: &str = "Closed";

    /// All lifecycle statuses
    pub const ALL: &[&str] = &[OPEN, ONGOING, RESULTS_PENDING, COMPLETED, CLOSED];
}

/// Participant payment statuses
pub mod payment_statuses {
    pub const PENDING: &str = "Pending";
    pub const VERIFIED: &str = "Verified";
}

/// Tournament approval statuses (multi-tier admin deployments)
pub mod approval_statuses {
    pub const PENDING: &str = "pending";
    pub const APPROVED: &str = "approved";
}

/// Ban statuses
pub mod ban_statuses {
    pub const NONE: &str = "none";
    pub const TEMPORARY: &str = "temporary";
    pub const PERMANENT: &str = "permanent";

    /// All ban statuses
    pub const ALL: &[&str] = &[NONE, TEMPORARY, PERMANENT];
}

/// Ban request statuses (two-phase ban workflow)
pub mod ban_request_statuses {
    pub const NONE: &str = "none";
    pub const PENDING: &str = "pending";
}

/// Fallback prize labels used when a rank has no configured distribution entry
pub mod prize_labels {
    pub const FIRST: &str = "1st Prize";
    pub const SECOND: &str = "2nd Prize";
    pub const THIRD: &str = "3rd Prize";
    pub const DEFAULT: &str = "Winner Prize";
}

/// Default tournament capacity
pub const DEFAULT_MAX_PLAYERS: i32 = 48;

/// Default number of ranked winners
pub const DEFAULT_TOTAL_WINNERS: i32 = 3;

// =============================================================================
// API VERSIONING
// =============================================================================

/// Current API version
pub const API_VERSION: &str = "v1";

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// RATE LIMITING
// =============================================================================

/// Rate limiting configuration
pub mod rate_limits {
    /// Auth endpoint - max requests
    pub const AUTH_MAX_REQUESTS: i64 = 5;
    /// Auth endpoint - window in seconds
    pub const AUTH_WINDOW_SECS: i64 = 60;

    /// Chat endpoint - max requests
    pub const CHAT_MAX_REQUESTS: i64 = 30;
    /// Chat endpoint - window in seconds
    pub const CHAT_WINDOW_SECS: i64 = 60;

    /// General API - max requests
    pub const GENERAL_MAX_REQUESTS: i64 = 100;
    /// General API - window in seconds
    pub const GENERAL_WINDOW_SECS: i64 = 60;
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for paginated results
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum page size for paginated results
pub const MAX_PAGE_SIZE: u32 = 100;

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum tournament title length
pub const MAX_TOURNAMENT_TITLE_LENGTH: u64 = 256;

/// Maximum tournament description length
pub const MAX_TOURNAMENT_DESCRIPTION_LENGTH: u64 = 65535;

/// Maximum display name length
pub const MAX_NAME_LENGTH: u64 = 64;

/// Maximum length of a team/group display name
pub const MAX_GROUP_NAME_LENGTH: u64 = 64;
