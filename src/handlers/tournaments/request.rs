//! Tournament request DTOs

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::constants::{MAX_TOURNAMENT_DESCRIPTION_LENGTH, MAX_TOURNAMENT_TITLE_LENGTH};
use crate::models::PrizeSlot;

/// Create tournament request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTournamentRequest {
    #[validate(length(min = 1, max = MAX_TOURNAMENT_TITLE_LENGTH))]
    pub title: String,

    #[validate(length(max = MAX_TOURNAMENT_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    /// Team mode: Solo, Duo, Squad
    pub mode: String,

    /// Entry fee, 0 for free tournaments
    #[validate(range(min = 0.0))]
    pub entry_fee: f64,

    /// Prize pool display label
    #[validate(length(min = 1))]
    pub prize_pool: String,

    /// Per-rank prize labels (optional; fallback labels apply otherwise)
    pub prize_distribution: Option<Vec<PrizeSlot>>,

    /// Number of ranked winners (defaults to 3)
    #[validate(range(min = 1))]
    pub total_winners: Option<i32>,

    /// Informational cashback percent of the entry fee for non-winners
    #[validate(range(min = 0, max = 100))]
    pub loser_percent: Option<i32>,

    /// Scheduled start instant
    pub schedule: DateTime<Utc>,

    /// Roster capacity (defaults to 48)
    #[validate(range(min = 1))]
    pub max_players: Option<i32>,
}

/// Update tournament request (full replace of editable fields)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTournamentRequest {
    #[validate(length(min = 1, max = MAX_TOURNAMENT_TITLE_LENGTH))]
    pub title: String,

    #[validate(length(max = MAX_TOURNAMENT_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    pub mode: String,

    #[validate(range(min = 0.0))]
    pub entry_fee: f64,

    #[validate(length(min = 1))]
    pub prize_pool: String,

    pub prize_distribution: Option<Vec<PrizeSlot>>,

    #[validate(range(min = 1))]
    pub total_winners: Option<i32>,

    #[validate(range(min = 0, max = 100))]
    pub loser_percent: Option<i32>,

    pub schedule: DateTime<Utc>,

    #[validate(range(min = 1))]
    pub max_players: Option<i32>,
}

/// Join tournament request
#[derive(Debug, Deserialize)]
pub struct JoinTournamentRequest {
    /// Payout identifier; required when the entry fee is non-zero
    pub upi_id: Option<String>,

    /// Per-seat player ids; index 0 is the registering captain
    pub player_uids: Vec<String>,

    /// Team/group display name; required for Duo and Squad
    pub group_name: Option<String>,

    /// Opaque reference from the upstream payment verifier
    pub payment_reference: Option<String>,
}

/// Lifecycle transition request
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

/// One ranked entry in a winner declaration
#[derive(Debug, Clone, Deserialize)]
pub struct RankedWinner {
    pub position: i32,
    pub user_id: Uuid,
}

/// Declare winners request
#[derive(Debug, Deserialize)]
pub struct DeclareWinnersRequest {
    pub winners: Vec<RankedWinner>,
}

/// Post chat message request
#[derive(Debug, Deserialize, Validate)]
pub struct PostMessageRequest {
    #[validate(length(min = 1))]
    pub text: String,
}
