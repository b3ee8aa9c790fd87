//! Tournament response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::PrizeSlot;

/// Full tournament aggregate, the unit a polling client re-fetches
#[derive(Debug, Serialize)]
pub struct TournamentResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub mode: String,
    pub entry_fee: f64,
    pub prize_pool: String,
    pub prize_distribution: Vec<PrizeSlot>,
    pub total_winners: i32,
    pub loser_percent: i32,
    /// Informational per-loser cashback amount; never transferred
    pub loser_cashback: f64,
    pub schedule: DateTime<Utc>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub max_players: i32,
    pub status: String,
    pub chat_enabled: bool,
    pub approval_status: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub participant_count: i64,
    pub participants: Vec<ParticipantResponse>,
    pub winners: Vec<WinnerResponse>,
    pub messages: Vec<MessageResponse>,
}

/// Roster entry with the user reference resolved
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ParticipantResponse {
    pub user_id: Uuid,
    pub name: String,
    pub ff_uid: String,
    pub joined_at: DateTime<Utc>,
    pub upi_id: String,
    pub player_uids: Vec<String>,
    pub group_name: String,
    pub payment_status: String,
}

/// Ranked winner with the user reference resolved
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct WinnerResponse {
    pub position: i32,
    pub user_id: Uuid,
    pub name: String,
    pub ff_uid: String,
    pub group_name: String,
    pub prize: String,
}

/// One chat message; sender name and role are post-time snapshots
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct MessageResponse {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub sender_name: String,
    pub sender_role: String,
    pub text: String,
    pub posted_at: DateTime<Utc>,
}

/// Chat log response
#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub messages: Vec<MessageResponse>,
}

/// Tournament summary for the public listing
#[derive(Debug, Serialize)]
pub struct TournamentSummary {
    pub id: Uuid,
    pub title: String,
    pub mode: String,
    pub entry_fee: f64,
    pub prize_pool: String,
    pub total_winners: i32,
    pub schedule: DateTime<Utc>,
    pub status: String,
    pub max_players: i32,
    pub participant_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Public tournament list response
#[derive(Debug, Serialize)]
pub struct TournamentsListResponse {
    pub tournaments: Vec<TournamentSummary>,
}
