//! Tournament model and lifecycle state machine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use crate::constants::approval_statuses;

/// One rank's configured prize in the distribution list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrizeSlot {
    pub rank: i32,
    pub prize: String,
}

/// Tournament database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Tournament {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub mode: String,
    pub entry_fee: f64,
    pub prize_pool: String,
    pub prize_distribution: Json<Vec<PrizeSlot>>,
    pub total_winners: i32,
    pub loser_percent: i32,
    pub schedule: DateTime<Utc>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub max_players: i32,
    pub status: String,
    pub chat_enabled: bool,
    pub approval_status: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Current lifecycle status as an enum
    pub fn status(&self) -> TournamentStatus {
        TournamentStatus::from_str(&self.status).unwrap_or(TournamentStatus::Closed)
    }

    /// Roster size every entry must supply for this tournament's mode
    pub fn required_seats(&self) -> usize {
        TeamMode::from_str(&self.mode)
            .map(|m| m.required_seats())
            .unwrap_or(1)
    }

    /// Duo and Squad entries carry a team name; Solo entries do not
    pub fn is_team_mode(&self) -> bool {
        matches!(
            TeamMode::from_str(&self.mode),
            Some(TeamMode::Duo) | Some(TeamMode::Squad)
        )
    }

    /// Check if the tournament is visible to the public listing
    pub fn is_approved(&self) -> bool {
        self.approval_status == approval_statuses::APPROVED
    }

    /// Informational cashback for a non-winning participant once results
    /// are in: a percentage of the entry fee. Never transferred by the
    /// platform itself.
    pub fn loser_cashback(&self) -> f64 {
        self.entry_fee * f64::from(self.loser_percent) / 100.0
    }
}

/// Tournament team mode, fixing the per-entry roster size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamMode {
    Solo,
    Duo,
    Squad,
}

impl TeamMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Solo" => Some(Self::Solo),
            "Duo" => Some(Self::Duo),
            "Squad" => Some(Self::Squad),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Solo => "Solo",
            Self::Duo => "Duo",
            Self::Squad => "Squad",
        }
    }

    /// Number of per-seat player ids an entry must provide
    pub fn required_seats(&self) -> usize {
        match self {
            Self::Solo => 1,
            Self::Duo => 2,
            Self::Squad => 4,
        }
    }
}

/// Tournament lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TournamentStatus {
    Open,
    Ongoing,
    ResultsPending,
    Completed,
    Closed,
}

impl TournamentStatus {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Open" => Some(Self::Open),
            "Ongoing" => Some(Self::Ongoing),
            "ResultsPending" => Some(Self::ResultsPending),
            "Completed" => Some(Self::Completed),
            "Closed" => Some(Self::Closed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Ongoing => "Ongoing",
            Self::ResultsPending => "ResultsPending",
            Self::Completed => "Completed",
            Self::Closed => "Closed",
        }
    }

    /// Whether the generic status endpoint may move a tournament from
    /// `self` to `target`.
    ///
    /// `Completed` is reachable only through winner declaration, never
    /// through this table. `Closed` is terminal.
    pub fn can_transition_to(self, target: TournamentStatus) -> bool {
        use TournamentStatus::*;
        matches!(
            (self, target),
            (Open, Ongoing)
                | (Open, Closed)
                | (Ongoing, ResultsPending)
                | (Ongoing, Closed)
                | (ResultsPending, Closed)
                | (Completed, Closed)
        )
    }
}

impl std::fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Roster entry database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Participant {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub user_id: Uuid,
    pub joined_at: DateTime<Utc>,
    /// Payout identifier supplied for prize disbursement
    pub upi_id: String,
    /// Per-seat player ids; index 0 is the registering captain
    pub player_uids: Vec<String>,
    pub group_name: String,
    pub payment_status: String,
    pub payment_reference: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::TournamentStatus::*;
    use super::*;

    #[test]
    fn test_required_seats_per_mode() {
        assert_eq!(TeamMode::Solo.required_seats(), 1);
        assert_eq!(TeamMode::Duo.required_seats(), 2);
        assert_eq!(TeamMode::Squad.required_seats(), 4);
    }

    #[test]
    fn test_forward_transitions() {
        assert!(Open.can_transition_to(Ongoing));
        assert!(Ongoing.can_transition_to(ResultsPending));
        assert!(ResultsPending.can_transition_to(Closed));
        assert!(Completed.can_transition_to(Closed));
    }

    #[test]
    fn test_early_close_escapes() {
        assert!(Open.can_transition_to(Closed));
        assert!(Ongoing.can_transition_to(Closed));
    }

    #[test]
    fn test_completed_unreachable_via_generic_transition() {
        for from in [Open, Ongoing, ResultsPending, Completed, Closed] {
            assert!(!from.can_transition_to(Completed));
        }
    }

    #[test]
    fn test_closed_is_terminal() {
        for target in [Open, Ongoing, ResultsPending, Completed, Closed] {
            assert!(!Closed.can_transition_to(target));
        }
    }

    #[test]
    fn test_no_backward_transitions() {
        assert!(!Ongoing.can_transition_to(Open));
        assert!(!ResultsPending.can_transition_to(Ongoing));
        assert!(!Open.can_transition_to(ResultsPending));
    }

    #[test]
    fn test_status_round_trip() {
        for s in [Open, Ongoing, ResultsPending, Completed, Closed] {
            assert_eq!(TournamentStatus::from_str(s.as_str()), Some(s));
        }
        assert_eq!(TournamentStatus::from_str("Upcoming"), None);
    }
}
