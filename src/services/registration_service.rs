//! Registration service: admits a player and their team into a roster

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    config::Config,
    constants::payment_statuses,
    db::repositories::TournamentRepository,
    error::{AppError, AppResult},
    handlers::tournaments::{request::JoinTournamentRequest, response::TournamentResponse},
    middleware::auth::AuthenticatedUser,
    models::{Participant, Tournament, TournamentStatus},
    services::TournamentService,
};

/// Registration service for roster admission
pub struct RegistrationService;

impl RegistrationService {
    /// Join a tournament.
    ///
    /// The duplicate and capacity checks run against the roster read under
    /// the tournament's row lock, so two concurrent joins for the same user
    /// or for the last slot cannot both commit.
    pub async fn join(
        pool: &PgPool,
        config: &Config,
        user: &AuthenticatedUser,
        tournament_id: &Uuid,
        payload: JoinTournamentRequest,
    ) -> AppResult<TournamentResponse> {
        let mut tx = pool.begin().await?;

        let tournament = TournamentRepository::find_by_id_for_update(&mut tx, tournament_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tournament not found".to_string()))?;

        let roster = TournamentRepository::participants(&mut tx, tournament_id).await?;

        validate_join(
            &tournament,
            &roster,
            &user.id,
            &payload,
            config.payments.require_reference,
        )?;

        let payment_status =
            if tournament.entry_fee == 0.0 || payload.payment_reference.is_some() {
                payment_statuses::VERIFIED
            } else {
                payment_statuses::PENDING
            };

        TournamentRepository::insert_participant(
            &mut tx,
            tournament_id,
            &user.id,
            payload.upi_id.as_deref().unwrap_or("").trim(),
            &payload.player_uids,
            payload.group_name.as_deref().unwrap_or("").trim(),
            payment_status,
            payload.payment_reference.as_deref(),
        )
        .await?;

        tx.commit().await?;

        TournamentService::get_tournament(pool, tournament_id).await
    }
}

/// Admission rules for one join request, checked in a fixed order so every
/// failure maps to one stable error class.
fn validate_join(
    tournament: &Tournament,
    roster: &[Participant],
    user_id: &Uuid,
    payload: &JoinTournamentRequest,
    require_payment_reference: bool,
) -> AppResult<()> {
    if tournament.status() != TournamentStatus::Open {
        return Err(AppError::InvalidState(format!(
            "Tournament is not open for registration (status: {})",
            tournament.status
        )));
    }

    if roster.iter().any(|p| p.user_id == *user_id) {
        return Err(AppError::Conflict(
            "Already joined this tournament".to_string(),
        ));
    }

    if roster.len() as i32 >= tournament.max_players {
        return Err(AppError::CapacityExceeded);
    }

    if tournament.entry_fee > 0.0 && is_blank(payload.upi_id.as_deref()) {
        return Err(AppError::Validation(
            "UPI ID is required for paid tournaments".to_string(),
        ));
    }

    let required = tournament.required_seats();
    if payload.player_uids.len() != required {
        return Err(AppError::Validation(format!(
            "You must provide exactly {} player UIDs for {} mode",
            required, tournament.mode
        )));
    }

    if payload.player_uids.iter().any(|uid| uid.trim().is_empty()) {
        return Err(AppError::Validation(
            "All player UIDs must be non-empty".to_string(),
        ));
    }

    if tournament.is_team_mode() && is_blank(payload.group_name.as_deref()) {
        return Err(AppError::Validation(format!(
            "Group/team name is required for {}",
            tournament.mode
        )));
    }

    if tournament.entry_fee > 0.0
        && require_payment_reference
        && is_blank(payload.payment_reference.as_deref())
    {
        return Err(AppError::PaymentError(
            "A verified payment reference is required for this tournament".to_string(),
        ));
    }

    Ok(())
}

fn is_blank(value: Option<&str>) -> bool {
    value.map(str::trim).unwrap_or("").is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sqlx::types::Json;

    fn tournament(mode: &str, entry_fee: f64, max_players: i32, status: &str) -> Tournament {
        Tournament {
            id: Uuid::new_v4(),
            title: "Friday Night Scrims".to_string(),
            description: None,
            mode: mode.to_string(),
            entry_fee,
            prize_pool: "$1000".to_string(),
            prize_distribution: Json(vec![]),
            total_winners: 3,
            loser_percent: 0,
            schedule: Utc::now(),
            start_time: None,
            end_time: None,
            max_players,
            status: status.to_string(),
            chat_enabled: true,
            approval_status: "approved".to_string(),
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    fn entry(user_id: Uuid) -> Participant {
        Participant {
            id: Uuid::new_v4(),
            tournament_id: Uuid::new_v4(),
            user_id,
            joined_at: Utc::now(),
            upi_id: String::new(),
            player_uids: vec!["111".to_string()],
            group_name: String::new(),
            payment_status: "Verified".to_string(),
            payment_reference: None,
        }
    }

    fn solo_request() -> JoinTournamentRequest {
        JoinTournamentRequest {
            upi_id: None,
            player_uids: vec!["111".to_string()],
            group_name: None,
            payment_reference: None,
        }
    }

    #[test]
    fn test_join_open_free_solo() {
        let t = tournament("Solo", 0.0, 2, "Open");
        let user = Uuid::new_v4();
        assert!(validate_join(&t, &[], &user, &solo_request(), false).is_ok());
    }

    #[test]
    fn test_join_rejected_when_not_open() {
        let user = Uuid::new_v4();
        for status in ["Ongoing", "ResultsPending", "Completed", "Closed"] {
            let t = tournament("Solo", 0.0, 2, status);
            assert!(matches!(
                validate_join(&t, &[], &user, &solo_request(), false),
                Err(AppError::InvalidState(_))
            ));
        }
    }

    #[test]
    fn test_duplicate_join_conflicts() {
        let t = tournament("Solo", 0.0, 4, "Open");
        let user = Uuid::new_v4();
        let roster = vec![entry(user)];
        assert!(matches!(
            validate_join(&t, &roster, &user, &solo_request(), false),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn test_full_roster_rejects_join() {
        let t = tournament("Solo", 0.0, 2, "Open");
        let roster = vec![entry(Uuid::new_v4()), entry(Uuid::new_v4())];
        assert!(matches!(
            validate_join(&t, &roster, &Uuid::new_v4(), &solo_request(), false),
            Err(AppError::CapacityExceeded)
        ));
    }

    #[test]
    fn test_duplicate_checked_before_capacity() {
        // A user already on a full roster gets the duplicate error, not the
        // capacity one
        let t = tournament("Solo", 0.0, 1, "Open");
        let user = Uuid::new_v4();
        let roster = vec![entry(user)];
        assert!(matches!(
            validate_join(&t, &roster, &user, &solo_request(), false),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn test_paid_tournament_requires_upi() {
        let t = tournament("Solo", 50.0, 8, "Open");
        let request = solo_request();
        assert!(matches!(
            validate_join(&t, &[], &Uuid::new_v4(), &request, false),
            Err(AppError::Validation(_))
        ));

        let request = JoinTournamentRequest {
            upi_id: Some("player@upi".to_string()),
            ..solo_request()
        };
        assert!(validate_join(&t, &[], &Uuid::new_v4(), &request, false).is_ok());
    }

    #[test]
    fn test_seat_count_must_match_mode() {
        let t = tournament("Duo", 0.0, 8, "Open");
        let request = JoinTournamentRequest {
            upi_id: None,
            player_uids: vec!["111".to_string()],
            group_name: Some("Night Owls".to_string()),
            payment_reference: None,
        };
        assert!(matches!(
            validate_join(&t, &[], &Uuid::new_v4(), &request, false),
            Err(AppError::Validation(_))
        ));

        let request = JoinTournamentRequest {
            upi_id: None,
            player_uids: vec!["111".to_string(), "222".to_string()],
            group_name: Some("Night Owls".to_string()),
            payment_reference: None,
        };
        assert!(validate_join(&t, &[], &Uuid::new_v4(), &request, false).is_ok());
    }

    #[test]
    fn test_blank_seat_id_rejected() {
        let t = tournament("Duo", 0.0, 8, "Open");
        let request = JoinTournamentRequest {
            upi_id: None,
            player_uids: vec!["111".to_string(), "   ".to_string()],
            group_name: Some("Night Owls".to_string()),
            payment_reference: None,
        };
        assert!(matches!(
            validate_join(&t, &[], &Uuid::new_v4(), &request, false),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_team_modes_require_group_name() {
        for (mode, seats) in [("Duo", 2), ("Squad", 4)] {
            let t = tournament(mode, 0.0, 16, "Open");
            let request = JoinTournamentRequest {
                upi_id: None,
                player_uids: (0..seats).map(|i| format!("{}", 100 + i)).collect(),
                group_name: None,
                payment_reference: None,
            };
            assert!(matches!(
                validate_join(&t, &[], &Uuid::new_v4(), &request, false),
                Err(AppError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_payment_reference_enforced_when_required() {
        let t = tournament("Solo", 50.0, 8, "Open");
        let request = JoinTournamentRequest {
            upi_id: Some("player@upi".to_string()),
            ..solo_request()
        };
        assert!(matches!(
            validate_join(&t, &[], &Uuid::new_v4(), &request, true),
            Err(AppError::PaymentError(_))
        ));

        let request = JoinTournamentRequest {
            upi_id: Some("player@upi".to_string()),
            payment_reference: Some("pay_8fb1".to_string()),
            ..solo_request()
        };
        assert!(validate_join(&t, &[], &Uuid::new_v4(), &request, true).is_ok());
    }

    #[test]
    fn test_free_tournament_skips_payment_checks() {
        let t = tournament("Solo", 0.0, 8, "Open");
        assert!(validate_join(&t, &[], &Uuid::new_v4(), &solo_request(), true).is_ok());
    }
}
