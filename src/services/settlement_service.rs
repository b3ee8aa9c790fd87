//! Settlement service: records ranked winners and credits their wallets

use std::collections::HashSet;

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::prize_labels,
    db::repositories::{TournamentRepository, UserRepository},
    error::{AppError, AppResult},
    handlers::tournaments::{request::RankedWinner, response::TournamentResponse},
    models::{Participant, PrizeSlot, TournamentStatus},
    services::TournamentService,
    utils::prize::parse_amount,
};

/// Settlement service for winner declaration and prize crediting
pub struct SettlementService;

impl SettlementService {
    /// Declare winners for a results-pending tournament.
    ///
    /// Winner rows, wallet credits, and the move to `Completed` form one
    /// transaction: either everything commits or nothing does. Because the
    /// status leaves `ResultsPending` in the same commit, a second
    /// declaration always fails the status check and no wallet is credited
    /// twice.
    pub async fn declare_winners(
        pool: &PgPool,
        tournament_id: &Uuid,
        ranking: Vec<RankedWinner>,
    ) -> AppResult<TournamentResponse> {
        let mut tx = pool.begin().await?;

        let tournament = TournamentRepository::find_by_id_for_update(&mut tx, tournament_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tournament not found".to_string()))?;

        if tournament.status() != TournamentStatus::ResultsPending {
            return Err(AppError::InvalidState(format!(
                "Winners can only be declared while results are pending (status: {})",
                tournament.status
            )));
        }

        let roster = TournamentRepository::participants(&mut tx, tournament_id).await?;

        validate_ranking(&ranking, tournament.total_winners, &roster)?;

        let mut ranking = ranking;
        ranking.sort_by_key(|w| w.position);

        for entry in &ranking {
            let participant = roster
                .iter()
                .find(|p| p.user_id == entry.user_id)
                .ok_or_else(|| {
                    AppError::Validation("Ranked user is not a participant".to_string())
                })?;

            let prize = prize_label(&tournament.prize_distribution.0, entry.position);

            TournamentRepository::insert_winner(
                &mut tx,
                tournament_id,
                entry.position,
                &entry.user_id,
                &participant.group_name,
                &prize,
            )
            .await?;

            let amount = parse_amount(&prize);
            if amount > 0.0 {
                let touched =
                    UserRepository::credit_wallet(&mut tx, &entry.user_id, amount).await?;
                if touched == 0 {
                    // Dropping the transaction rolls back the winners and
                    // credits recorded so far
                    return Err(AppError::NotFound(
                        "Winner account no longer exists".to_string(),
                    ));
                }
            }
        }

        TournamentRepository::set_status(
            &mut tx,
            tournament_id,
            TournamentStatus::Completed.as_str(),
            None,
            Some(Utc::now()),
        )
        .await?;

        tx.commit().await?;

        TournamentService::get_tournament(pool, tournament_id).await
    }
}

/// Ranking shape rules: 1..=total_winners entries, unique in-range
/// positions, every ranked user on the roster.
fn validate_ranking(
    ranking: &[RankedWinner],
    total_winners: i32,
    roster: &[Participant],
) -> AppResult<()> {
    if ranking.is_empty() {
        return Err(AppError::Validation(
            "At least one winner must be ranked".to_string(),
        ));
    }

    if ranking.len() as i32 > total_winners {
        return Err(AppError::Validation(format!(
            "At most {} winners can be declared",
            total_winners
        )));
    }

    let mut seen_positions = HashSet::new();
    for entry in ranking {
        if entry.user_id.is_nil() {
            return Err(AppError::Validation(
                "Winner user id cannot be empty".to_string(),
            ));
        }

        if entry.position < 1 || entry.position > total_winners {
            return Err(AppError::Validation(format!(
                "Position {} is outside 1..={}",
                entry.position, total_winners
            )));
        }

        if !seen_positions.insert(entry.position) {
            return Err(AppError::Validation(format!(
                "Duplicate position {}",
                entry.position
            )));
        }

        if !roster.iter().any(|p| p.user_id == entry.user_id) {
            return Err(AppError::Validation(format!(
                "User {} is not a participant of this tournament",
                entry.user_id
            )));
        }
    }

    Ok(())
}

/// Prize label for a rank: the configured distribution entry when present,
/// otherwise a fixed label sequence.
fn prize_label(distribution: &[PrizeSlot], position: i32) -> String {
    if let Some(slot) = distribution.get((position - 1) as usize) {
        if !slot.prize.trim().is_empty() {
            return slot.prize.clone();
        }
    }

    match position {
        1 => prize_labels::FIRST,
        2 => prize_labels::SECOND,
        3 => prize_labels::THIRD,
        _ => prize_labels::DEFAULT,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(user_id: Uuid) -> Participant {
        Participant {
            id: Uuid::new_v4(),
            tournament_id: Uuid::new_v4(),
            user_id,
            joined_at: Utc::now(),
            upi_id: String::new(),
            player_uids: vec!["111".to_string()],
            group_name: "Night Owls".to_string(),
            payment_status: "Verified".to_string(),
            payment_reference: None,
        }
    }

    fn slot(rank: i32, prize: &str) -> PrizeSlot {
        PrizeSlot {
            rank,
            prize: prize.to_string(),
        }
    }

    #[test]
    fn test_valid_ranking() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let roster = vec![entry(a), entry(b)];
        let ranking = vec![
            RankedWinner {
                position: 1,
                user_id: a,
            },
            RankedWinner {
                position: 2,
                user_id: b,
            },
        ];
        assert!(validate_ranking(&ranking, 3, &roster).is_ok());
    }

    #[test]
    fn test_empty_ranking_rejected() {
        assert!(matches!(
            validate_ranking(&[], 3, &[]),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_duplicate_positions_rejected() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let roster = vec![entry(a), entry(b)];
        let ranking = vec![
            RankedWinner {
                position: 1,
                user_id: a,
            },
            RankedWinner {
                position: 1,
                user_id: b,
            },
        ];
        assert!(matches!(
            validate_ranking(&ranking, 3, &roster),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_position_outside_total_winners_rejected() {
        let a = Uuid::new_v4();
        let roster = vec![entry(a)];
        let ranking = vec![RankedWinner {
            position: 4,
            user_id: a,
        }];
        assert!(matches!(
            validate_ranking(&ranking, 3, &roster),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_non_participant_rejected() {
        let roster = vec![entry(Uuid::new_v4())];
        let ranking = vec![RankedWinner {
            position: 1,
            user_id: Uuid::new_v4(),
        }];
        assert!(matches!(
            validate_ranking(&ranking, 3, &roster),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_more_winners_than_allowed_rejected() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let roster = vec![entry(a), entry(b)];
        let ranking = vec![
            RankedWinner {
                position: 1,
                user_id: a,
            },
            RankedWinner {
                position: 2,
                user_id: b,
            },
        ];
        assert!(matches!(
            validate_ranking(&ranking, 1, &roster),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_prize_label_from_distribution() {
        let distribution = vec![slot(1, "$500"), slot(2, "$250")];
        assert_eq!(prize_label(&distribution, 1), "$500");
        assert_eq!(prize_label(&distribution, 2), "$250");
    }

    #[test]
    fn test_prize_label_fallback_sequence() {
        let distribution: Vec<PrizeSlot> = vec![];
        assert_eq!(prize_label(&distribution, 1), "1st Prize");
        assert_eq!(prize_label(&distribution, 2), "2nd Prize");
        assert_eq!(prize_label(&distribution, 3), "3rd Prize");
        assert_eq!(prize_label(&distribution, 7), "Winner Prize");
    }

    #[test]
    fn test_blank_distribution_entry_falls_back() {
        let distribution = vec![slot(1, "   ")];
        assert_eq!(prize_label(&distribution, 1), "1st Prize");
    }
}
