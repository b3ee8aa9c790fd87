//! Tournament service: registry operations and the lifecycle controller

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::{DEFAULT_MAX_PLAYERS, DEFAULT_TOTAL_WINNERS, approval_statuses},
    db::repositories::TournamentRepository,
    error::{AppError, AppResult},
    handlers::tournaments::{
        request::{CreateTournamentRequest, UpdateStatusRequest, UpdateTournamentRequest},
        response::{
            MessageResponse, ParticipantResponse, TournamentResponse, TournamentSummary,
            WinnerResponse,
        },
    },
    middleware::auth::AuthenticatedUser,
    models::{Tournament, TournamentStatus},
    utils::validation,
};

/// Tournament service for business logic
pub struct TournamentService;

impl TournamentService {
    /// Create a new tournament.
    ///
    /// Super-admins publish directly; tournaments from regular staff wait
    /// for super-admin approval before appearing in the public listing.
    pub async fn create_tournament(
        pool: &PgPool,
        creator: &AuthenticatedUser,
        payload: CreateTournamentRequest,
    ) -> AppResult<TournamentResponse> {
        validation::validate_team_mode(&payload.mode)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let approval_status = if creator.is_super_admin() {
            approval_statuses::APPROVED
        } else {
            approval_statuses::PENDING
        };

        let tournament = TournamentRepository::create(
            pool,
            &payload.title,
            payload.description.as_deref(),
            &payload.mode,
            payload.entry_fee,
            &payload.prize_pool,
            &payload.prize_distribution.unwrap_or_default(),
            payload.total_winners.unwrap_or(DEFAULT_TOTAL_WINNERS),
            payload.loser_percent.unwrap_or(0),
            payload.schedule,
            payload.max_players.unwrap_or(DEFAULT_MAX_PLAYERS),
            approval_status,
            &creator.id,
        )
        .await?;

        Self::to_tournament_response(pool, tournament).await
    }

    /// Get tournament by ID with roster, winners, and chat log resolved
    pub async fn get_tournament(pool: &PgPool, id: &Uuid) -> AppResult<TournamentResponse> {
        let tournament = TournamentRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tournament not found".to_string()))?;

        Self::to_tournament_response(pool, tournament).await
    }

    /// List approved tournaments, newest first
    pub async fn list_tournaments(pool: &PgPool) -> AppResult<Vec<TournamentSummary>> {
        let tournaments = TournamentRepository::list_approved(pool).await?;

        let summaries = futures::future::try_join_all(
            tournaments
                .into_iter()
                .map(|t| Self::to_tournament_summary(pool, t)),
        )
        .await?;

        Ok(summaries)
    }

    /// Replace the editable definition fields of a tournament
    pub async fn update_tournament(
        pool: &PgPool,
        id: &Uuid,
        payload: UpdateTournamentRequest,
    ) -> AppResult<TournamentResponse> {
        validation::validate_team_mode(&payload.mode)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let tournament = TournamentRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tournament not found".to_string()))?;

        if tournament.status() == TournamentStatus::Closed {
            return Err(AppError::InvalidState(
                "Cannot edit a closed tournament".to_string(),
            ));
        }

        let updated = TournamentRepository::update(
            pool,
            id,
            &payload.title,
            payload.description.as_deref(),
            &payload.mode,
            payload.entry_fee,
            &payload.prize_pool,
            &payload.prize_distribution.unwrap_or_default(),
            payload.total_winners.unwrap_or(DEFAULT_TOTAL_WINNERS),
            payload.loser_percent.unwrap_or(0),
            payload.schedule,
            payload.max_players.unwrap_or(DEFAULT_MAX_PLAYERS),
        )
        .await?;

        Self::to_tournament_response(pool, updated).await
    }

    /// Move a tournament along its lifecycle.
    ///
    /// Runs under a row lock so two staff members cannot race each other
    /// through the state machine. `Completed` is rejected here
    /// unconditionally; only winner declaration produces it.
    pub async fn transition_status(
        pool: &PgPool,
        id: &Uuid,
        payload: UpdateStatusRequest,
    ) -> AppResult<TournamentResponse> {
        let target = TournamentStatus::from_str(&payload.status)
            .ok_or_else(|| AppError::Validation(format!("Unknown status: {}", payload.status)))?;

        let mut tx = pool.begin().await?;

        let tournament = TournamentRepository::find_by_id_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tournament not found".to_string()))?;

        let current = tournament.status();
        if !current.can_transition_to(target) {
            return Err(AppError::InvalidTransition(format!(
                "Cannot move a tournament from {} to {}",
                current, target
            )));
        }

        let start_time = (target == TournamentStatus::Ongoing)
            .then(|| payload.start_time.unwrap_or_else(Utc::now));
        let end_time = (target == TournamentStatus::ResultsPending)
            .then(|| payload.end_time.unwrap_or_else(Utc::now));

        let updated =
            TournamentRepository::set_status(&mut tx, id, target.as_str(), start_time, end_time)
                .await?;

        tx.commit().await?;

        Self::to_tournament_response(pool, updated).await
    }

    /// Approve a pending tournament (super-admin)
    pub async fn approve_tournament(pool: &PgPool, id: &Uuid) -> AppResult<TournamentResponse> {
        let tournament = TournamentRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tournament not found".to_string()))?;

        if tournament.is_approved() {
            return Err(AppError::InvalidState(
                "Tournament is not awaiting approval".to_string(),
            ));
        }

        let updated =
            TournamentRepository::set_approval(pool, id, approval_statuses::APPROVED).await?;

        Self::to_tournament_response(pool, updated).await
    }

    /// Reject a pending tournament (super-admin); the only deletion path
    pub async fn reject_tournament(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        let tournament = TournamentRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tournament not found".to_string()))?;

        if tournament.is_approved() {
            return Err(AppError::InvalidState(
                "Tournament is not awaiting approval".to_string(),
            ));
        }

        TournamentRepository::delete(pool, id).await
    }

    // Helper functions

    /// Assemble the full aggregate response a polling client consumes
    pub(crate) async fn to_tournament_response(
        pool: &PgPool,
        tournament: Tournament,
    ) -> AppResult<TournamentResponse> {
        let participants = sqlx::query_as::<_, ParticipantResponse>(
            r#"
            SELECT
                tp.user_id,
                u.name,
                u.ff_uid,
                tp.joined_at,
                tp.upi_id,
                tp.player_uids,
                tp.group_name,
                tp.payment_status
            FROM tournament_participants tp
            JOIN users u ON tp.user_id = u.id
            WHERE tp.tournament_id = $1
            ORDER BY tp.joined_at DESC
            "#,
        )
        .bind(tournament.id)
        .fetch_all(pool)
        .await?;

        let winners = sqlx::query_as::<_, WinnerResponse>(
            r#"
            SELECT
                tw.position,
                tw.user_id,
                u.name,
                u.ff_uid,
                tw.group_name,
                tw.prize
            FROM tournament_winners tw
            JOIN users u ON tw.user_id = u.id
            WHERE tw.tournament_id = $1
            ORDER BY tw.position
            "#,
        )
        .bind(tournament.id)
        .fetch_all(pool)
        .await?;

        let messages = sqlx::query_as::<_, MessageResponse>(
            r#"
            SELECT id, sender_id, sender_name, sender_role, text, posted_at
            FROM tournament_messages
            WHERE tournament_id = $1
            ORDER BY posted_at
            "#,
        )
        .bind(tournament.id)
        .fetch_all(pool)
        .await?;

        let loser_cashback = tournament.loser_cashback();

        Ok(TournamentResponse {
            id: tournament.id,
            title: tournament.title,
            description: tournament.description,
            mode: tournament.mode,
            entry_fee: tournament.entry_fee,
            prize_pool: tournament.prize_pool,
            prize_distribution: tournament.prize_distribution.0,
            total_winners: tournament.total_winners,
            loser_percent: tournament.loser_percent,
            loser_cashback,
            schedule: tournament.schedule,
            start_time: tournament.start_time,
            end_time: tournament.end_time,
            max_players: tournament.max_players,
            status: tournament.status,
            chat_enabled: tournament.chat_enabled,
            approval_status: tournament.approval_status,
            created_by: tournament.created_by,
            created_at: tournament.created_at,
            participant_count: participants.len() as i64,
            participants,
            winners,
            messages,
        })
    }

    async fn to_tournament_summary(
        pool: &PgPool,
        tournament: Tournament,
    ) -> AppResult<TournamentSummary> {
        let participant_count =
            TournamentRepository::participant_count(pool, &tournament.id).await?;

        Ok(TournamentSummary {
            id: tournament.id,
            title: tournament.title,
            mode: tournament.mode,
            entry_fee: tournament.entry_fee,
            prize_pool: tournament.prize_pool,
            total_winners: tournament.total_winners,
            schedule: tournament.schedule,
            status: tournament.status,
            max_players: tournament.max_players,
            participant_count,
            created_at: tournament.created_at,
        })
    }
}
