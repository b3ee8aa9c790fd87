//! Tournament repository

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Participant, PrizeSlot, Tournament},
};

/// Repository for tournament database operations
pub struct TournamentRepository;

impl TournamentRepository {
    /// Create a new tournament
    pub async fn create(
        pool: &PgPool,
        title: &str,
        description: Option<&str>,
        mode: &str,
        entry_fee: f64,
        prize_pool: &str,
        prize_distribution: &[PrizeSlot],
        total_winners: i32,
        loser_percent: i32,
        schedule: DateTime<Utc>,
        max_players: i32,
        approval_status: &str,
        created_by: &Uuid,
    ) -> AppResult<Tournament> {
        let tournament = sqlx::query_as::<_, Tournament>(
            r#"
            INSERT INTO tournaments (
                title, description, mode, entry_fee, prize_pool,
                prize_distribution, total_winners, loser_percent, schedule,
                max_players, approval_status, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(mode)
        .bind(entry_fee)
        .bind(prize_pool)
        .bind(Json(prize_distribution))
        .bind(total_winners)
        .bind(loser_percent)
        .bind(schedule)
        .bind(max_players)
        .bind(approval_status)
        .bind(created_by)
        .fetch_one(pool)
        .await?;

        Ok(tournament)
    }

    /// Find tournament by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Tournament>> {
        let tournament =
            sqlx::query_as::<_, Tournament>(r#"SELECT * FROM tournaments WHERE id = $1"#)
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(tournament)
    }

    /// Find tournament by ID, holding a row lock for the rest of the
    /// transaction.
    ///
    /// Join, transition, settlement, and chat-post serialize on this lock
    /// so their check-then-write sequences cannot interleave.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: &Uuid,
    ) -> AppResult<Option<Tournament>> {
        let tournament = sqlx::query_as::<_, Tournament>(
            r#"SELECT * FROM tournaments WHERE id = $1 FOR UPDATE"#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(tournament)
    }

    /// List approved tournaments, newest first
    pub async fn list_approved(pool: &PgPool) -> AppResult<Vec<Tournament>> {
        let tournaments = sqlx::query_as::<_, Tournament>(
            r#"
            SELECT * FROM tournaments
            WHERE approval_status = 'approved'
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(tournaments)
    }

    /// Replace the editable definition fields of a tournament
    pub async fn update(
        pool: &PgPool,
        id: &Uuid,
        title: &str,
        description: Option<&str>,
        mode: &str,
        entry_fee: f64,
        prize_pool: &str,
        prize_distribution: &[PrizeSlot],
        total_winners: i32,
        loser_percent: i32,
        schedule: DateTime<Utc>,
        max_players: i32,
    ) -> AppResult<Tournament> {
        let tournament = sqlx::query_as::<_, Tournament>(
            r#"
            UPDATE tournaments
            SET
                title = $2,
                description = $3,
                mode = $4,
                entry_fee = $5,
                prize_pool = $6,
                prize_distribution = $7,
                total_winners = $8,
                loser_percent = $9,
                schedule = $10,
                max_players = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(mode)
        .bind(entry_fee)
        .bind(prize_pool)
        .bind(Json(prize_distribution))
        .bind(total_winners)
        .bind(loser_percent)
        .bind(schedule)
        .bind(max_players)
        .fetch_one(pool)
        .await?;

        Ok(tournament)
    }

    /// Delete a tournament (super-admin rejection of a pending approval)
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM tournaments WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Set the approval status
    pub async fn set_approval(
        pool: &PgPool,
        id: &Uuid,
        approval_status: &str,
    ) -> AppResult<Tournament> {
        let tournament = sqlx::query_as::<_, Tournament>(
            r#"
            UPDATE tournaments
            SET approval_status = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(approval_status)
        .fetch_one(pool)
        .await?;

        Ok(tournament)
    }

    /// Move a tournament to a new status, recording lifecycle timestamps.
    ///
    /// Timestamps already set are never overwritten with NULL; the caller
    /// passes the instants it wants stamped.
    pub async fn set_status(
        conn: &mut PgConnection,
        id: &Uuid,
        status: &str,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
    ) -> AppResult<Tournament> {
        let tournament = sqlx::query_as::<_, Tournament>(
            r#"
            UPDATE tournaments
            SET
                status = $2,
                start_time = COALESCE($3, start_time),
                end_time = COALESCE($4, end_time)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(start_time)
        .bind(end_time)
        .fetch_one(conn)
        .await?;

        Ok(tournament)
    }

    /// Flip the chat-enabled toggle
    pub async fn toggle_chat(pool: &PgPool, id: &Uuid) -> AppResult<Tournament> {
        let tournament = sqlx::query_as::<_, Tournament>(
            r#"
            UPDATE tournaments
            SET chat_enabled = NOT chat_enabled
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(tournament)
    }

    /// Roster for a tournament, most recently joined first
    pub async fn participants(
        conn: &mut PgConnection,
        tournament_id: &Uuid,
    ) -> AppResult<Vec<Participant>> {
        let participants = sqlx::query_as::<_, Participant>(
            r#"
            SELECT * FROM tournament_participants
            WHERE tournament_id = $1
            ORDER BY joined_at DESC
            "#,
        )
        .bind(tournament_id)
        .fetch_all(conn)
        .await?;

        Ok(participants)
    }

    /// Check if a user is on a tournament's roster
    pub async fn is_participant(
        conn: &mut PgConnection,
        tournament_id: &Uuid,
        user_id: &Uuid,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM tournament_participants
                WHERE tournament_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(tournament_id)
        .bind(user_id)
        .fetch_one(conn)
        .await?;

        Ok(exists)
    }

    /// Get roster size for a tournament
    pub async fn participant_count(pool: &PgPool, tournament_id: &Uuid) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM tournament_participants WHERE tournament_id = $1"#,
        )
        .bind(tournament_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Insert a roster entry
    pub async fn insert_participant(
        conn: &mut PgConnection,
        tournament_id: &Uuid,
        user_id: &Uuid,
        upi_id: &str,
        player_uids: &[String],
        group_name: &str,
        payment_status: &str,
        payment_reference: Option<&str>,
    ) -> AppResult<Participant> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            INSERT INTO tournament_participants (
                tournament_id, user_id, upi_id, player_uids, group_name,
                payment_status, payment_reference
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(tournament_id)
        .bind(user_id)
        .bind(upi_id)
        .bind(player_uids)
        .bind(group_name)
        .bind(payment_status)
        .bind(payment_reference)
        .fetch_one(conn)
        .await?;

        Ok(participant)
    }

    /// Record one ranked winner
    pub async fn insert_winner(
        conn: &mut PgConnection,
        tournament_id: &Uuid,
        position: i32,
        user_id: &Uuid,
        group_name: &str,
        prize: &str,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tournament_winners (tournament_id, position, user_id, group_name, prize)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(tournament_id)
        .bind(position)
        .bind(user_id)
        .bind(group_name)
        .bind(prize)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Check whether winners were already declared
    pub async fn has_winners(pool: &PgPool, tournament_id: &Uuid) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM tournament_winners WHERE tournament_id = $1
            )
            "#,
        )
        .bind(tournament_id)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Append a chat message with snapshotted sender identity
    pub async fn insert_message(
        conn: &mut PgConnection,
        tournament_id: &Uuid,
        sender_id: &Uuid,
        sender_name: &str,
        sender_role: &str,
        text: &str,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tournament_messages (tournament_id, sender_id, sender_name, sender_role, text)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(tournament_id)
        .bind(sender_id)
        .bind(sender_name)
        .bind(sender_role)
        .bind(text)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Count total tournaments
    pub async fn count(pool: &PgPool) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM tournaments"#)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
