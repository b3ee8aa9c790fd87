//! Chat service: the per-tournament room message gate

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::TournamentRepository,
    error::{AppError, AppResult},
    handlers::tournaments::response::{MessageResponse, MessagesResponse, TournamentResponse},
    middleware::auth::AuthenticatedUser,
    services::TournamentService,
};

/// Chat service for room messages and the admin toggle
pub struct ChatService;

impl ChatService {
    /// Post a message into a tournament's room.
    ///
    /// The sender's name and role are snapshotted into the message so role
    /// badges stay historically accurate after promotions or demotions.
    pub async fn post_message(
        pool: &PgPool,
        user: &AuthenticatedUser,
        tournament_id: &Uuid,
        text: &str,
    ) -> AppResult<MessagesResponse> {
        let mut tx = pool.begin().await?;

        let tournament = TournamentRepository::find_by_id_for_update(&mut tx, tournament_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tournament not found".to_string()))?;

        let is_participant =
            TournamentRepository::is_participant(&mut tx, tournament_id, &user.id).await?;

        authorize_post(is_participant, user.is_staff(), tournament.chat_enabled)?;

        TournamentRepository::insert_message(
            &mut tx,
            tournament_id,
            &user.id,
            &user.name,
            &user.role,
            text,
        )
        .await?;

        tx.commit().await?;

        let messages = Self::fetch_messages(pool, tournament_id).await?;
        Ok(MessagesResponse { messages })
    }

    /// Flip the chat-enabled toggle (staff only; works in any status)
    pub async fn toggle_chat(pool: &PgPool, tournament_id: &Uuid) -> AppResult<TournamentResponse> {
        TournamentRepository::find_by_id(pool, tournament_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tournament not found".to_string()))?;

        TournamentRepository::toggle_chat(pool, tournament_id).await?;

        TournamentService::get_tournament(pool, tournament_id).await
    }

    /// Full ordered message log; the polling client re-fetches this (or the
    /// whole aggregate) every few seconds
    pub async fn get_messages(pool: &PgPool, tournament_id: &Uuid) -> AppResult<MessagesResponse> {
        TournamentRepository::find_by_id(pool, tournament_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tournament not found".to_string()))?;

        let messages = Self::fetch_messages(pool, tournament_id).await?;
        Ok(MessagesResponse { messages })
    }

    async fn fetch_messages(
        pool: &PgPool,
        tournament_id: &Uuid,
    ) -> AppResult<Vec<MessageResponse>> {
        let messages = sqlx::query_as::<_, MessageResponse>(
            r#"
            SELECT id, sender_id, sender_name, sender_role, text, posted_at
            FROM tournament_messages
            WHERE tournament_id = $1
            ORDER BY posted_at
            "#,
        )
        .bind(tournament_id)
        .fetch_all(pool)
        .await?;

        Ok(messages)
    }
}

/// Room access policy: participants and staff may post; the disable toggle
/// silences participants but never staff.
fn authorize_post(is_participant: bool, is_staff: bool, chat_enabled: bool) -> AppResult<()> {
    if !is_staff && !is_participant {
        return Err(AppError::Forbidden(
            "Only participants and staff may post in this room".to_string(),
        ));
    }

    if !is_staff && !chat_enabled {
        return Err(AppError::InvalidState("Chat is disabled".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_can_post_while_enabled() {
        assert!(authorize_post(true, false, true).is_ok());
    }

    #[test]
    fn test_outsider_is_forbidden_regardless_of_toggle() {
        assert!(matches!(
            authorize_post(false, false, true),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            authorize_post(false, false, false),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_disabled_chat_silences_participants() {
        assert!(matches!(
            authorize_post(true, false, false),
            Err(AppError::InvalidState(_))
        ));
    }

    #[test]
    fn test_staff_bypass_the_toggle() {
        assert!(authorize_post(false, true, false).is_ok());
        assert!(authorize_post(true, true, false).is_ok());
    }
}
