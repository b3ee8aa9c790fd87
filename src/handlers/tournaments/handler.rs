//! Tournament handler implementations

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    services::{ChatService, RegistrationService, SettlementService, TournamentService},
    state::AppState,
};

use super::{
    request::{
        CreateTournamentRequest, DeclareWinnersRequest, JoinTournamentRequest, PostMessageRequest,
        UpdateStatusRequest, UpdateTournamentRequest,
    },
    response::{MessagesResponse, TournamentResponse, TournamentsListResponse},
};

/// Verify the actor has staff privileges (sub-admin or above)
fn require_staff(auth_user: &AuthenticatedUser) -> AppResult<()> {
    if auth_user.is_staff() {
        Ok(())
    } else {
        Err(AppError::Forbidden("Admin access required".to_string()))
    }
}

/// Verify the actor is a super-admin
fn require_super_admin(auth_user: &AuthenticatedUser) -> AppResult<()> {
    if auth_user.is_super_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Super-admin access required".to_string(),
        ))
    }
}

/// List approved tournaments, newest first (public)
pub async fn list_tournaments(
    State(state): State<AppState>,
) -> AppResult<Json<TournamentsListResponse>> {
    let tournaments = TournamentService::list_tournaments(state.db()).await?;
    Ok(Json(TournamentsListResponse { tournaments }))
}

/// Create a new tournament
pub async fn create_tournament(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateTournamentRequest>,
) -> AppResult<(StatusCode, Json<TournamentResponse>)> {
    payload.validate()?;
    require_staff(&auth_user)?;

    let tournament =
        TournamentService::create_tournament(state.db(), &auth_user, payload).await?;

    Ok((StatusCode::CREATED, Json(tournament)))
}

/// Get a single tournament aggregate (public; also the polling target)
pub async fn get_tournament(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<TournamentResponse>> {
    let tournament = TournamentService::get_tournament(state.db(), &id).await?;
    Ok(Json(tournament))
}

/// Replace a tournament's editable definition fields
pub async fn update_tournament(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTournamentRequest>,
) -> AppResult<Json<TournamentResponse>> {
    payload.validate()?;
    require_staff(&auth_user)?;

    let tournament = TournamentService::update_tournament(state.db(), &id, payload).await?;
    Ok(Json(tournament))
}

/// Move a tournament along its lifecycle
pub async fn update_status(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<TournamentResponse>> {
    require_staff(&auth_user)?;

    let tournament = TournamentService::transition_status(state.db(), &id, payload).await?;
    Ok(Json(tournament))
}

/// Approve a pending tournament (super-admin)
pub async fn approve_tournament(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<TournamentResponse>> {
    require_super_admin(&auth_user)?;

    let tournament = TournamentService::approve_tournament(state.db(), &id).await?;
    Ok(Json(tournament))
}

/// Reject and delete a pending tournament (super-admin)
pub async fn reject_tournament(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_super_admin(&auth_user)?;

    TournamentService::reject_tournament(state.db(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Join a tournament with a team roster entry
pub async fn join_tournament(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<JoinTournamentRequest>,
) -> AppResult<Json<TournamentResponse>> {
    let tournament =
        RegistrationService::join(state.db(), state.config(), &auth_user, &id, payload).await?;

    Ok(Json(tournament))
}

/// Declare ranked winners and settle prizes
pub async fn declare_winners(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<DeclareWinnersRequest>,
) -> AppResult<Json<TournamentResponse>> {
    require_staff(&auth_user)?;

    let tournament =
        SettlementService::declare_winners(state.db(), &id, payload.winners).await?;

    Ok(Json(tournament))
}

/// Flip the room chat toggle
pub async fn toggle_chat(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<TournamentResponse>> {
    require_staff(&auth_user)?;

    let tournament = ChatService::toggle_chat(state.db(), &id).await?;
    Ok(Json(tournament))
}

/// Post a message into the tournament room
pub async fn post_message(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PostMessageRequest>,
) -> AppResult<Json<MessagesResponse>> {
    payload.validate()?;

    let messages = ChatService::post_message(state.db(), &auth_user, &id, &payload.text).await?;
    Ok(Json(messages))
}

/// Get the full ordered message log (polled by room clients)
pub async fn get_messages(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessagesResponse>> {
    let messages = ChatService::get_messages(state.db(), &id).await?;
    Ok(Json(messages))
}
