//! Competition handler implementations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult, middleware::auth::AuthenticatedUser, services::CompetitionService,
    state::AppState,
};

use super::{request::CompetitionRequest, response::CompetitionResponse};

/// List all competitions
pub async fn list_competitions(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
) -> AppResult<Json<Vec<CompetitionResponse>>> {
    let competitions = CompetitionService::list_competitions(state.db()).await?;
    Ok(Json(competitions))
}

/// Get a specific competition
pub async fn get_competition(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<CompetitionResponse>> {
    let competition = CompetitionService::get_competition(state.db(), id).await?;
    Ok(Json(competition))
}

/// Create a new competition
pub async fn create_competition(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CompetitionRequest>,
) -> AppResult<(StatusCode, Json<CompetitionResponse>)> {
    auth_user.require_editor()?;
    payload.validate()?;

    let competition =
        CompetitionService::create_competition(state.db(), &auth_user, payload).await?;

    Ok((StatusCode::CREATED, Json(competition)))
}

/// Replace a competition and its participants
pub async fn update_competition(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<CompetitionRequest>,
) -> AppResult<Json<CompetitionResponse>> {
    auth_user.require_editor()?;
    payload.validate()?;

    let competition =
        CompetitionService::update_competition(state.db(), &auth_user, id, payload).await?;

    Ok(Json(competition))
}

/// Delete a competition
pub async fn delete_competition(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    CompetitionService::delete_competition(state.db(), &auth_user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
