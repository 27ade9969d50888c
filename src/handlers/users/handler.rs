//! User management handler implementations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult, middleware::auth::AuthenticatedUser, services::UserService,
    state::AppState,
};

use super::{
    request::{CreateUserRequest, UpdateUserRequest},
    response::UserResponse,
};

/// List all users (admin only)
pub async fn list_users(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<Vec<UserResponse>>> {
    auth_user.require_admin()?;

    let users = UserService::list_users(state.db()).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// Get the caller's own account
pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<UserResponse>> {
    let user = UserService::get_user_by_id(state.db(), &auth_user.id).await?;
    Ok(Json(user.into()))
}

/// Get a user by ID (admin only)
pub async fn get_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    auth_user.require_admin()?;

    let user = UserService::get_user_by_id(state.db(), &id).await?;
    Ok(Json(user.into()))
}

/// Create a user (admin only)
pub async fn create_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    auth_user.require_admin()?;
    payload.validate()?;

    let user = UserService::create_user(state.db(), payload.account(), &payload.password).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Update a user (admin only)
pub async fn update_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    auth_user.require_admin()?;
    payload.validate()?;

    let user = UserService::update_user(
        state.db(),
        state.redis(),
        &auth_user.id,
        &id,
        payload.account(),
        payload.password.as_deref(),
    )
    .await?;

    Ok(Json(user.into()))
}

/// Delete a user (admin only)
pub async fn delete_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    auth_user.require_admin()?;

    UserService::delete_user(state.db(), state.redis(), &auth_user.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
