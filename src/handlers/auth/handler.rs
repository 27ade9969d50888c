//! Authentication handler implementations

use axum::{
    extract::{Query, State},
    http::{header::SET_COOKIE, HeaderMap},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    middleware::auth::{session_token, AuthenticatedUser},
    services::AuthService,
    state::AppState,
};

use super::{
    request::{ChangePasswordRequest, CheckEmailQuery, LoginRequest, UpdateProfileRequest},
    response::{CheckEmailResponse, LoginResponse, MessageResponse},
};
use crate::handlers::users::UserResponse;

/// Login with email and password
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let (user, session) = AuthService::login(
        state.db(),
        state.redis(),
        state.config(),
        &payload.email,
        &payload.password,
    )
    .await?;

    let cookie =
        AuthService::session_cookie(&state.config().session, &session.token, payload.remember_me);

    Ok((
        [(SET_COOKIE, cookie)],
        Json(LoginResponse {
            user: user.into(),
            token: session.token,
            expires_in: session.expires_in,
        }),
    ))
}

/// Logout: revoke the presented session, if any, and clear the cookie
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let config = state.config();

    if let Some(token) = session_token(&headers, &config.session.cookie_name) {
        AuthService::logout(state.redis(), config, &token).await?;
    }

    Ok((
        [(SET_COOKIE, AuthService::clear_cookie(&config.session))],
        Json(MessageResponse::new("Logged out successfully")),
    ))
}

/// Get current authenticated user
pub async fn get_current_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<UserResponse>> {
    let user = AuthService::get_user_by_id(state.db(), &auth_user.id).await?;
    Ok(Json(user.into()))
}

/// Whether an email address is already registered
pub async fn check_email(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Query(query): Query<CheckEmailQuery>,
) -> AppResult<Json<CheckEmailResponse>> {
    query.validate()?;

    let exists = AuthService::email_in_use(state.db(), &query.email).await?;
    Ok(Json(CheckEmailResponse { exists }))
}

/// Change own password
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    payload.validate()?;

    AuthService::change_password(
        state.db(),
        state.redis(),
        &auth_user.id,
        &auth_user.session_id,
        &payload.current_password,
        &payload.new_password,
    )
    .await?;

    Ok(Json(MessageResponse::new("Password changed successfully")))
}

/// Update own email and name
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    payload.validate()?;

    let user = AuthService::update_profile(
        state.db(),
        &auth_user.id,
        &payload.email,
        payload.first_name.trim(),
        payload.last_name.trim(),
    )
    .await?;

    Ok(Json(user.into()))
}
