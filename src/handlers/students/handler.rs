//! Student handler implementations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult, middleware::auth::AuthenticatedUser, services::StudentService,
    state::AppState,
};

use super::{
    request::{SimilarStudentsQuery, StudentRequest, StudentSearchQuery},
    response::{
        SimilarStudentResponse, StudentDetailResponse, StudentResponse, StudentSearchResponse,
    },
};

/// List all students
pub async fn list_students(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
) -> AppResult<Json<Vec<StudentResponse>>> {
    let students = StudentService::list_students(state.db()).await?;
    Ok(Json(students))
}

/// Get a student with participation history
pub async fn get_student(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<StudentDetailResponse>> {
    let student = StudentService::get_student(state.db(), id).await?;
    Ok(Json(student))
}

/// Create a student
pub async fn create_student(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<StudentRequest>,
) -> AppResult<(StatusCode, Json<StudentResponse>)> {
    auth_user.require_editor()?;
    payload.validate()?;

    let student =
        StudentService::create_student(state.db(), &payload.first_name, &payload.last_name)
            .await?;

    Ok((StatusCode::CREATED, Json(student)))
}

/// Rename a student
pub async fn update_student(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<StudentRequest>,
) -> AppResult<Json<StudentResponse>> {
    auth_user.require_editor()?;
    payload.validate()?;

    let student =
        StudentService::update_student(state.db(), id, &payload.first_name, &payload.last_name)
            .await?;

    Ok(Json(student))
}

/// Delete a student (admin only)
pub async fn delete_student(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    auth_user.require_admin()?;

    StudentService::delete_student(state.db(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Search students by name with optional class filters
pub async fn search_students(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Query(query): Query<StudentSearchQuery>,
) -> AppResult<Json<StudentSearchResponse>> {
    query.validate()?;

    let results = StudentService::search_students(state.db(), &query).await?;
    Ok(Json(results))
}

/// Suggest existing students with a similar name
pub async fn similar_students(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Query(query): Query<SimilarStudentsQuery>,
) -> AppResult<Json<Vec<SimilarStudentResponse>>> {
    query.validate()?;

    let matches = StudentService::similar_students(state.db(), &query).await?;
    Ok(Json(matches))
}
