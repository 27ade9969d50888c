//! Health check and keep-alive handlers

use axum::{
    http::StatusCode,
    routing::{get, head},
    Json, Router,
};
use serde::Serialize;

use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Keep-alive probe for uptime monitors, no body
async fn keep_alive() -> StatusCode {
    StatusCode::OK
}

/// Health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/keepalive", head(keep_alive))
}
