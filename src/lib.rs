//! Competition Registry - school competition record keeping backend
//!
//! Keeps track of the competitions a school's students take part in: who
//! entered, in which class and school year, and how they placed.
//!
//! # Features
//!
//! - Competitions with their participants, replaced atomically on update
//! - Students created on first mention and deduplicated by name
//! - Levenshtein based "did you mean" suggestions for student names
//! - Cookie or bearer sessions backed by Redis
//! - Role-based access control (admin, contributor, viewer)
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Repositories**: Database access
//! - **Models**: Domain models

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

use std::time::Duration;

use axum::{middleware as axum_middleware, Router};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Build the application router with every API route and HTTP layer
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest(constants::API_BASE_PATH, handlers::routes(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .map_response(|res: axum::http::Response<_>| res.map(axum::body::Body::new))
                .layer(CompressionLayer::new())
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(constants::MAX_REQUEST_BODY_BYTES))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    constants::REQUEST_TIMEOUT_SECS,
                )))
                .map_request(|req: axum::http::Request<tower_http::body::Limited<axum::body::Body>>| {
                    req.map(axum::body::Body::new)
                })
                .layer(axum_middleware::from_fn(middleware::logging_middleware)),
        )
        .with_state(state)
}
