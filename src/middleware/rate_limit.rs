//! Rate limiting middleware

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use redis::AsyncCommands;
use tracing::warn;

use crate::{constants, error::AppError, state::AppState};

/// Fixed-window rate limit per client IP and endpoint bucket.
///
/// Redis failures let the request through.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let path = request.uri().path();

    let (limit, window) = get_rate_limit(path);
    let key = format!("rate_limit:{}:{}", ip, path_bucket(path));
    let mut redis = state.redis();

    let count: i64 = redis.incr(&key, 1).await.unwrap_or(0);

    if count == 1 {
        let _: () = redis.expire(&key, window).await.unwrap_or(());
    }

    if count > limit {
        warn!(ip = %ip, bucket = path_bucket(path), "Rate limit exceeded");
        return Err(AppError::TooManyRequests);
    }

    Ok(next.run(request).await)
}

/// Get rate limit for a path
fn get_rate_limit(path: &str) -> (i64, i64) {
    if path_bucket(path) == "login" {
        (
            constants::rate_limits::LOGIN_MAX_REQUESTS,
            constants::rate_limits::LOGIN_WINDOW_SECS,
        )
    } else {
        (
            constants::rate_limits::GENERAL_MAX_REQUESTS,
            constants::rate_limits::GENERAL_WINDOW_SECS,
        )
    }
}

/// Get bucket for path
fn path_bucket(path: &str) -> &'static str {
    if path.ends_with("/auth/login") {
        "login"
    } else {
        "general"
    }
}
