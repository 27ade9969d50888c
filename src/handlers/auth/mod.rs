//! Authentication handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;

/// Routes open to anonymous callers
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handler::login))
        .route("/logout", post(handler::logout))
}

/// Routes that need a session
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(handler::get_current_user))
        .route("/check-email", get(handler::check_email))
        .route("/change-password", post(handler::change_password))
        .route("/profile", put(handler::update_profile))
}
