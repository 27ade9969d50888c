//! Competition management handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Competition routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handler::list_competitions).post(handler::create_competition),
        )
        .route(
            "/{id}",
            get(handler::get_competition)
                .put(handler::update_competition)
                .delete(handler::delete_competition),
        )
}
