//! Student handlers
//!
//! `/student` holds the CRUD endpoints, `/students` the lookups used while
//! entering participants.

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Student CRUD routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_students).post(handler::create_student))
        .route(
            "/{id}",
            get(handler::get_student)
                .put(handler::update_student)
                .delete(handler::delete_student),
        )
}

/// Student lookup routes
pub fn lookup_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(handler::search_students))
        .route("/similar", get(handler::similar_students))
}
