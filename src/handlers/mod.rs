//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod auth;
pub mod competitions;
pub mod health;
pub mod students;
pub mod users;

use axum::{middleware, routing::post, Router};

use crate::{
    middleware::{auth::auth_middleware, rate_limit::rate_limit_middleware},
    state::AppState,
};

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    let auth_routes = auth::public_routes()
        .merge(authenticated(auth::protected_routes(), &state));

    Router::new()
        .merge(health::routes())
        .nest("/auth", auth_routes)
        .route("/logout", post(auth::logout))
        .nest("/user", authenticated(users::routes(), &state))
        .nest("/competition", authenticated(competitions::routes(), &state))
        .nest("/student", authenticated(students::routes(), &state))
        .nest("/students", authenticated(students::lookup_routes(), &state))
        .layer(middleware::from_fn_with_state(state, rate_limit_middleware))
}

/// Put every route of `router` behind session authentication
fn authenticated(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
}
