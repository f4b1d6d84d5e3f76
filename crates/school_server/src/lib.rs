//! HTTP surface of the school locator.
//!
//! The binary in `main.rs` wires configuration, logging and the SQLite store
//! into [`build_router`]; tests drive the same handlers with other stores.

pub mod config;
pub mod error;
pub mod handlers;
pub mod render;
pub mod request;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use state::AppState;

/// Builds the application router over the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/addSchool", post(handlers::add_school))
        .route("/listSchools", get(handlers::list_schools))
        .route("/health", get(handlers::health))
        .with_state(state)
}
