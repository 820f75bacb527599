//! REST API layer: route handlers, DTOs, bearer guard, and router
//! composition.
//!
//! Equipment endpoints are mounted under `/api` and sit behind the bearer
//! guard; system endpoints are mounted at the root and are open.

pub mod auth;
pub mod dto;
pub mod handlers;
pub mod openapi;

use axum::Router;
use axum::middleware;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints and binds it to
/// `state`.
pub fn build_router(state: AppState) -> Router {
    let guarded = handlers::routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth::require_bearer,
    ));

    Router::new()
        .nest("/api", guarded)
        .merge(handlers::system::routes())
        .with_state(state)
}
