//! System endpoints: health and readiness.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// Readiness response.
#[derive(Debug, Serialize, ToSchema)]
struct ReadyResponse {
    status: &'static str,
    database: &'static str,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// `GET /ready` — Readiness including the equipment store.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "System",
    summary = "Readiness check",
    description = "Returns 200 when the equipment store answers queries, 503 otherwise.",
    responses(
        (status = 200, description = "Ready", body = ReadyResponse),
        (status = 503, description = "Store unavailable", body = ReadyResponse),
    )
)]
pub async fn ready_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.equipment_service.store().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ReadyResponse {
                status: "ok",
                database: "ok",
            }),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyResponse {
                    status: "degraded",
                    database: "unavailable",
                }),
            )
        }
    }
}

/// System routes mounted at the root level (not under /api).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
}
