//! equipment-checklist-api server entry point.
//!
//! Starts the Axum HTTP server with the equipment REST endpoints.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use equipment_checklist_api::api;
use equipment_checklist_api::api::auth::BearerAuth;
use equipment_checklist_api::app_state::AppState;
use equipment_checklist_api::config::ServerConfig;
use equipment_checklist_api::persistence::{EquipmentStore, MemoryStore, PostgresStore};
use equipment_checklist_api::service::EquipmentService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::from_env()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    tracing::info!(addr = %config.listen_addr, "starting equipment-checklist-api");

    // Build persistence layer
    let store = build_store(&config).await?;

    // Build service layer
    let equipment_service = Arc::new(EquipmentService::new(store));

    // Build application state
    let auth = BearerAuth::new(config.api_bearer_token.clone());
    if !auth.is_enabled() {
        tracing::warn!("API_BEARER_TOKEN not set; equipment routes are unauthenticated");
    }
    let app_state = AppState {
        equipment_service,
        auth,
    };

    // Build router
    let app = api::build_router(app_state);
    #[cfg(feature = "swagger-ui")]
    let app = {
        use utoipa::OpenApi;
        app.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", api::openapi::ApiDoc::openapi()),
        )
    };
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.request_timeout_secs,
            ))),
    );

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Connects to PostgreSQL (applying migrations if enabled), or falls back
/// to the in-memory store when persistence is disabled.
async fn build_store(config: &ServerConfig) -> anyhow::Result<Arc<dyn EquipmentStore>> {
    if !config.persistence_enabled {
        tracing::warn!("persistence disabled; equipment is kept in memory only");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect(&config.database_url)
        .await
        .context("connecting to PostgreSQL")?;
    let store = PostgresStore::new(pool);

    if config.database_run_migrations {
        store.migrate().await.context("applying migrations")?;
        tracing::info!("database migrations applied");
    }

    Ok(Arc::new(store))
}
