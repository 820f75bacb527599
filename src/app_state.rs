//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::api::auth::BearerAuth;
use crate::service::EquipmentService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Equipment service for all business logic.
    pub equipment_service: Arc<EquipmentService>,
    /// Bearer-token guard for the equipment routes.
    pub auth: BearerAuth,
}
