//! Service layer: business logic orchestration.
//!
//! [`EquipmentService`] runs the validator ahead of every mutation,
//! delegates storage to the [`super::persistence::EquipmentStore`], and
//! classifies store failures into [`super::error::ApiError`] variants.

pub mod equipment_service;

pub use equipment_service::EquipmentService;
