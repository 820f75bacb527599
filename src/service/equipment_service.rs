//! Equipment service: validates requests and drives the equipment store.

use std::sync::Arc;

use crate::domain::validator;
use crate::domain::{Equipment, Include};
use crate::error::{ApiError, ValidationError};
use crate::persistence::{EquipmentStore, StoreError};

/// Message returned when a login lookup names an unknown equipment.
pub const INVALID_EQUIPMENT_ID: &str = "Invalid Equipment ID";

/// Orchestration layer for the equipment resource.
///
/// Stateless across requests: holds only the store handle. Every mutation
/// follows the pattern: validate → write through the store → classify a
/// failed write by re-checking existence → return a typed result.
#[derive(Debug, Clone)]
pub struct EquipmentService {
    store: Arc<dyn EquipmentStore>,
}

impl EquipmentService {
    /// Creates a new `EquipmentService` over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn EquipmentStore>) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn EquipmentStore> {
        &self.store
    }

    /// Lists every equipment with its type and the type's questions.
    ///
    /// Unpaginated: the full table is returned on every call.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Internal`] on store failure.
    pub async fn list(&self) -> Result<Vec<Equipment>, ApiError> {
        Ok(self.store.list(Include::EquipmentTypeWithQuestions).await?)
    }

    /// Returns the equipment with the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if absent.
    pub async fn get(&self, id: &str) -> Result<Equipment, ApiError> {
        self.store
            .find(id, Include::None)
            .await?
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    /// Validates and inserts a new equipment.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the ID is not five characters or
    /// the type is unknown, [`ApiError::Conflict`] if the ID is taken.
    pub async fn create(&self, equipment: Equipment) -> Result<Equipment, ApiError> {
        validator::ensure_five_character_id(&equipment)?;
        validator::ensure_equipment_type_exists(self.store.as_ref(), &equipment).await?;

        if let Err(err) = self.store.insert(&equipment).await {
            if self.store.exists(&equipment.id).await? {
                tracing::warn!(equipment_id = %equipment.id, "equipment already exists");
                return Err(ApiError::Conflict(equipment.id));
            }
            if let StoreError::ForeignKeyViolation(_) = err {
                // The type was removed after it was validated.
                return Err(ValidationError::UnknownType(equipment.equipment_type_id).into());
            }
            return Err(err.into());
        }

        tracing::info!(
            equipment_id = %equipment.id,
            equipment_type_id = equipment.equipment_type_id,
            "equipment created"
        );
        Ok(equipment.detached())
    }

    /// Fully replaces the equipment addressed by `id`.
    ///
    /// The type reference is not re-validated up front; a dangling
    /// reference is rejected by the store's foreign key.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the ID is not five characters,
    /// [`ApiError::BadRequest`] if `id` differs from `equipment.id`,
    /// [`ApiError::NotFound`] if nothing matched.
    pub async fn update(&self, id: &str, equipment: Equipment) -> Result<(), ApiError> {
        validator::ensure_five_character_id(&equipment)?;
        if id != equipment.id {
            return Err(ApiError::BadRequest(format!(
                "path ID {id} does not match body ID {}",
                equipment.id
            )));
        }

        match self.store.replace(&equipment).await {
            Ok(true) => {
                tracing::info!(equipment_id = %id, "equipment updated");
                Ok(())
            }
            Ok(false) => Err(ApiError::NotFound(id.to_string())),
            Err(err) => {
                if !self.store.exists(id).await? {
                    return Err(ApiError::NotFound(id.to_string()));
                }
                match err {
                    StoreError::ForeignKeyViolation(_) => {
                        Err(ValidationError::UnknownType(equipment.equipment_type_id).into())
                    }
                    other => Err(other.into()),
                }
            }
        }
    }

    /// Resolves an equipment by ID for the check-in flow, with its type
    /// attached.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BadRequest`] with [`INVALID_EQUIPMENT_ID`] if the
    /// ID is unknown.
    pub async fn login(&self, id: &str) -> Result<Equipment, ApiError> {
        match self.store.find(id, Include::EquipmentType).await? {
            Some(equipment) => {
                tracing::debug!(equipment_id = %id, "equipment login");
                Ok(equipment)
            }
            None => Err(ApiError::BadRequest(INVALID_EQUIPMENT_ID.to_string())),
        }
    }

    /// Deletes an unreferenced equipment and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if absent,
    /// [`ApiError::Validation`] if checklists still reference it.
    pub async fn delete(&self, id: &str) -> Result<Equipment, ApiError> {
        let equipment = self.get(id).await?;
        validator::ensure_unreferenced(self.store.as_ref(), &equipment).await?;

        match self.store.remove(id).await {
            Ok(true) => {
                tracing::info!(equipment_id = %id, "equipment deleted");
                Ok(equipment)
            }
            Ok(false) => Err(ApiError::NotFound(id.to_string())),
            Err(StoreError::ForeignKeyViolation(_)) => {
                let references = self.store.count_references(id).await?;
                Err(ValidationError::StillReferenced {
                    id: id.to_string(),
                    references,
                }
                .into())
            }
            Err(err) => Err(err.into()),
        }
    }
}
