//! Preconditions gating equipment mutations.
//!
//! Every check is either pure or a read-only query against the
//! [`EquipmentStore`]. Callers run them in order and stop at the first
//! failure.

use super::{EQUIPMENT_ID_LEN, Equipment};
use crate::error::{ApiError, ValidationError};
use crate::persistence::EquipmentStore;

/// Fails unless the identifier has exactly five characters.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidIdLength`].
pub fn ensure_five_character_id(equipment: &Equipment) -> Result<(), ValidationError> {
    let len = equipment.id.chars().count();
    if len != EQUIPMENT_ID_LEN {
        return Err(ValidationError::InvalidIdLength { len });
    }
    Ok(())
}

/// Fails unless `equipment.equipment_type_id` names an existing type.
///
/// # Errors
///
/// Returns [`ValidationError::UnknownType`] wrapped in [`ApiError`], or
/// [`ApiError::Internal`] if the store query fails.
pub async fn ensure_equipment_type_exists(
    store: &dyn EquipmentStore,
    equipment: &Equipment,
) -> Result<(), ApiError> {
    if !store.type_exists(equipment.equipment_type_id).await? {
        return Err(ValidationError::UnknownType(equipment.equipment_type_id).into());
    }
    Ok(())
}

/// Fails if any checklist still references the equipment.
///
/// # Errors
///
/// Returns [`ValidationError::StillReferenced`] wrapped in [`ApiError`], or
/// [`ApiError::Internal`] if the store query fails.
pub async fn ensure_unreferenced(
    store: &dyn EquipmentStore,
    equipment: &Equipment,
) -> Result<(), ApiError> {
    let references = store.count_references(&equipment.id).await?;
    if references > 0 {
        return Err(ValidationError::StillReferenced {
            id: equipment.id.clone(),
            references,
        }
        .into());
    }
    Ok(())
}
