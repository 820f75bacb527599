//! Equipment request bodies.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::Equipment;

/// Request body for `POST /Equipments` and `PUT /Equipments/{id}`.
///
/// Any `Equipment_Type` object in the body is ignored.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EquipmentRequest {
    /// Five-character equipment identifier.
    #[serde(rename = "ID")]
    pub id: String,
    /// Referenced equipment type.
    #[serde(rename = "Equipment_Type_ID")]
    pub equipment_type_id: i32,
}

impl From<EquipmentRequest> for Equipment {
    fn from(req: EquipmentRequest) -> Self {
        Self::new(req.id, req.equipment_type_id)
    }
}

/// Request body for `POST /Equipments/Auth`. Only the ID is read; a
/// missing or `null` ID deserializes to `None`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EquipmentLoginRequest {
    /// Equipment identifier to resolve.
    #[serde(rename = "ID", default)]
    pub id: Option<String>,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn nested_type_is_not_bound() {
        let body = serde_json::json!({
            "ID": "EQ001",
            "Equipment_Type_ID": 2,
            "Equipment_Type": { "ID": 2, "Name": "Injected", "Questions": [] },
        });
        let Ok(req) = serde_json::from_value::<EquipmentRequest>(body) else {
            panic!("deserialization failed");
        };
        let equipment = Equipment::from(req);
        assert_eq!(equipment, Equipment::new("EQ001", 2));
    }

    #[test]
    fn login_reads_only_id() {
        let body = serde_json::json!({ "ID": "EQ001", "Equipment_Type_ID": 5 });
        let Ok(req) = serde_json::from_value::<EquipmentLoginRequest>(body) else {
            panic!("deserialization failed");
        };
        assert_eq!(req.id.as_deref(), Some("EQ001"));
    }

    #[test]
    fn login_without_id_binds_none() {
        for body in [serde_json::json!({}), serde_json::json!({ "ID": null })] {
            let Ok(req) = serde_json::from_value::<EquipmentLoginRequest>(body) else {
                panic!("deserialization failed");
            };
            assert!(req.id.is_none());
        }
    }
}
