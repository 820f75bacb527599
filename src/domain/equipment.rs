//! Equipment records and the entities they reference.
//!
//! Field names on the wire follow the checklist system's established JSON
//! contract (`ID`, `Equipment_Type_ID`, ...), so every struct here carries
//! explicit serde renames.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Number of characters every equipment identifier must have.
pub const EQUIPMENT_ID_LEN: usize = 5;

/// A piece of equipment that checklists are filled in against.
///
/// The `equipment_type` relation is only populated when the read path
/// asks for it through [`super::Include`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Equipment {
    /// Five-character identifier (primary key).
    #[serde(rename = "ID")]
    pub id: String,

    /// Foreign key to the owning [`EquipmentType`].
    #[serde(rename = "Equipment_Type_ID")]
    pub equipment_type_id: i32,

    /// Eagerly loaded type, `null` when not requested.
    #[serde(rename = "Equipment_Type", default)]
    pub equipment_type: Option<EquipmentType>,
}

impl Equipment {
    /// Creates a bare equipment record without its related type loaded.
    #[must_use]
    pub fn new(id: impl Into<String>, equipment_type_id: i32) -> Self {
        Self {
            id: id.into(),
            equipment_type_id,
            equipment_type: None,
        }
    }

    /// Returns the record with the given type attached.
    #[must_use]
    pub fn with_type(mut self, equipment_type: EquipmentType) -> Self {
        self.equipment_type = Some(equipment_type);
        self
    }

    /// Returns a copy of the record with all relations stripped.
    #[must_use]
    pub fn detached(&self) -> Self {
        Self::new(self.id.clone(), self.equipment_type_id)
    }
}

/// Classification of equipment, owning the checklist questions asked for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EquipmentType {
    /// Type identifier.
    #[serde(rename = "ID")]
    pub id: i32,

    /// Display name (e.g. `"Forklift"`).
    #[serde(rename = "Name")]
    pub name: String,

    /// Checklist questions, `null` when not eagerly loaded.
    #[serde(rename = "Questions", default)]
    pub questions: Option<Vec<Question>>,
}

impl EquipmentType {
    /// Creates a type with no questions loaded.
    #[must_use]
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            questions: None,
        }
    }

    /// Returns a copy without the question collection.
    #[must_use]
    pub fn without_questions(&self) -> Self {
        Self::new(self.id, self.name.clone())
    }
}

/// A single checklist question belonging to an [`EquipmentType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Question {
    /// Question identifier.
    #[serde(rename = "ID")]
    pub id: i32,

    /// Owning type.
    #[serde(rename = "Equipment_Type_ID")]
    pub equipment_type_id: i32,

    /// Question text shown to the operator.
    #[serde(rename = "Text")]
    pub text: String,
}

/// A submitted checklist. Holds a foreign key to the inspected equipment,
/// which keeps that equipment from being deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    /// Submission identifier.
    pub id: i64,
    /// Inspected equipment.
    pub equipment_id: String,
    /// Submission timestamp.
    pub submitted_at: DateTime<Utc>,
}

impl Checklist {
    /// Creates a checklist submitted now for the given equipment.
    #[must_use]
    pub fn new(id: i64, equipment_id: impl Into<String>) -> Self {
        Self {
            id,
            equipment_id: equipment_id.into(),
            submitted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_wire_names() {
        let equipment = Equipment::new("EQ001", 3);
        let Ok(json) = serde_json::to_value(&equipment) else {
            panic!("serialization failed");
        };
        assert_eq!(
            json,
            serde_json::json!({
                "ID": "EQ001",
                "Equipment_Type_ID": 3,
                "Equipment_Type": null,
            })
        );
    }

    #[test]
    fn nested_type_serializes_questions() {
        let mut kind = EquipmentType::new(3, "Forklift");
        kind.questions = Some(vec![Question {
            id: 1,
            equipment_type_id: 3,
            text: "Horn working?".to_string(),
        }]);
        let equipment = Equipment::new("EQ001", 3).with_type(kind);

        let Ok(json) = serde_json::to_value(&equipment) else {
            panic!("serialization failed");
        };
        assert_eq!(json["Equipment_Type"]["Name"], "Forklift");
        assert_eq!(json["Equipment_Type"]["Questions"][0]["Text"], "Horn working?");
    }

    #[test]
    fn detached_drops_relations() {
        let equipment = Equipment::new("EQ001", 3).with_type(EquipmentType::new(3, "Forklift"));
        let bare = equipment.detached();
        assert!(bare.equipment_type.is_none());
        assert_eq!(bare.id, "EQ001");
    }
}
