//! In-memory equipment store.
//!
//! Holds equipment, types, and checklists behind a single
//! [`tokio::sync::RwLock`] and enforces the primary-key and foreign-key
//! rules of the relational schema, so callers observe the same failures
//! they would get from PostgreSQL.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{EquipmentStore, StoreError};
use crate::domain::{Checklist, Equipment, EquipmentType, Include};

#[derive(Debug, Default)]
struct Tables {
    equipments: BTreeMap<String, Equipment>,
    types: BTreeMap<i32, EquipmentType>,
    checklists: BTreeMap<i64, Checklist>,
}

impl Tables {
    fn hydrate(&self, equipment: &Equipment, include: Include) -> Equipment {
        let bare = equipment.detached();
        if !include.loads_type() {
            return bare;
        }
        match self.types.get(&equipment.equipment_type_id) {
            Some(kind) if include.loads_questions() => {
                let mut kind = kind.clone();
                kind.questions.get_or_insert_with(Vec::new);
                bare.with_type(kind)
            }
            Some(kind) => bare.with_type(kind.without_questions()),
            None => bare,
        }
    }

    fn references(&self, id: &str) -> u64 {
        self.checklists
            .values()
            .filter(|c| c.equipment_id == id)
            .count() as u64
    }
}

/// Equipment store kept entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an equipment type. Questions carried by the type are
    /// stored with it.
    pub async fn add_type(&self, equipment_type: EquipmentType) {
        let mut tables = self.tables.write().await;
        tables.types.insert(equipment_type.id, equipment_type);
    }

    /// Records a submitted checklist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ForeignKeyViolation`] if the equipment does not
    /// exist, [`StoreError::UniqueViolation`] if the checklist ID is taken.
    pub async fn add_checklist(&self, checklist: Checklist) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.equipments.contains_key(&checklist.equipment_id) {
            return Err(StoreError::ForeignKeyViolation(format!(
                "checklists.equipment_id {} not present in equipments",
                checklist.equipment_id
            )));
        }
        if tables.checklists.contains_key(&checklist.id) {
            return Err(StoreError::UniqueViolation(format!(
                "checklist {} already exists",
                checklist.id
            )));
        }
        tables.checklists.insert(checklist.id, checklist);
        Ok(())
    }

    /// Returns the number of stored equipment records.
    pub async fn len(&self) -> usize {
        self.tables.read().await.equipments.len()
    }

    /// Returns `true` if no equipment is stored.
    pub async fn is_empty(&self) -> bool {
        self.tables.read().await.equipments.is_empty()
    }
}

#[async_trait]
impl EquipmentStore for MemoryStore {
    async fn list(&self, include: Include) -> Result<Vec<Equipment>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .equipments
            .values()
            .map(|e| tables.hydrate(e, include))
            .collect())
    }

    async fn find(&self, id: &str, include: Include) -> Result<Option<Equipment>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.equipments.get(id).map(|e| tables.hydrate(e, include)))
    }

    async fn exists(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.tables.read().await.equipments.contains_key(id))
    }

    async fn type_exists(&self, type_id: i32) -> Result<bool, StoreError> {
        Ok(self.tables.read().await.types.contains_key(&type_id))
    }

    async fn count_references(&self, id: &str) -> Result<u64, StoreError> {
        Ok(self.tables.read().await.references(id))
    }

    async fn insert(&self, equipment: &Equipment) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.equipments.contains_key(&equipment.id) {
            return Err(StoreError::UniqueViolation(format!(
                "equipment {} already exists",
                equipment.id
            )));
        }
        if !tables.types.contains_key(&equipment.equipment_type_id) {
            return Err(StoreError::ForeignKeyViolation(format!(
                "equipment type {} does not exist",
                equipment.equipment_type_id
            )));
        }
        tables
            .equipments
            .insert(equipment.id.clone(), equipment.detached());
        Ok(())
    }

    async fn replace(&self, equipment: &Equipment) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.equipments.contains_key(&equipment.id) {
            return Ok(false);
        }
        if !tables.types.contains_key(&equipment.equipment_type_id) {
            return Err(StoreError::ForeignKeyViolation(format!(
                "equipment type {} does not exist",
                equipment.equipment_type_id
            )));
        }
        tables
            .equipments
            .insert(equipment.id.clone(), equipment.detached());
        Ok(true)
    }

    async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.equipments.contains_key(id) {
            return Ok(false);
        }
        let references = tables.references(id);
        if references > 0 {
            return Err(StoreError::ForeignKeyViolation(format!(
                "equipment {id} is referenced by {references} checklist(s)"
            )));
        }
        tables.equipments.remove(id);
        Ok(true)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Question;

    fn forklift() -> EquipmentType {
        let mut kind = EquipmentType::new(1, "Forklift");
        kind.questions = Some(vec![Question {
            id: 10,
            equipment_type_id: 1,
            text: "Brakes OK?".to_string(),
        }]);
        kind
    }

    async fn store_with_equipment() -> MemoryStore {
        let store = MemoryStore::new();
        store.add_type(forklift()).await;
        let Ok(()) = store.insert(&Equipment::new("EQ001", 1)).await else {
            panic!("insert failed");
        };
        store
    }

    #[tokio::test]
    async fn insert_and_find() {
        let store = store_with_equipment().await;
        let Ok(Some(found)) = store.find("EQ001", Include::None).await else {
            panic!("equipment not found");
        };
        assert_eq!(found, Equipment::new("EQ001", 1));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn duplicate_insert_is_unique_violation() {
        let store = store_with_equipment().await;
        let result = store.insert(&Equipment::new("EQ001", 1)).await;
        assert!(matches!(result, Err(StoreError::UniqueViolation(_))));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn insert_with_unknown_type_is_foreign_key_violation() {
        let store = MemoryStore::new();
        let result = store.insert(&Equipment::new("EQ001", 7)).await;
        assert!(matches!(result, Err(StoreError::ForeignKeyViolation(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn include_controls_attached_relations() {
        let store = store_with_equipment().await;

        let Ok(Some(bare)) = store.find("EQ001", Include::None).await else {
            panic!("equipment not found");
        };
        assert!(bare.equipment_type.is_none());

        let Ok(Some(typed)) = store.find("EQ001", Include::EquipmentType).await else {
            panic!("equipment not found");
        };
        let Some(kind) = typed.equipment_type else {
            panic!("type not attached");
        };
        assert_eq!(kind.name, "Forklift");
        assert!(kind.questions.is_none());

        let Ok(listed) = store.list(Include::EquipmentTypeWithQuestions).await else {
            panic!("list failed");
        };
        let questions = listed
            .first()
            .and_then(|e| e.equipment_type.as_ref())
            .and_then(|t| t.questions.as_ref())
            .map_or(0, Vec::len);
        assert_eq!(questions, 1);
    }

    #[tokio::test]
    async fn replace_missing_returns_false() {
        let store = store_with_equipment().await;
        let result = store.replace(&Equipment::new("EQ999", 1)).await;
        assert!(matches!(result, Ok(false)));
    }

    #[tokio::test]
    async fn remove_referenced_is_rejected() {
        let store = store_with_equipment().await;
        let Ok(()) = store.add_checklist(Checklist::new(1, "EQ001")).await else {
            panic!("checklist insert failed");
        };
        assert!(matches!(store.count_references("EQ001").await, Ok(1)));

        let result = store.remove("EQ001").await;
        assert!(matches!(result, Err(StoreError::ForeignKeyViolation(_))));
        assert!(matches!(store.exists("EQ001").await, Ok(true)));
    }

    #[tokio::test]
    async fn remove_then_exists_is_false() {
        let store = store_with_equipment().await;
        assert!(matches!(store.remove("EQ001").await, Ok(true)));
        assert!(matches!(store.exists("EQ001").await, Ok(false)));
        assert!(matches!(store.remove("EQ001").await, Ok(false)));
    }

    #[tokio::test]
    async fn checklist_for_unknown_equipment_is_rejected() {
        let store = MemoryStore::new();
        let result = store.add_checklist(Checklist::new(1, "EQ404")).await;
        assert!(matches!(result, Err(StoreError::ForeignKeyViolation(_))));
    }
}
