//! PostgreSQL implementation of the equipment store.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;

use super::{EquipmentStore, StoreError};
use crate::domain::{Equipment, EquipmentType, Include, Question};

/// PostgreSQL-backed equipment store using `sqlx::PgPool`.
///
/// Every operation is a single statement on a pooled connection; the pool
/// hands each request its own connection.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the embedded schema migrations.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::migrate::MigrateError`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }

    /// Attaches equipment types (and optionally their questions) to the
    /// given records with one batched query per relation.
    async fn attach_types(
        &self,
        equipments: &mut [Equipment],
        include: Include,
    ) -> Result<(), StoreError> {
        if !include.loads_type() || equipments.is_empty() {
            return Ok(());
        }

        let mut type_ids: Vec<i32> = equipments.iter().map(|e| e.equipment_type_id).collect();
        type_ids.sort_unstable();
        type_ids.dedup();

        let rows = sqlx::query_as::<_, (i32, String)>(
            "SELECT id, name FROM equipment_types WHERE id = ANY($1)",
        )
        .bind(&type_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut types: HashMap<i32, EquipmentType> = rows
            .into_iter()
            .map(|(id, name)| (id, EquipmentType::new(id, name)))
            .collect();

        if include.loads_questions() {
            for kind in types.values_mut() {
                kind.questions = Some(Vec::new());
            }
            let questions = sqlx::query_as::<_, (i32, i32, String)>(
                "SELECT id, equipment_type_id, text FROM questions \
                 WHERE equipment_type_id = ANY($1) ORDER BY id",
            )
            .bind(&type_ids)
            .fetch_all(&self.pool)
            .await?;

            for (id, equipment_type_id, text) in questions {
                if let Some(list) = types
                    .get_mut(&equipment_type_id)
                    .and_then(|t| t.questions.as_mut())
                {
                    list.push(Question {
                        id,
                        equipment_type_id,
                        text,
                    });
                }
            }
        }

        for equipment in equipments.iter_mut() {
            equipment.equipment_type = types.get(&equipment.equipment_type_id).cloned();
        }
        Ok(())
    }
}

#[async_trait]
impl EquipmentStore for PostgresStore {
    async fn list(&self, include: Include) -> Result<Vec<Equipment>, StoreError> {
        let rows = sqlx::query_as::<_, (String, i32)>(
            "SELECT id, equipment_type_id FROM equipments ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut equipments: Vec<Equipment> = rows
            .into_iter()
            .map(|(id, type_id)| Equipment::new(id, type_id))
            .collect();
        self.attach_types(&mut equipments, include).await?;
        Ok(equipments)
    }

    async fn find(&self, id: &str, include: Include) -> Result<Option<Equipment>, StoreError> {
        let row = sqlx::query_as::<_, (String, i32)>(
            "SELECT id, equipment_type_id FROM equipments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some((id, type_id)) = row else {
            return Ok(None);
        };
        let mut found = [Equipment::new(id, type_id)];
        self.attach_types(&mut found, include).await?;
        let [equipment] = found;
        Ok(Some(equipment))
    }

    async fn exists(&self, id: &str) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM equipments WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn type_exists(&self, type_id: i32) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM equipment_types WHERE id = $1)",
        )
        .bind(type_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn count_references(&self, id: &str) -> Result<u64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM checklists WHERE equipment_id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn insert(&self, equipment: &Equipment) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO equipments (id, equipment_type_id) VALUES ($1, $2)")
            .bind(&equipment.id)
            .bind(equipment.equipment_type_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn replace(&self, equipment: &Equipment) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE equipments SET equipment_type_id = $2 WHERE id = $1")
            .bind(&equipment.id)
            .bind(equipment.equipment_type_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM equipments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
