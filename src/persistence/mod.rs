//! Persistence layer: the equipment store abstraction and its backends.
//!
//! [`EquipmentStore`] is the only way the service touches durable state.
//! A handle to it is passed explicitly into the service; there is no
//! global context. [`PostgresStore`] is the production backend,
//! [`MemoryStore`] enforces the same key constraints in memory.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::domain::{Equipment, Include};

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Failure reported by an [`EquipmentStore`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A primary-key or unique constraint rejected the write.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A foreign-key constraint rejected the write.
    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    /// Any other database failure.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        if let Some(db_err) = err.as_database_error() {
            match db_err.kind() {
                ErrorKind::UniqueViolation => {
                    return Self::UniqueViolation(db_err.message().to_string());
                }
                ErrorKind::ForeignKeyViolation => {
                    return Self::ForeignKeyViolation(db_err.message().to_string());
                }
                _ => {}
            }
        }
        Self::Database(err)
    }
}

/// Typed CRUD primitives over equipment records.
///
/// Reads take an explicit [`Include`] instead of traversing relations
/// implicitly. Writes only persist the scalar columns of an [`Equipment`];
/// any attached `equipment_type` is ignored.
#[async_trait]
pub trait EquipmentStore: Send + Sync + std::fmt::Debug {
    /// Returns every equipment record, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on backend failure.
    async fn list(&self, include: Include) -> Result<Vec<Equipment>, StoreError>;

    /// Looks up one equipment record by ID.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on backend failure.
    async fn find(&self, id: &str, include: Include) -> Result<Option<Equipment>, StoreError>;

    /// Returns `true` if an equipment record with the ID exists.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on backend failure.
    async fn exists(&self, id: &str) -> Result<bool, StoreError>;

    /// Returns `true` if an equipment type with the ID exists.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on backend failure.
    async fn type_exists(&self, type_id: i32) -> Result<bool, StoreError>;

    /// Counts the checklists that reference the equipment.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on backend failure.
    async fn count_references(&self, id: &str) -> Result<u64, StoreError>;

    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueViolation`] if the ID is taken,
    /// [`StoreError::ForeignKeyViolation`] if the type does not exist.
    async fn insert(&self, equipment: &Equipment) -> Result<(), StoreError>;

    /// Replaces the stored record with the same ID. Returns `false` when no
    /// record matched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ForeignKeyViolation`] if the type does not
    /// exist, or another [`StoreError`] on backend failure.
    async fn replace(&self, equipment: &Equipment) -> Result<bool, StoreError>;

    /// Removes the record with the ID. Returns `false` when no record matched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ForeignKeyViolation`] if checklists still
    /// reference the record.
    async fn remove(&self, id: &str) -> Result<bool, StoreError>;

    /// Verifies that the backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend cannot serve queries.
    async fn ping(&self) -> Result<(), StoreError>;
}
