// src/modules/content/application/ports/outgoing/content_repository.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::content::application::domain::{CollectionResource, SingletonResource};
use crate::content::application::schema::{Draft, Patch};

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    /// A unique business key is already held by another row.
    #[error("Duplicate {field}: {value}")]
    Duplicate { field: &'static str, value: String },

    /// Singleton create while a row already exists.
    #[error("Record already exists")]
    AlreadyExists,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::SerializationError(err.to_string())
    }
}

//
// ──────────────────────────────────────────────────────────
// Ports
// ──────────────────────────────────────────────────────────
// Every mutation is atomic per row: the read of the current row and the
// write of its replacement cannot interleave with another write to the
// same resource.
//

#[async_trait]
pub trait CollectionRepository<E: CollectionResource>: Send + Sync {
    /// All rows in insertion order.
    async fn list(&self) -> Result<Vec<E>, RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<E>, RepositoryError>;

    /// Mints id and timestamps. Fails with `Duplicate` on a unique key clash.
    async fn create(&self, draft: Draft<E>) -> Result<E, RepositoryError>;

    /// Fails with `NotFound` or `Duplicate`; nothing is written on failure.
    async fn update(&self, id: Uuid, patch: Patch<E>) -> Result<E, RepositoryError>;

    /// Fails with `NotFound` when no row has `id`.
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait SingletonRepository<E: SingletonResource>: Send + Sync {
    async fn get(&self) -> Result<Option<E>, RepositoryError>;

    /// Fails with `AlreadyExists` when the row is present.
    async fn create(&self, draft: Draft<E>) -> Result<E, RepositoryError>;

    /// Fails with `NotFound` when the row has not been created yet.
    async fn update(&self, patch: Patch<E>) -> Result<E, RepositoryError>;
}

/// Liveness check of the backing store, used by the readiness probe.
#[async_trait]
pub trait StorageProbe: Send + Sync {
    async fn ping(&self) -> Result<(), RepositoryError>;
}
