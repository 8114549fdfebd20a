use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::content::application::domain::{
    find_unique_conflict, CollectionResource, SingletonResource,
};
use crate::content::application::ports::outgoing::{
    CollectionRepository, RepositoryError, SingletonRepository, StorageProbe,
};
use crate::content::application::schema::{materialize, merge, Draft, Patch};

//
// ──────────────────────────────────────────────────────────
// Collection
// ──────────────────────────────────────────────────────────
// Rows live in a Vec in insertion order. Each mutation holds the write lock
// for its whole read-check-write sequence.
//

#[derive(Debug)]
pub struct InMemoryCollectionRepository<E> {
    rows: Arc<RwLock<Vec<E>>>,
}

impl<E> InMemoryCollectionRepository<E> {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<E> Default for InMemoryCollectionRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for InMemoryCollectionRepository<E> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
        }
    }
}

#[async_trait]
impl<E: CollectionResource> CollectionRepository<E> for InMemoryCollectionRepository<E> {
    async fn list(&self) -> Result<Vec<E>, RepositoryError> {
        Ok(self.rows.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<E>, RepositoryError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|row| row.id() == id).cloned())
    }

    async fn create(&self, draft: Draft<E>) -> Result<E, RepositoryError> {
        let mut rows = self.rows.write().await;

        let entity = materialize(draft, Uuid::new_v4(), Utc::now())?;
        if let Some((field, value)) = find_unique_conflict(&entity, rows.iter()) {
            return Err(RepositoryError::Duplicate { field, value });
        }

        rows.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, id: Uuid, patch: Patch<E>) -> Result<E, RepositoryError> {
        let mut rows = self.rows.write().await;

        let index = rows
            .iter()
            .position(|row| row.id() == id)
            .ok_or(RepositoryError::NotFound)?;

        let updated = merge(&rows[index], &patch, Utc::now())?;
        if let Some((field, value)) = find_unique_conflict(&updated, rows.iter()) {
            return Err(RepositoryError::Duplicate { field, value });
        }

        rows[index] = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().await;

        let index = rows
            .iter()
            .position(|row| row.id() == id)
            .ok_or(RepositoryError::NotFound)?;

        rows.remove(index);
        Ok(())
    }
}

//
// ──────────────────────────────────────────────────────────
// Singleton
// ──────────────────────────────────────────────────────────
//

#[derive(Debug)]
pub struct InMemorySingletonRepository<E> {
    row: Arc<RwLock<Option<E>>>,
}

impl<E> InMemorySingletonRepository<E> {
    pub fn new() -> Self {
        Self {
            row: Arc::new(RwLock::new(None)),
        }
    }
}

impl<E> Default for InMemorySingletonRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for InMemorySingletonRepository<E> {
    fn clone(&self) -> Self {
        Self {
            row: Arc::clone(&self.row),
        }
    }
}

#[async_trait]
impl<E: SingletonResource> SingletonRepository<E> for InMemorySingletonRepository<E> {
    async fn get(&self) -> Result<Option<E>, RepositoryError> {
        Ok(self.row.read().await.clone())
    }

    async fn create(&self, draft: Draft<E>) -> Result<E, RepositoryError> {
        let mut row = self.row.write().await;
        if row.is_some() {
            return Err(RepositoryError::AlreadyExists);
        }

        let entity = materialize(draft, Uuid::new_v4(), Utc::now())?;
        *row = Some(entity.clone());
        Ok(entity)
    }

    async fn update(&self, patch: Patch<E>) -> Result<E, RepositoryError> {
        let mut row = self.row.write().await;
        let current = row.as_ref().ok_or(RepositoryError::NotFound)?;

        let updated = merge(current, &patch, Utc::now())?;
        *row = Some(updated.clone());
        Ok(updated)
    }
}

//
// ──────────────────────────────────────────────────────────
// Probe
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, Default)]
pub struct InMemoryStorageProbe;

#[async_trait]
impl StorageProbe for InMemoryStorageProbe {
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
