use std::marker::PhantomData;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use super::map_failure;
use crate::content::application::domain::{sort_for_listing, CollectionResource};
use crate::content::application::ports::incoming::use_cases::{CollectionUseCases, ContentError};
use crate::content::application::ports::outgoing::CollectionRepository;
use crate::content::application::schema::{Draft, Patch};

//
// ──────────────────────────────────────────────────────────
// Service
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct CollectionService<E, R>
where
    E: CollectionResource,
    R: CollectionRepository<E>,
{
    repository: R,
    resource: PhantomData<fn() -> E>,
}

impl<E, R> CollectionService<E, R>
where
    E: CollectionResource,
    R: CollectionRepository<E>,
{
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            resource: PhantomData,
        }
    }
}

#[async_trait]
impl<E, R> CollectionUseCases<E> for CollectionService<E, R>
where
    E: CollectionResource,
    R: CollectionRepository<E>,
{
    async fn list(&self) -> Result<Vec<E>, ContentError> {
        let mut rows = self
            .repository
            .list()
            .await
            .map_err(|e| map_failure::<E>("list", e))?;

        sort_for_listing(&mut rows);
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<E, ContentError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|e| map_failure::<E>("get", e))?
            .ok_or(ContentError::NotFound { resource: E::LABEL })
    }

    async fn create(&self, draft: Draft<E>) -> Result<E, ContentError> {
        let created = self
            .repository
            .create(draft)
            .await
            .map_err(|e| map_failure::<E>("create", e))?;

        info!(resource = E::PATH, id = %created.id(), "record created");
        Ok(created)
    }

    async fn update(&self, id: Uuid, patch: Patch<E>) -> Result<E, ContentError> {
        let updated = self
            .repository
            .update(id, patch)
            .await
            .map_err(|e| map_failure::<E>("update", e))?;

        info!(resource = E::PATH, id = %id, "record updated");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), ContentError> {
        self.repository
            .delete(id)
            .await
            .map_err(|e| map_failure::<E>("delete", e))?;

        info!(resource = E::PATH, id = %id, "record deleted");
        Ok(())
    }
}
