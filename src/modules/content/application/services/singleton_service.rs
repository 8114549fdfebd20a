use std::marker::PhantomData;

use async_trait::async_trait;
use tracing::info;

use super::map_failure;
use crate::content::application::domain::SingletonResource;
use crate::content::application::ports::incoming::use_cases::{ContentError, SingletonUseCases};
use crate::content::application::ports::outgoing::SingletonRepository;
use crate::content::application::schema::{Draft, Patch};

#[derive(Debug, Clone)]
pub struct SingletonService<E, R>
where
    E: SingletonResource,
    R: SingletonRepository<E>,
{
    repository: R,
    resource: PhantomData<fn() -> E>,
}

impl<E, R> SingletonService<E, R>
where
    E: SingletonResource,
    R: SingletonRepository<E>,
{
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            resource: PhantomData,
        }
    }
}

#[async_trait]
impl<E, R> SingletonUseCases<E> for SingletonService<E, R>
where
    E: SingletonResource,
    R: SingletonRepository<E>,
{
    async fn get(&self) -> Result<Option<E>, ContentError> {
        self.repository
            .get()
            .await
            .map_err(|e| map_failure::<E>("get", e))
    }

    async fn create(&self, draft: Draft<E>) -> Result<E, ContentError> {
        let created = self
            .repository
            .create(draft)
            .await
            .map_err(|e| map_failure::<E>("create", e))?;

        info!(resource = E::PATH, id = %created.id(), "singleton created");
        Ok(created)
    }

    async fn update(&self, patch: Patch<E>) -> Result<E, ContentError> {
        let updated = self
            .repository
            .update(patch)
            .await
            .map_err(|e| map_failure::<E>("update", e))?;

        info!(resource = E::PATH, id = %updated.id(), "singleton updated");
        Ok(updated)
    }
}
