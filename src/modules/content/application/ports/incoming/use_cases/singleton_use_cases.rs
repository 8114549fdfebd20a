use async_trait::async_trait;

use super::ContentError;
use crate::content::application::domain::SingletonResource;
use crate::content::application::schema::{Draft, Patch};

#[async_trait]
pub trait SingletonUseCases<E: SingletonResource>: Send + Sync {
    /// `None` until the row is created.
    async fn get(&self) -> Result<Option<E>, ContentError>;

    /// `Conflict` when the row already exists.
    async fn create(&self, draft: Draft<E>) -> Result<E, ContentError>;

    /// `NotFound` when the row has not been created yet.
    async fn update(&self, patch: Patch<E>) -> Result<E, ContentError>;
}
