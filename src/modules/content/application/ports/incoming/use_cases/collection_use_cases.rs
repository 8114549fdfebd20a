use async_trait::async_trait;
use uuid::Uuid;

use super::ContentError;
use crate::content::application::domain::CollectionResource;
use crate::content::application::schema::{Draft, Patch};

//
// ──────────────────────────────────────────────────────────
// Incoming Port (Use Case)
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait CollectionUseCases<E: CollectionResource>: Send + Sync {
    /// All rows, sorted by the resource's ordering policy. Never fails on an
    /// empty collection.
    async fn list(&self) -> Result<Vec<E>, ContentError>;

    async fn get(&self, id: Uuid) -> Result<E, ContentError>;

    async fn create(&self, draft: Draft<E>) -> Result<E, ContentError>;

    async fn update(&self, id: Uuid, patch: Patch<E>) -> Result<E, ContentError>;

    async fn delete(&self, id: Uuid) -> Result<(), ContentError>;
}
