mod collection_service;
mod singleton_service;

pub use collection_service::CollectionService;
pub use singleton_service::SingletonService;

use tracing::{debug, error, warn};

use crate::content::application::domain::Resource;
use crate::content::application::ports::incoming::use_cases::ContentError;
use crate::content::application::ports::outgoing::RepositoryError;

/// Logs a repository failure at the level it deserves and maps it into the
/// use-case taxonomy.
fn map_failure<E: Resource>(operation: &'static str, err: RepositoryError) -> ContentError {
    match &err {
        RepositoryError::NotFound => {
            debug!(resource = E::PATH, operation, "record not found");
        }
        RepositoryError::Duplicate { .. } | RepositoryError::AlreadyExists => {
            warn!(resource = E::PATH, operation, "write rejected: {}", err);
        }
        RepositoryError::DatabaseError(_) | RepositoryError::SerializationError(_) => {
            error!(resource = E::PATH, operation, "storage failure: {}", err);
        }
    }

    ContentError::from_repository::<E>(err)
}
