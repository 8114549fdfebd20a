use crate::content::application::domain::Resource;
use crate::content::application::ports::outgoing::RepositoryError;

//
// ──────────────────────────────────────────────────────────
// Use Case Error
// ──────────────────────────────────────────────────────────
// Validation failures never reach a use case: handlers reject them while
// building the `Draft`/`Patch`.
//

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    #[error("{0}")]
    Conflict(String),

    #[error("Storage failure: {0}")]
    StorageFailure(String),
}

impl ContentError {
    pub fn from_repository<E: Resource>(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ContentError::NotFound {
                resource: E::LABEL,
            },
            RepositoryError::Duplicate { field, value } => ContentError::Conflict(format!(
                "{} with {} '{}' already exists",
                E::LABEL,
                field,
                value
            )),
            RepositoryError::AlreadyExists => ContentError::Conflict(format!(
                "{} already exists, update it instead",
                E::LABEL
            )),
            RepositoryError::DatabaseError(msg) | RepositoryError::SerializationError(msg) => {
                ContentError::StorageFailure(msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::application::domain::{BlogPost, Settings};

    #[test]
    fn not_found_names_the_resource() {
        let err = ContentError::from_repository::<BlogPost>(RepositoryError::NotFound);
        assert_eq!(err.to_string(), "Blog post not found");
    }

    #[test]
    fn duplicate_becomes_conflict() {
        let err = ContentError::from_repository::<BlogPost>(RepositoryError::Duplicate {
            field: "slug",
            value: "hello-world".to_string(),
        });
        assert_eq!(
            err,
            ContentError::Conflict("Blog post with slug 'hello-world' already exists".to_string())
        );
    }

    #[test]
    fn existing_singleton_becomes_conflict() {
        let err = ContentError::from_repository::<Settings>(RepositoryError::AlreadyExists);
        assert!(matches!(err, ContentError::Conflict(_)));
    }

    #[test]
    fn storage_errors_become_storage_failure() {
        let err = ContentError::from_repository::<Settings>(RepositoryError::DatabaseError(
            "connection refused".to_string(),
        ));
        assert_eq!(
            err,
            ContentError::StorageFailure("connection refused".to_string())
        );

        let err = ContentError::from_repository::<Settings>(
            RepositoryError::SerializationError("bad body".to_string()),
        );
        assert!(matches!(err, ContentError::StorageFailure(_)));
    }
}
