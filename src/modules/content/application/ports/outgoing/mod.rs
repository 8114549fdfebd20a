mod content_repository;

pub use content_repository::{
    CollectionRepository, RepositoryError, SingletonRepository, StorageProbe,
};
