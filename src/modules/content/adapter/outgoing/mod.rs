pub mod in_memory;
pub mod postgres;
pub mod sea_orm_entity;

pub use in_memory::{InMemoryCollectionRepository, InMemorySingletonRepository, InMemoryStorageProbe};
pub use postgres::{PostgresCollectionRepository, PostgresSingletonRepository, PostgresStorageProbe};
