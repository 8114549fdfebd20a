mod collection_use_cases;
mod content_error;
mod singleton_use_cases;

pub use collection_use_cases::CollectionUseCases;
pub use content_error::ContentError;
pub use singleton_use_cases::SingletonUseCases;
