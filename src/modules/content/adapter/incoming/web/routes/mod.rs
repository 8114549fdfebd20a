mod collection_routes;
mod error_mapping;
mod singleton_routes;

pub use collection_routes::configure_collection;
pub use error_mapping::{map_content_error, not_found};
pub use singleton_routes::configure_singleton;
