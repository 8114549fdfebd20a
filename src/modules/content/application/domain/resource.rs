use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use super::ordering::OrderingPolicy;
use crate::content::application::schema::FieldSpec;

/// Which generated timestamps an entity carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamps {
    None,
    UpdatedOnly,
    CreatedAndUpdated,
}

impl Timestamps {
    pub fn has_created(self) -> bool {
        matches!(self, Timestamps::CreatedAndUpdated)
    }

    pub fn has_updated(self) -> bool {
        !matches!(self, Timestamps::None)
    }
}

/// A typed content entity managed through the generic repository contract.
///
/// The wire/storage form of every entity is its camelCase JSON object; the
/// field table in `FIELDS` describes every caller-writable key of it.
pub trait Resource:
    Serialize + DeserializeOwned + Clone + std::fmt::Debug + Send + Sync + 'static
{
    /// Route segment and storage partition key, e.g. `blog-posts`.
    const PATH: &'static str;
    /// Human-readable name used in messages, e.g. `Blog post`.
    const LABEL: &'static str;
    /// Prefix for machine-readable error codes, e.g. `BLOG_POST`.
    const CODE: &'static str;
    const FIELDS: &'static [FieldSpec];
    const TIMESTAMPS: Timestamps;

    fn id(&self) -> Uuid;

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// Business keys that must be unique among all rows of the resource.
    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// Zero-to-many independently addressable rows.
pub trait CollectionResource: Resource {
    const ORDERING: OrderingPolicy;

    fn manual_order(&self) -> Option<i32> {
        None
    }

    fn published_at(&self) -> Option<DateTime<Utc>> {
        None
    }
}

/// At most one live row, addressed without an id. Has no delete.
pub trait SingletonResource: Resource {}

/// Returns the first unique key of `candidate` already held by another row.
pub fn find_unique_conflict<'a, E, I>(candidate: &E, existing: I) -> Option<(&'static str, String)>
where
    E: Resource,
    I: IntoIterator<Item = &'a E>,
{
    let keys = candidate.unique_keys();
    if keys.is_empty() {
        return None;
    }

    existing
        .into_iter()
        .filter(|row| row.id() != candidate.id())
        .find_map(|row| {
            let taken = row.unique_keys();
            keys.iter()
                .find(|key| taken.contains(key))
                .cloned()
        })
}
