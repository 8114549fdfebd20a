use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use super::validator::{Draft, Patch};
use crate::content::application::domain::Resource;

/// Builds a new entity from a validated draft, minting its generated fields.
pub fn materialize<E: Resource>(
    draft: Draft<E>,
    id: Uuid,
    now: DateTime<Utc>,
) -> Result<E, serde_json::Error> {
    let mut document = draft.into_fields();
    document.insert("id".to_string(), serde_json::to_value(id)?);

    let stamp = serde_json::to_value(now)?;
    if E::TIMESTAMPS.has_created() {
        document.insert("createdAt".to_string(), stamp.clone());
    }
    if E::TIMESTAMPS.has_updated() {
        document.insert("updatedAt".to_string(), stamp);
    }

    serde_json::from_value(Value::Object(document))
}

/// Shallow field-by-field merge of `patch` onto `current`.
///
/// `id` and `createdAt` never change; `updatedAt` never moves backwards.
pub fn merge<E: Resource>(
    current: &E,
    patch: &Patch<E>,
    now: DateTime<Utc>,
) -> Result<E, serde_json::Error> {
    let mut document = serde_json::to_value(current)?;

    if let Value::Object(fields) = &mut document {
        for (name, value) in patch.fields() {
            fields.insert(name.clone(), value.clone());
        }

        if E::TIMESTAMPS.has_updated() {
            let stamp = current.updated_at().map_or(now, |previous| previous.max(now));
            fields.insert("updatedAt".to_string(), serde_json::to_value(stamp)?);
        }
    }

    serde_json::from_value(document)
}
