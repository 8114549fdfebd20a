use std::cmp::Reverse;

use super::resource::CollectionResource;

/// How a collection is sequenced when listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingPolicy {
    /// `order` ascending, missing order counts as 0.
    ManualAscending,
    /// `order` descending, missing order counts as 0.
    ManualDescending,
    /// `publishedAt`, else `updatedAt`, newest first. Undated rows sink to the end.
    RecencyDescending,
}

/// Sorts rows given in insertion order for listing.
///
/// All sorts are stable: rows with equal keys keep their insertion order.
pub fn sort_for_listing<E: CollectionResource>(rows: &mut [E]) {
    match E::ORDERING {
        OrderingPolicy::ManualAscending => {
            rows.sort_by_key(|row| row.manual_order().unwrap_or(0));
        }
        OrderingPolicy::ManualDescending => {
            rows.sort_by_key(|row| Reverse(row.manual_order().unwrap_or(0)));
        }
        OrderingPolicy::RecencyDescending => {
            rows.sort_by_key(|row| Reverse(row.published_at().or_else(|| row.updated_at())));
        }
    }
}
