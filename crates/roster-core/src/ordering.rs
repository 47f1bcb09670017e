#![forbid(unsafe_code)]

//! Favorite-priority ordering as pure functions.
//!
//! The screen composes two independent steps: [`toggle`] inverts one
//! favorite flag, [`favorites_first`] re-establishes the total order.
//! Keeping them separate means each is testable on its own and neither
//! touches shared state.
//!
//! # Ordering invariant
//!
//! After [`favorites_first`]:
//!
//! 1. every favorite precedes every non-favorite;
//! 2. within each partition, items are in ascending case-sensitive
//!    ordinal `name` order;
//! 3. items with equal names keep their pre-sort relative order (the
//!    sort is stable).

use crate::item::CatalogItem;

/// Invert the favorite flag on the item whose id matches `target_id`.
///
/// All other items are returned unchanged. An id with no match yields a
/// plain copy of the input.
#[must_use]
pub fn toggle(items: &[CatalogItem], target_id: u64) -> Vec<CatalogItem> {
    items
        .iter()
        .map(|item| {
            let mut item = item.clone();
            if item.id == target_id {
                item.is_favorite = !item.is_favorite;
            }
            item
        })
        .collect()
}

/// Stable-sort items into favorite-priority order.
#[must_use]
pub fn favorites_first(mut items: Vec<CatalogItem>) -> Vec<CatalogItem> {
    // sort_by is stable, so name ties keep their relative order.
    items.sort_by(|a, b| {
        (!a.is_favorite, a.name.as_str()).cmp(&(!b.is_favorite, b.name.as_str()))
    });
    items
}

/// Toggle one favorite flag and re-sort: the screen-facing composition.
#[must_use]
pub fn toggle_favorite(items: &[CatalogItem], target_id: u64) -> Vec<CatalogItem> {
    favorites_first(toggle(items, target_id))
}

/// Drop the item whose id matches `target_id`, preserving the relative
/// order of everything else.
#[must_use]
pub fn remove(items: &[CatalogItem], target_id: u64) -> Vec<CatalogItem> {
    items
        .iter()
        .filter(|item| item.id != target_id)
        .cloned()
        .collect()
}
