#![forbid(unsafe_code)]

//! Pagination state reconciliation.
//!
//! [`PageState`] owns the fetch cursor, the accumulated items, and the
//! in-flight gate. It never performs the fetch itself; callers ask it for
//! an offset with [`PageState::start`] or [`PageState::begin_load`], hand
//! that offset to a [`crate::catalog::CatalogSource`], and feed the result
//! back through [`PageState::apply_page`] or [`PageState::fail_load`].
//!
//! # Offset contract
//!
//! `offset` is a cursor over already-returned items: every applied batch
//! advances it by the item count held *before* the merge, not by the batch
//! size. The collaborator must treat the offset as "skip this many
//! previously returned items". A batch applied at offset 0 replaces the
//! collection; any other offset appends.
//!
//! # In-flight gate
//!
//! At most one fetch is in flight: `begin_load` returns `None` while
//! `is_loading` is set, and callers must not issue a fetch on `None`.

use crate::item::CatalogItem;

/// Default proximity threshold for end-of-list load triggering, as a
/// fraction of one viewport.
pub const DEFAULT_END_THRESHOLD: f64 = 0.4;

/// Offset, accumulated items, and the in-flight flag for one screen.
#[derive(Debug, Clone, Default)]
pub struct PageState {
    offset: usize,
    items: Vec<CatalogItem>,
    is_loading: bool,
}

impl PageState {
    /// Empty state: offset 0, no items, nothing in flight.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current fetch cursor.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Accumulated items in display order.
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Replace the item collection, e.g. after a favorite toggle.
    ///
    /// Does not touch the cursor or the in-flight flag.
    pub fn set_items(&mut self, items: Vec<CatalogItem>) {
        self.items = items;
    }

    /// Whether a fetch is currently in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Reset to the first page and mark a fetch in flight.
    ///
    /// Returns the offset to fetch (always 0). Existing items stay in
    /// place until the first batch arrives and replaces them.
    pub fn start(&mut self) -> usize {
        self.offset = 0;
        self.is_loading = true;
        0
    }

    /// Claim the in-flight slot for an incremental load.
    ///
    /// Returns `Some(offset)` and sets the gate when nothing is in
    /// flight; returns `None` (and the caller must not fetch) otherwise.
    pub fn begin_load(&mut self) -> Option<usize> {
        if self.is_loading {
            return None;
        }
        self.is_loading = true;
        Some(self.offset)
    }

    /// Merge a fetched batch and release the in-flight gate.
    ///
    /// Offset 0 replaces the collection; any other offset appends. The
    /// cursor advances by the pre-merge item count.
    pub fn apply_page(&mut self, batch: Vec<CatalogItem>) {
        let held_before = self.items.len();
        if self.offset == 0 {
            self.items = batch;
        } else {
            self.items.extend(batch);
        }
        self.is_loading = false;
        self.offset += held_before;
    }

    /// Release the in-flight gate after a failed fetch.
    ///
    /// Items and cursor are untouched; pagination resumes on the next
    /// explicit trigger. No retry is performed here.
    pub fn fail_load(&mut self) {
        self.is_loading = false;
    }
}

/// End-of-list proximity check.
///
/// Returns true when the rows below the viewport number at most
/// `threshold` viewports, i.e. the scroll position has crossed the
/// load-more line. A viewport showing the final row always reports true;
/// an empty viewport never does.
#[must_use]
pub fn near_end(first_visible: usize, viewport_rows: usize, total: usize, threshold: f64) -> bool {
    if viewport_rows == 0 {
        return false;
    }
    let shown = first_visible.saturating_add(viewport_rows);
    let remaining = total.saturating_sub(shown);
    (remaining as f64) <= threshold * (viewport_rows as f64)
}
