#![forbid(unsafe_code)]

//! One catalog screen activation.
//!
//! A `CatalogScreen` owns its pagination state, its lifecycle trigger,
//! and its viewport bookkeeping. It never performs I/O: the router issues
//! fetches on its behalf and feeds results back through
//! [`CatalogScreen::apply_batch`] / [`CatalogScreen::fail_load`].

use std::cell::Cell;
use std::fmt;
use std::sync::Arc;

use roster_core::ordering;
use roster_core::pagination::{DEFAULT_END_THRESHOLD, near_end};
use roster_core::{ActivationParams, CatalogItem, PageState};
use roster_profile::{Lifecycle, Profiler};
use roster_runtime::event::{KeyCode, KeyEvent};
use roster_runtime::frame::Frame;

use crate::CATALOG_LIST;

/// Identity of one screen activation on the navigation stack.
///
/// Deferred continuations carry the id of the activation that issued
/// them; the router refuses to resume one against any other activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivationId(pub u64);

impl fmt::Display for ActivationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "activation-{}", self.0)
    }
}

/// What the router should do after the screen handled a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Nothing further.
    Handled,
    /// Pop this activation off the stack.
    Pop,
    /// The scroll position crossed the load-more line; issue a fetch.
    LoadMore,
}

/// One activation of the catalog list screen.
pub struct CatalogScreen {
    activation: ActivationId,
    lifecycle: Lifecycle,
    page: PageState,
    selected: usize,
    scroll_top: usize,
    end_threshold: f64,
    // Rows available for items in the last rendered frame; written from
    // the render path, which only holds a shared reference.
    viewport_rows: Cell<usize>,
}

impl CatalogScreen {
    /// Construct the activation. This is the `Created` phase boundary:
    /// the lifecycle trigger runs before anything else happens to the
    /// instance.
    #[must_use]
    pub fn new(activation: ActivationId, params: &ActivationParams, profiler: Arc<Profiler>) -> Self {
        let lifecycle = Lifecycle::new(CATALOG_LIST, params, profiler);
        Self {
            activation,
            lifecycle,
            page: PageState::new(),
            selected: 0,
            scroll_top: 0,
            end_threshold: DEFAULT_END_THRESHOLD,
            viewport_rows: Cell::new(0),
        }
    }

    /// This activation's stack identity.
    #[must_use]
    pub fn activation(&self) -> ActivationId {
        self.activation
    }

    /// The lifecycle trigger (for settle routing and inspection).
    #[must_use]
    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Pagination state (for inspection in tests).
    #[must_use]
    pub fn page(&self) -> &PageState {
        &self.page
    }

    /// Reset to page zero and claim the in-flight slot; returns the
    /// offset to fetch.
    pub fn start_load(&mut self) -> usize {
        self.page.start()
    }

    /// Claim the in-flight slot for an incremental load, unless a fetch
    /// is already in flight.
    pub fn try_begin_load(&mut self) -> Option<usize> {
        self.page.begin_load()
    }

    /// Merge a fetched batch (replace at offset 0, append otherwise).
    pub fn apply_batch(&mut self, batch: Vec<CatalogItem>) {
        self.page.apply_page(batch);
        self.clamp_cursor();
    }

    /// Release the in-flight slot after a failed fetch; state is
    /// otherwise untouched and no retry is issued.
    pub fn fail_load(&mut self) {
        self.page.fail_load();
    }

    /// The activation transition settled: enter the `Appeared` boundary.
    pub fn settled(&mut self) {
        self.lifecycle.appeared();
    }

    /// Handle a key event.
    pub fn handle_key(&mut self, key: KeyEvent) -> InputOutcome {
        match key.code {
            KeyCode::Escape => return InputOutcome::Pop,
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => return self.scroll_by(-(self.viewport_rows.get() as i32)),
            KeyCode::PageDown => return self.scroll_by(self.viewport_rows.get() as i32),
            KeyCode::Char('f') => self.toggle_selected_favorite(),
            KeyCode::Char('x') => self.remove_selected(),
            _ => {}
        }
        if self.crossed_load_line() {
            InputOutcome::LoadMore
        } else {
            InputOutcome::Handled
        }
    }

    /// Handle a viewport scroll; returns `LoadMore` when the position
    /// crossed the proximity threshold.
    pub fn scroll_by(&mut self, delta: i32) -> InputOutcome {
        let total = self.page.items().len();
        let top = self.scroll_top as i64 + i64::from(delta);
        let max_top = total.saturating_sub(1);
        self.scroll_top = top.clamp(0, max_top as i64) as usize;
        if self.crossed_load_line() {
            InputOutcome::LoadMore
        } else {
            InputOutcome::Handled
        }
    }

    /// Invert the selected row's favorite flag and re-establish
    /// favorite-priority order.
    fn toggle_selected_favorite(&mut self) {
        if let Some(item) = self.page.items().get(self.selected) {
            let id = item.id;
            let reordered = ordering::toggle_favorite(self.page.items(), id);
            self.page.set_items(reordered);
        }
    }

    /// Remove the selected row.
    fn remove_selected(&mut self) {
        if let Some(item) = self.page.items().get(self.selected) {
            let id = item.id;
            let remaining = ordering::remove(self.page.items(), id);
            self.page.set_items(remaining);
            self.clamp_cursor();
        }
    }

    fn move_selection(&mut self, delta: i32) {
        let total = self.page.items().len();
        if total == 0 {
            return;
        }
        let next = (self.selected as i64 + i64::from(delta)).clamp(0, total as i64 - 1);
        self.selected = next as usize;
        // Keep the selection visible.
        let rows = self.viewport_rows.get().max(1);
        if self.selected < self.scroll_top {
            self.scroll_top = self.selected;
        } else if self.selected >= self.scroll_top + rows {
            self.scroll_top = self.selected + 1 - rows;
        }
    }

    fn clamp_cursor(&mut self) {
        let total = self.page.items().len();
        self.selected = self.selected.min(total.saturating_sub(1));
        self.scroll_top = self.scroll_top.min(total.saturating_sub(1));
    }

    fn crossed_load_line(&self) -> bool {
        let rows = self.viewport_rows.get();
        rows > 0
            && !self.page.is_loading()
            && near_end(self.scroll_top, rows, self.page.items().len(), self.end_threshold)
    }

    /// Render this activation. The first completed pass enters the
    /// `FirstRendered` boundary.
    pub fn render(&self, frame: &mut Frame) {
        let height = frame.height();
        if height >= 2 {
            let rows = usize::from(height) - 2;
            self.viewport_rows.set(rows);
            frame.set_line(0, "Home");
            for (row, item) in self
                .page
                .items()
                .iter()
                .skip(self.scroll_top)
                .take(rows)
                .enumerate()
            {
                let index = self.scroll_top + row;
                let cursor = if index == self.selected { '>' } else { ' ' };
                let star = if item.is_favorite { '★' } else { ' ' };
                frame.set_line(1 + row as u16, &format!("{cursor}{star} {}", item.name));
            }
            let footer = if self.page.is_loading() {
                "… loading".to_owned()
            } else {
                format!("{} items", self.page.items().len())
            };
            frame.set_line(height - 1, &footer);
        }
        self.lifecycle.render_pass();
    }
}

impl fmt::Debug for CatalogScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogScreen")
            .field("activation", &self.activation)
            .field("lifecycle", &self.lifecycle)
            .field("items", &self.page.items().len())
            .field("selected", &self.selected)
            .finish()
    }
}
