//! Selection tracking over the visible working-copy order.
//!
//! Selection is index-based: flags over the current row order, an anchor for
//! range gestures, and separate keyboard-extension state. The extension state
//! holds a snapshot of the selection taken when the first keyboard extension
//! began (the `base`) plus a virtual cursor, so the keyboard range can grow
//! and shrink without destroying what was selected before the gesture.
//!
//! Any selection change originating from pointer interaction resets the
//! extension state; otherwise a stale anchor could make the next keyboard
//! extension jump somewhere surprising.

use crate::app::Direction;
use std::collections::BTreeSet;

/// Whether a bulk operation targets the selection or every row.
///
/// Carried count lets a caller label the operation ("5 selected" vs
/// "all 12").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkScope {
    /// Act on the current selection of this many rows.
    Selection(usize),
    /// No selection exists; act on all rows.
    All(usize),
}

/// Keyboard range-growth state, alive between consecutive extensions.
#[derive(Debug, Clone)]
struct Extension {
    /// Selection as it was when the gesture began.
    base: BTreeSet<usize>,
    /// Fixed end of the growing range.
    anchor: usize,
    /// Moving end of the growing range.
    cursor: usize,
}

/// Tracks which rows are selected and how range gestures grow.
#[derive(Debug, Clone)]
pub struct SelectionController {
    total: usize,
    selected: BTreeSet<usize>,
    anchor: Option<usize>,
    extension: Option<Extension>,
}

impl SelectionController {
    /// Creates an empty selection over `total` rows.
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            total,
            selected: BTreeSet::new(),
            anchor: None,
            extension: None,
        }
    }

    /// Number of rows currently tracked.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Resets the tracked row count after rows were added or removed.
    ///
    /// Out-of-range selection flags and anchor are dropped; extension state
    /// is cleared because its indices may no longer mean what they did.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.selected.retain(|&i| i < total);
        if self.anchor.is_some_and(|a| a >= total) {
            self.anchor = None;
        }
        self.extension = None;
    }

    /// Returns `true` if the row at `index` is selected.
    #[must_use]
    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Number of selected rows.
    #[must_use]
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected indices in ascending order.
    #[must_use]
    pub fn indices(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }

    /// Scope a bulk operation should act on: the selection when one exists,
    /// otherwise every row.
    #[must_use]
    pub fn bulk_scope(&self) -> BulkScope {
        if self.selected.is_empty() {
            BulkScope::All(self.total)
        } else {
            BulkScope::Selection(self.selected.len())
        }
    }

    /// Flips the selection flag at `index` and makes it the range anchor.
    ///
    /// Pointer interaction: clears keyboard-extension state.
    pub fn toggle_single(&mut self, index: usize) {
        if index >= self.total {
            return;
        }
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
        self.anchor = Some(index);
        self.extension = None;
    }

    /// Selects the inclusive span between the anchor and `index`.
    ///
    /// Rows outside the span keep their flags; a range gesture never
    /// deselects. Without a prior anchor the gesture degrades to selecting
    /// `index` alone, which also becomes the anchor.
    ///
    /// Pointer interaction: clears keyboard-extension state.
    pub fn select_range(&mut self, index: usize) {
        if index >= self.total {
            return;
        }
        let anchor = self.anchor.unwrap_or(index);
        let (low, high) = (anchor.min(index), anchor.max(index));
        self.selected.extend(low..=high);
        self.anchor = Some(anchor);
        self.extension = None;
    }

    /// Selects every row.
    ///
    /// Pointer interaction: clears keyboard-extension state.
    pub fn select_all(&mut self) {
        self.selected = (0..self.total).collect();
        self.extension = None;
    }

    /// Clears the selection and the anchor.
    ///
    /// Pointer interaction: clears keyboard-extension state.
    pub fn deselect_all(&mut self) {
        self.selected.clear();
        self.anchor = None;
        self.extension = None;
    }

    /// Replaces the selection wholesale, typically after a reorder remapped
    /// rows to new indices.
    ///
    /// The anchor and keyboard-extension state are dropped: both refer to
    /// pre-reorder indices.
    pub fn replace(&mut self, indices: impl IntoIterator<Item = usize>) {
        self.selected = indices.into_iter().filter(|&i| i < self.total).collect();
        self.anchor = None;
        self.extension = None;
    }

    /// Grows or shrinks the selection by one row in `direction`.
    ///
    /// The first call after any pointer-driven selection change snapshots the
    /// current selection as the base and fixes the anchor at the selection
    /// edge nearest `direction` (or at the last toggled row when the
    /// selection holds at most one row). Every call, including the first,
    /// moves the virtual cursor one row, saturating at the list ends, and
    /// recomputes the selection as `base` plus the anchor-to-cursor span.
    /// When the cursor comes back to the anchor the gesture state is cleared
    /// so the next extension starts fresh.
    pub fn extend_by_one(&mut self, direction: Direction) {
        if self.total == 0 {
            return;
        }

        if self.extension.is_none() {
            let anchor = if self.selected.len() > 1 {
                match direction {
                    Direction::Up => *self.selected.iter().next().unwrap_or(&0),
                    Direction::Down => *self.selected.iter().next_back().unwrap_or(&0),
                }
            } else {
                self.anchor
                    .or_else(|| self.selected.iter().next().copied())
                    .unwrap_or(0)
            };
            self.extension = Some(Extension {
                base: self.selected.clone(),
                anchor,
                cursor: anchor,
            });
        }

        let Some(ext) = self.extension.as_mut() else {
            return;
        };
        ext.cursor = match direction {
            Direction::Up => ext.cursor.saturating_sub(1),
            Direction::Down => (ext.cursor + 1).min(self.total - 1),
        };

        let (low, high) = (ext.anchor.min(ext.cursor), ext.anchor.max(ext.cursor));
        let mut next = ext.base.clone();
        next.extend(low..=high);
        let done = ext.cursor == ext.anchor;
        self.selected = next;

        if done {
            self.extension = None;
        }
    }
}
