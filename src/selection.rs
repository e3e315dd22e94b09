//! Row selection for batch actions.
//!
//! The checked state lives on the rendered rows themselves; the tracker keeps
//! no copy of it, so `selected_ids` always reflects what is on screen.

use std::collections::BTreeSet;

use crate::render::ListView;
use crate::types::EventId;

#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionTracker;

impl SelectionTracker {
    pub fn new() -> Self {
        Self
    }

    /// Check or uncheck the row for `id`. Returns false if no such row is
    /// displayed.
    ///
    /// Unchecking any row also clears the select-all box.
    pub fn toggle_row(&self, view: &mut ListView, id: EventId, checked: bool) -> bool {
        match view.row_for_mut(id) {
            Some(row) => {
                row.checked = checked;
                if !checked {
                    view.all_checked = false;
                }
                true
            }
            None => false,
        }
    }

    /// Set every row currently displayed to `checked`.
    pub fn toggle_all(&self, view: &mut ListView, checked: bool) {
        view.all_checked = checked;
        for row in &mut view.rows {
            row.checked = checked;
        }
    }

    pub fn selected_ids(&self, view: &ListView) -> BTreeSet<EventId> {
        view.rows()
            .iter()
            .filter(|row| row.is_checked())
            .map(|row| row.event_id())
            .collect()
    }
}
