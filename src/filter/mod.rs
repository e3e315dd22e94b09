//! Filter, sort and page state for the event list.
//!
//! `FilterState` is the form behind the list: two independent checkbox
//! groups (status and level), exclusive pick lists such as `pc`, free-text
//! fields, the sort token and the current page. Every mutator here changes
//! state only; issuing the matching search is the controller's job.

mod order;

use std::collections::{BTreeMap, BTreeSet};

pub use order::{OrderBy, SortField};

use crate::types::{EventStatus, SecurityLevel};

/// Exclusive group holding the selected computer's uid.
pub const PC_FIELD: &str = "pc";

/// Parameter names the form writes itself; exclusive and text fields
/// cannot use them.
pub const RESERVED_FIELDS: [&str; 4] = ["status", "level", "orderby", "page"];

fn is_reserved(field: &str) -> bool {
    RESERVED_FIELDS.contains(&field)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    statuses: BTreeSet<EventStatus>,
    levels: BTreeSet<SecurityLevel>,
    exclusive: BTreeMap<String, String>,
    text: BTreeMap<String, String>,
    orderby: Option<OrderBy>,
    page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            statuses: EventStatus::PRESELECTED.into_iter().collect(),
            levels: SecurityLevel::PRESELECTED.into_iter().collect(),
            exclusive: BTreeMap::new(),
            text: BTreeMap::new(),
            orderby: None,
            page: 1,
        }
    }
}

impl FilterState {
    /// A form with nothing checked, selected or sorted.
    pub fn cleared() -> Self {
        Self {
            statuses: BTreeSet::new(),
            levels: BTreeSet::new(),
            ..Default::default()
        }
    }

    pub fn statuses(&self) -> &BTreeSet<EventStatus> {
        &self.statuses
    }

    pub fn levels(&self) -> &BTreeSet<SecurityLevel> {
        &self.levels
    }

    pub fn orderby(&self) -> Option<OrderBy> {
        self.orderby
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Currently selected value of an exclusive group, if any.
    pub fn exclusive(&self, field: &str) -> Option<&str> {
        self.exclusive.get(field).map(String::as_str)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.text.get(field).map(String::as_str)
    }

    /// Flip one status checkbox. Returns the new checked state.
    pub fn toggle_status(&mut self, status: EventStatus) -> bool {
        toggle(&mut self.statuses, status)
    }

    /// Flip one level checkbox. Returns the new checked state.
    pub fn toggle_level(&mut self, level: SecurityLevel) -> bool {
        toggle(&mut self.levels, level)
    }

    pub fn set_status_checked(&mut self, status: EventStatus, checked: bool) {
        set_member(&mut self.statuses, status, checked);
    }

    pub fn set_level_checked(&mut self, level: SecurityLevel, checked: bool) {
        set_member(&mut self.levels, level, checked);
    }

    /// Select `value` in an exclusive group.
    ///
    /// Re-selecting the current value clears the group; any other value
    /// replaces the previous selection. Returns the resulting selection,
    /// which is always `None` for a reserved field name.
    pub fn set_exclusive(&mut self, field: &str, value: &str) -> Option<&str> {
        if is_reserved(field) {
            tracing::debug!(field, "ignoring exclusive selection on reserved field");
            return None;
        }
        if self.exclusive(field) == Some(value) {
            self.exclusive.remove(field);
            return None;
        }
        self.exclusive.insert(field.to_string(), value.to_string());
        self.exclusive(field)
    }

    /// Set a free-text field. An empty value removes it from the query.
    /// Reserved field names are ignored.
    pub fn set_text(&mut self, field: &str, value: &str) {
        if is_reserved(field) {
            tracing::debug!(field, "ignoring text on reserved field");
            return;
        }
        let value = value.trim();
        if value.is_empty() {
            self.text.remove(field);
        } else {
            self.text.insert(field.to_string(), value.to_string());
        }
    }

    /// Sort by `field`, flipping direction if it is already the sort key.
    pub fn set_order(&mut self, field: SortField) -> OrderBy {
        let next = OrderBy::toggled(self.orderby, field);
        self.orderby = Some(next);
        next
    }

    pub fn set_orderby(&mut self, orderby: Option<OrderBy>) {
        self.orderby = orderby;
    }

    /// Jump to a page. Pages are 1-based; 0 is treated as 1.
    ///
    /// Changing other filters never resets the page on its own.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Restore the form to its initial state: default checkboxes, no
    /// exclusive or text selections, no sort key, first page.
    pub fn reset(&mut self) {
        *self = FilterState::default();
    }

    /// Query parameters using the names the search endpoint accepts.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query: Vec<(String, String)> = Vec::new();
        for status in &self.statuses {
            query.push(("status".to_string(), status.to_string()));
        }
        for level in &self.levels {
            query.push(("level".to_string(), level.to_string()));
        }
        for (field, value) in &self.exclusive {
            query.push((field.clone(), value.clone()));
        }
        for (field, value) in &self.text {
            query.push((field.clone(), value.clone()));
        }
        if let Some(orderby) = self.orderby {
            query.push(("orderby".to_string(), orderby.to_string()));
        }
        query.push(("page".to_string(), self.page.to_string()));
        query
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) -> bool {
    if set.remove(&value) {
        false
    } else {
        set.insert(value);
        true
    }
}

fn set_member<T: Ord>(set: &mut BTreeSet<T>, value: T, present: bool) {
    if present {
        set.insert(value);
    } else {
        set.remove(&value);
    }
}
