//! Rendered rows of the event list.
//!
//! Rows are produced through askama templates, so everything taken from an
//! `EventRecord` is HTML-escaped. The detail popover content is rendered as
//! its own escaped fragment and then embedded (escaped once more) in the
//! row's `data-bs-content` attribute.

use askama::Template;

use crate::error::Result;
use crate::types::{EventId, EventRecord};

#[derive(Template)]
#[template(path = "event_detail.html")]
struct EventDetailTemplate<'a> {
    level: &'a str,
    problem_name: &'a str,
    summary: &'a str,
}

#[derive(Template)]
#[template(path = "event_row.html")]
struct EventRowTemplate<'a> {
    record: &'a EventRecord,
    detail: &'a str,
}

/// One displayed row: the record it was rendered from, its markup and the
/// state of its selection checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    record: EventRecord,
    markup: String,
    detail: String,
    pub(crate) checked: bool,
}

impl RenderedRow {
    pub fn event_id(&self) -> EventId {
        self.record.pk
    }

    pub fn record(&self) -> &EventRecord {
        &self.record
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Escaped HTML shown by the row's detail disclosure.
    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }
}

/// The currently displayed rows plus the "select all" control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    pub(crate) rows: Vec<RenderedRow>,
    pub(crate) all_checked: bool,
}

impl ListView {
    pub fn rows(&self) -> &[RenderedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn all_checked(&self) -> bool {
        self.all_checked
    }

    /// Owning row of the control at `index` (checkbox or detail button).
    pub fn row_of(&self, index: usize) -> Option<&RenderedRow> {
        self.rows.get(index)
    }

    pub fn row_for(&self, id: EventId) -> Option<&RenderedRow> {
        self.rows.iter().find(|row| row.event_id() == id)
    }

    pub(crate) fn row_for_mut(&mut self, id: EventId) -> Option<&mut RenderedRow> {
        self.rows.iter_mut().find(|row| row.event_id() == id)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ListRenderer;

impl ListRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render_row(&self, record: &EventRecord) -> Result<RenderedRow> {
        let detail = EventDetailTemplate {
            level: &record.level,
            problem_name: &record.problem_name,
            summary: &record.summary,
        }
        .render()?;
        let markup = EventRowTemplate {
            record,
            detail: &detail,
        }
        .render()?;

        Ok(RenderedRow {
            record: record.clone(),
            markup,
            detail,
            checked: false,
        })
    }

    /// Append one unchecked row per record, in order.
    pub fn append(&self, view: &mut ListView, records: &[EventRecord]) -> Result<()> {
        let rows = records
            .iter()
            .map(|record| self.render_row(record))
            .collect::<Result<Vec<_>>>()?;
        view.rows.extend(rows);
        Ok(())
    }

    /// Replace every displayed row with `records`.
    ///
    /// The new rows are rendered before the old ones are dropped; if
    /// rendering fails the view is left as it was. Selection never survives
    /// a replace.
    pub fn replace(&self, view: &mut ListView, records: &[EventRecord]) -> Result<()> {
        let mut fresh = ListView::default();
        self.append(&mut fresh, records)?;
        *view = fresh;
        Ok(())
    }
}
