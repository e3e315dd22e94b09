//! The event list controller.
//!
//! `ListController` owns the filter form, the rendered rows and pagination,
//! and the batch dialog state. Every user action and every network
//! completion arrives as a `ControllerEvent` through `handle`, which mutates
//! state and returns at most one `Effect` (a request to issue). Running the
//! effects is left to `Session`, so the state machine itself can be driven
//! synchronously in tests.
//!
//! Searches are sequenced: each one gets a higher `SearchSeq`, and only the
//! completion matching the latest issued sequence is applied. Responses for
//! superseded searches are dropped whether they succeeded or failed.

mod notice;
mod session;

use std::collections::BTreeSet;

use crate::error::{Result, SecdeskError};
use crate::filter::{FilterState, SortField};
use crate::render::{ListRenderer, ListView, PaginationController, PaginationView};
use crate::selection::SelectionTracker;
use crate::types::{BatchUpdateRequest, EventId, EventStatus, SearchResultPage, SecurityLevel};

pub use notice::{Notice, NoticeLevel, NoticeOrigin};
pub use session::Session;

/// Sequence number of an issued search
pub type SearchSeq = u64;

/// Values entered in the batch action dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchForm {
    pub status: EventStatus,
    pub note: String,
    pub assigned_user: Option<String>,
}

#[derive(Debug)]
pub enum ControllerEvent {
    /// Page shown for the first time
    Init,
    StatusToggled(EventStatus),
    LevelToggled(SecurityLevel),
    ExclusiveSelected { field: String, value: String },
    TextChanged { field: String, value: String },
    OrderRequested(SortField),
    PageChanged(u32),
    /// Click on the pagination link at this index
    PageLinkClicked(usize),
    Reset,
    RowToggled { id: EventId, checked: bool },
    AllToggled(bool),
    BatchDialogOpened,
    BatchDialogClosed,
    BatchSubmitted(BatchForm),
    SearchCompleted {
        seq: SearchSeq,
        result: Result<SearchResultPage>,
    },
    UpdateCompleted(Result<()>),
    NoticeDismissed,
}

/// Request the controller wants issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Search {
        seq: SearchSeq,
        query: Vec<(String, String)>,
    },
    Update(BatchUpdateRequest),
}

pub struct ListController {
    filter: FilterState,
    list: ListView,
    pagination: PaginationView,
    renderer: ListRenderer,
    paginator: PaginationController,
    selection: SelectionTracker,
    latest_seq: SearchSeq,
    settled_seq: SearchSeq,
    /// Number of events in the update currently in flight
    pending_update: Option<usize>,
    batch_dialog_open: bool,
    notice: Option<Notice>,
}

impl ListController {
    pub fn new(page_size: u32) -> Self {
        Self::with_filter(FilterState::default(), page_size)
    }

    pub fn with_filter(filter: FilterState, page_size: u32) -> Self {
        Self {
            filter,
            list: ListView::default(),
            pagination: PaginationView::default(),
            renderer: ListRenderer::new(),
            paginator: PaginationController::new(page_size),
            selection: SelectionTracker::new(),
            latest_seq: 0,
            settled_seq: 0,
            pending_update: None,
            batch_dialog_open: false,
            notice: None,
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn list(&self) -> &ListView {
        &self.list
    }

    pub fn pagination(&self) -> &PaginationView {
        &self.pagination
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn batch_dialog_open(&self) -> bool {
        self.batch_dialog_open
    }

    pub fn selected_ids(&self) -> BTreeSet<EventId> {
        self.selection.selected_ids(&self.list)
    }

    pub fn latest_seq(&self) -> SearchSeq {
        self.latest_seq
    }

    /// True while the most recent search has not completed.
    pub fn is_loading(&self) -> bool {
        self.settled_seq < self.latest_seq
    }

    pub fn is_updating(&self) -> bool {
        self.pending_update.is_some()
    }

    pub fn handle(&mut self, event: ControllerEvent) -> Option<Effect> {
        match event {
            ControllerEvent::Init => Some(self.search()),
            ControllerEvent::StatusToggled(status) => {
                self.filter.toggle_status(status);
                Some(self.search())
            }
            ControllerEvent::LevelToggled(level) => {
                self.filter.toggle_level(level);
                Some(self.search())
            }
            ControllerEvent::ExclusiveSelected { field, value } => {
                self.filter.set_exclusive(&field, &value);
                Some(self.search())
            }
            ControllerEvent::TextChanged { field, value } => {
                self.filter.set_text(&field, &value);
                Some(self.search())
            }
            ControllerEvent::OrderRequested(field) => {
                self.filter.set_order(field);
                Some(self.search())
            }
            ControllerEvent::PageChanged(page) => {
                self.filter.set_page(page);
                Some(self.search())
            }
            ControllerEvent::PageLinkClicked(index) => match self.pagination.click(index) {
                Some(page) => {
                    self.filter.set_page(page);
                    Some(self.search())
                }
                None => {
                    tracing::debug!(index, "ignoring click on inactive page link");
                    None
                }
            },
            ControllerEvent::Reset => {
                self.filter.reset();
                Some(self.search())
            }
            ControllerEvent::RowToggled { id, checked } => {
                if !self.selection.toggle_row(&mut self.list, id, checked) {
                    tracing::debug!(%id, "ignoring toggle for an event that is not displayed");
                }
                None
            }
            ControllerEvent::AllToggled(checked) => {
                self.selection.toggle_all(&mut self.list, checked);
                None
            }
            ControllerEvent::BatchDialogOpened => {
                self.batch_dialog_open = true;
                None
            }
            ControllerEvent::BatchDialogClosed => {
                self.batch_dialog_open = false;
                None
            }
            ControllerEvent::BatchSubmitted(form) => self.submit_batch(form),
            ControllerEvent::SearchCompleted { seq, result } => {
                self.apply_search(seq, result);
                None
            }
            ControllerEvent::UpdateCompleted(result) => self.apply_update(result),
            ControllerEvent::NoticeDismissed => {
                self.notice = None;
                None
            }
        }
    }

    fn search(&mut self) -> Effect {
        self.latest_seq += 1;
        tracing::debug!(seq = self.latest_seq, page = self.filter.page(), "issuing search");
        Effect::Search {
            seq: self.latest_seq,
            query: self.filter.to_query(),
        }
    }

    fn apply_search(&mut self, seq: SearchSeq, result: Result<SearchResultPage>) {
        if seq != self.latest_seq {
            tracing::debug!(seq, latest = self.latest_seq, "discarding stale search response");
            return;
        }
        self.settled_seq = seq;

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                self.notice = Some(Notice::error(
                    format!("Search failed: {e}"),
                    NoticeOrigin::Search,
                ));
                return;
            }
        };

        if let Err(e) = self.renderer.replace(&mut self.list, &page.results) {
            tracing::warn!("failed to render security events: {e}");
            self.notice = Some(Notice::error(
                format!("Could not display events: {e}"),
                NoticeOrigin::Search,
            ));
            return;
        }
        self.paginator.render(&mut self.pagination, &page);

        if self
            .notice
            .as_ref()
            .is_some_and(|n| n.origin == NoticeOrigin::Search)
        {
            self.notice = None;
        }
    }

    fn submit_batch(&mut self, form: BatchForm) -> Option<Effect> {
        if self.pending_update.is_some() {
            tracing::debug!("batch update already in flight, ignoring submit");
            return None;
        }

        let ids = self.selected_ids();
        if ids.is_empty() {
            let err = SecdeskError::EmptySelection;
            tracing::warn!("batch update refused: {err}");
            self.notice = Some(Notice::warning(
                format!("Cannot update: {err}"),
                NoticeOrigin::Selection,
            ));
            return None;
        }

        self.pending_update = Some(ids.len());
        Some(Effect::Update(BatchUpdateRequest::new(
            &ids,
            form.status,
            form.note,
            form.assigned_user,
        )))
    }

    fn apply_update(&mut self, result: Result<()>) -> Option<Effect> {
        let count = self.pending_update.take().unwrap_or_default();
        match result {
            Ok(()) => {
                self.batch_dialog_open = false;
                self.notice = Some(Notice::info(
                    format!("Updated {count} event(s)"),
                    NoticeOrigin::Update,
                ));
                Some(self.search())
            }
            Err(e) => {
                self.notice = Some(Notice::error(
                    format!("Update failed: {e}"),
                    NoticeOrigin::Update,
                ));
                None
            }
        }
    }
}
