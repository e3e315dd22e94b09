use std::sync::Arc;

use crate::config::Config;
use crate::controller::{BatchForm, ControllerEvent, NoticeOrigin};
use crate::error::{Result, SecdeskError};
use crate::remote::EventApi;
use crate::types::{EventId, EventStatus};

use super::{FilterOptions, open_session, print_page};

pub struct UpdateOptions {
    /// Events to update; they must be on the page selected by the filter
    pub ids: Vec<EventId>,
    /// Select every event on the page instead of listing ids
    pub all_on_page: bool,
    pub status: EventStatus,
    pub note: String,
    pub assignee: Option<String>,
}

/// Apply a batch status change to events on the current page
pub async fn cmd_update<A: EventApi + 'static>(
    api: Arc<A>,
    config: &Config,
    filter: &FilterOptions,
    options: UpdateOptions,
) -> Result<()> {
    let mut session = open_session(api, config, filter).await?;

    if options.all_on_page {
        session.dispatch(ControllerEvent::AllToggled(true));
    } else {
        for id in &options.ids {
            if session.controller().list().row_for(*id).is_none() {
                return Err(SecdeskError::NotDisplayed(id.0));
            }
            session.dispatch(ControllerEvent::RowToggled {
                id: *id,
                checked: true,
            });
        }
    }

    session.dispatch(ControllerEvent::BatchDialogOpened);
    session.dispatch(ControllerEvent::BatchSubmitted(BatchForm {
        status: options.status,
        note: options.note,
        assigned_user: options.assignee,
    }));
    session.settle().await;

    // An empty selection leaves a warning instead of an error
    if let Some(notice) = session.controller().notice()
        && (notice.is_error() || notice.origin == NoticeOrigin::Selection)
    {
        return Err(SecdeskError::Aborted(notice.message.clone()));
    }

    print_page(session.controller());
    Ok(())
}
