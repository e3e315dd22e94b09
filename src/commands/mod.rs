mod list;
mod update;

pub use list::cmd_list;
pub use update::{UpdateOptions, cmd_update};

use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use crate::config::Config;
use crate::controller::{ControllerEvent, ListController, Session};
use crate::display::{format_event_line, format_notice, format_pagination};
use crate::error::{Result, SecdeskError};
use crate::filter::{FilterState, OrderBy, PC_FIELD};
use crate::remote::{EventApi, HttpEventApi};
use crate::types::{EventRecord, EventStatus, SecurityLevel};

/// Filter arguments shared by the list and update commands
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Statuses to include; the preselected set when empty
    pub statuses: Vec<EventStatus>,
    /// Levels to include; the preselected set when empty
    pub levels: Vec<SecurityLevel>,
    pub pc: Option<String>,
    pub orderby: Option<OrderBy>,
    pub page: u32,
}

impl FilterOptions {
    pub fn to_filter(&self) -> FilterState {
        let mut filter = FilterState::default();
        if !self.statuses.is_empty() {
            for status in EventStatus::ALL {
                filter.set_status_checked(status, self.statuses.contains(&status));
            }
        }
        if !self.levels.is_empty() {
            for level in SecurityLevel::ALL {
                filter.set_level_checked(level, self.levels.contains(&level));
            }
        }
        if let Some(pc) = &self.pc {
            filter.set_exclusive(PC_FIELD, pc);
        }
        filter.set_orderby(self.orderby);
        filter.set_page(self.page);
        filter
    }
}

/// Load configuration and build the HTTP client for its endpoints.
pub fn connect(config_path: Option<&Path>) -> Result<(Config, Arc<HttpEventApi>)> {
    let config = Config::load_or_default(config_path)?;
    tracing::debug!(?config, "loaded configuration");
    let api = Arc::new(HttpEventApi::from_config(&config)?);
    Ok((config, api))
}

/// Open a session for `filter` and load its page.
async fn open_session<A: EventApi + 'static>(
    api: Arc<A>,
    config: &Config,
    filter: &FilterOptions,
) -> Result<Session<A>> {
    let mut session = Session::from_config(api, config, filter.to_filter());

    session.dispatch(ControllerEvent::Init);
    session.settle().await;
    check_notice(session.controller())?;
    Ok(session)
}

/// Turn an error notice left by the last request into a command failure.
fn check_notice(controller: &ListController) -> Result<()> {
    match controller.notice() {
        Some(notice) if notice.is_error() => Err(SecdeskError::Aborted(notice.message.clone())),
        _ => Ok(()),
    }
}

fn print_page(controller: &ListController) {
    if let Some(notice) = controller.notice() {
        println!("{}", format_notice(notice));
    }
    if controller.list().is_empty() {
        println!("No security events match the current filter");
    }
    for row in controller.list().rows() {
        println!("{}", format_event_line(row));
    }
    println!("{}", format_pagination(controller.pagination()));
}

fn print_json(controller: &ListController) -> Result<()> {
    let rows: Vec<&EventRecord> = controller.list().rows().iter().map(|r| r.record()).collect();
    let output = json!({
        "range": controller.pagination().range_label(),
        "pages": controller.pagination().clickable_pages(),
        "query": controller.filter().to_query(),
        "results": rows,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
