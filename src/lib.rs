#[macro_use]
mod macros;

pub mod commands;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod filter;
pub mod remote;
pub mod render;
pub mod selection;
pub mod types;

pub use config::Config;
pub use controller::{
    BatchForm, ControllerEvent, Effect, ListController, Notice, NoticeLevel, NoticeOrigin,
    SearchSeq, Session,
};
pub use error::{Result, SecdeskError};
pub use filter::{FilterState, OrderBy, SortField};
pub use remote::{BatchUpdateClient, EventApi, HttpEventApi, SearchClient};
pub use render::{ListRenderer, ListView, PaginationController, PaginationView};
pub use selection::SelectionTracker;
pub use types::{
    BatchUpdateRequest, EventId, EventRecord, EventStatus, SearchResultPage, SecurityLevel,
};
