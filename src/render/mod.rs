//! Everything the list page displays: event rows and pagination.

mod list;
mod pagination;

pub use list::{ListRenderer, ListView, RenderedRow};
pub use pagination::{
    DEFAULT_PAGE_SIZE, LinkKind, LinkState, PageLink, PaginationController, PaginationView,
};
