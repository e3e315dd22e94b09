//! Access to the admin console's security event endpoints.
//!
//! `EventApi` is the seam between the list controller and the network: the
//! reqwest-backed `HttpEventApi` talks to the real endpoints, tests plug in
//! scripted fakes. `SearchClient` and `BatchUpdateClient` sit on top and own
//! the failure-reporting policy.

mod http;
mod search;
mod update;

use std::future::Future;

use crate::error::Result;
use crate::types::{BatchUpdateRequest, SearchResultPage};

pub use http::HttpEventApi;
pub use search::SearchClient;
pub use update::BatchUpdateClient;

/// The two endpoints the event list consumes
pub trait EventApi: Send + Sync {
    /// GET the search endpoint with `query` as the query string
    fn search(
        &self,
        query: &[(String, String)],
    ) -> impl Future<Output = Result<SearchResultPage>> + Send;

    /// POST a batch status change to the update endpoint
    fn update(&self, request: &BatchUpdateRequest) -> impl Future<Output = Result<()>> + Send;
}
