use std::sync::Arc;

use crate::error::Result;
use crate::filter::FilterState;
use crate::types::SearchResultPage;

use super::EventApi;

/// Issues read-only searches for the event list.
///
/// Failures are logged here and handed back as values. There is no retry;
/// the caller decides what the user sees.
pub struct SearchClient<A> {
    api: Arc<A>,
}

impl<A> Clone for SearchClient<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<A: EventApi> SearchClient<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Search with the full current filter form.
    pub async fn search(&self, filter: &FilterState) -> Result<SearchResultPage> {
        self.execute(&filter.to_query()).await
    }

    /// Search with an already serialized query.
    pub async fn execute(&self, query: &[(String, String)]) -> Result<SearchResultPage> {
        tracing::debug!(params = query.len(), "searching security events");
        let result = self.api.search(query).await;
        match &result {
            Ok(page) => tracing::debug!(
                page = page.page,
                rows = page.results.len(),
                total = page.count,
                "search completed"
            ),
            Err(e) if e.is_transport() => tracing::warn!("security event search failed: {e}"),
            Err(e) => tracing::warn!("security event search returned an unusable response: {e}"),
        }
        result
    }
}
