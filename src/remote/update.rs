use std::sync::Arc;

use crate::error::{Result, SecdeskError};
use crate::types::BatchUpdateRequest;

use super::EventApi;

/// Submits batch status changes for the selected events.
pub struct BatchUpdateClient<A> {
    api: Arc<A>,
}

impl<A> Clone for BatchUpdateClient<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<A: EventApi> BatchUpdateClient<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Post the update. An empty id list is refused without a request.
    pub async fn submit(&self, request: &BatchUpdateRequest) -> Result<()> {
        if request.ids.is_empty() {
            return Err(SecdeskError::EmptySelection);
        }

        tracing::debug!(
            events = request.ids.len(),
            status = %request.status,
            "submitting batch update"
        );
        let result = self.api.update(request).await;
        if let Err(e) = &result {
            tracing::warn!(
                "batch update of {} events to {} failed: {e}",
                request.ids.len(),
                request.status
            );
        }
        result
    }
}
