//! Runs controller effects against an `EventApi`.
//!
//! Requests are spawned onto the runtime and their completions come back
//! through a bounded channel, one `ControllerEvent` each. Nothing is
//! applied until the caller drains them with `step` or `settle`, so a
//! session is driven from a single task.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::Config;
use crate::filter::FilterState;
use crate::remote::{BatchUpdateClient, EventApi, SearchClient};

use super::{ControllerEvent, Effect, ListController};

const CHANNEL_CAPACITY: usize = 100;

pub struct Session<A> {
    controller: ListController,
    search_client: SearchClient<A>,
    update_client: BatchUpdateClient<A>,
    tx: mpsc::Sender<ControllerEvent>,
    rx: mpsc::Receiver<ControllerEvent>,
    outstanding: usize,
}

impl<A: EventApi + 'static> Session<A> {
    pub fn new(api: Arc<A>, controller: ListController) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        Self {
            controller,
            search_client: SearchClient::new(Arc::clone(&api)),
            update_client: BatchUpdateClient::new(api),
            tx,
            rx,
            outstanding: 0,
        }
    }

    /// A session whose list starts from `filter`, paged as configured.
    pub fn from_config(api: Arc<A>, config: &Config, filter: FilterState) -> Self {
        Self::new(api, ListController::with_filter(filter, config.page_size))
    }

    pub fn controller(&self) -> &ListController {
        &self.controller
    }

    /// Requests issued whose completion has not been applied yet.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Hand an event to the controller and start whatever request it asks for.
    pub fn dispatch(&mut self, event: ControllerEvent) {
        if let Some(effect) = self.controller.handle(event) {
            self.spawn(effect);
        }
    }

    fn spawn(&mut self, effect: Effect) {
        self.outstanding += 1;
        let tx = self.tx.clone();
        match effect {
            Effect::Search { seq, query } => {
                let client = self.search_client.clone();
                tokio::spawn(async move {
                    let result = client.execute(&query).await;
                    if tx
                        .send(ControllerEvent::SearchCompleted { seq, result })
                        .await
                        .is_err()
                    {
                        tracing::debug!(seq, "session dropped before search completed");
                    }
                });
            }
            Effect::Update(request) => {
                let client = self.update_client.clone();
                tokio::spawn(async move {
                    let result = client.submit(&request).await;
                    if tx
                        .send(ControllerEvent::UpdateCompleted(result))
                        .await
                        .is_err()
                    {
                        tracing::debug!("session dropped before update completed");
                    }
                });
            }
        }
    }

    /// Wait for the next completion and apply it.
    ///
    /// Returns `false` when nothing is outstanding.
    pub async fn step(&mut self) -> bool {
        if self.outstanding == 0 {
            return false;
        }
        match self.rx.recv().await {
            Some(event) => {
                self.outstanding -= 1;
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    /// Apply completions until no request is outstanding, including any
    /// follow-up searches those completions trigger.
    pub async fn settle(&mut self) {
        while self.step().await {}
    }
}
