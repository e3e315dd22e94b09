//! Shared helpers for integration tests: event builders and a scripted
//! in-memory `EventApi`.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::time::Duration;

use parking_lot::Mutex;

use secdesk::error::{Result, SecdeskError};
use secdesk::remote::EventApi;
use secdesk::types::{BatchUpdateRequest, EventId, EventRecord, SearchResultPage};

/// Builder for creating test event rows
pub struct EventBuilder {
    record: EventRecord,
}

impl EventBuilder {
    pub fn new(pk: u64) -> Self {
        Self {
            record: EventRecord {
                pk: EventId(pk),
                problem_name: format!("Problem {pk}"),
                summary: "Detected during the nightly scan".to_string(),
                site_uid: "site-1".to_string(),
                pc_id: Some(1),
                pc_name: "workstation-1".to_string(),
                occurred: "2024-01-01 09:00".to_string(),
                status: "New".to_string(),
                status_label: "bg-primary".to_string(),
                level: "label-warning".to_string(),
                assigned_user: String::new(),
            },
        }
    }

    pub fn problem(mut self, name: &str) -> Self {
        self.record.problem_name = name.to_string();
        self
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.record.summary = summary.to_string();
        self
    }

    pub fn level(mut self, level: &str) -> Self {
        self.record.level = level.to_string();
        self
    }

    pub fn build(self) -> EventRecord {
        self.record
    }
}

/// A page of results with `page_size` rows per page and `count` rows in total.
///
/// Page links cover every page, as the search endpoint does for small
/// result sets.
pub fn result_page(page: u32, ids: &[u64], count: u64, page_size: u32) -> SearchResultPage {
    let num_pages = count.div_ceil(u64::from(page_size)).max(1) as u32;
    SearchResultPage {
        results: ids.iter().map(|&pk| EventBuilder::new(pk).build()).collect(),
        count,
        num_pages,
        page,
        has_previous: page > 1,
        has_next: page < num_pages,
        previous_page_number: (page > 1).then(|| page - 1),
        next_page_number: (page < num_pages).then(|| page + 1),
        page_numbers: (1..=num_pages).collect(),
    }
}

struct Scripted<T> {
    delay: Duration,
    outcome: Result<T>,
}

/// In-memory `EventApi` answering from scripted queues.
///
/// Responses are consumed in request order; each waits for its delay before
/// completing. Every request is logged.
#[derive(Default)]
pub struct FakeApi {
    searches: Mutex<VecDeque<Scripted<SearchResultPage>>>,
    updates: Mutex<VecDeque<Scripted<()>>>,
    search_log: Mutex<Vec<Vec<(String, String)>>>,
    update_log: Mutex<Vec<BatchUpdateRequest>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, page: SearchResultPage) -> Self {
        self.respond_after(Duration::ZERO, Ok(page))
    }

    pub fn respond_after(self, delay: Duration, outcome: Result<SearchResultPage>) -> Self {
        self.searches.lock().push_back(Scripted { delay, outcome });
        self
    }

    pub fn fail_search(self, status: u16) -> Self {
        self.respond_after(
            Duration::ZERO,
            Err(SecdeskError::HttpStatus {
                endpoint: "search",
                status,
            }),
        )
    }

    pub fn accept_update(self) -> Self {
        self.updates.lock().push_back(Scripted {
            delay: Duration::ZERO,
            outcome: Ok(()),
        });
        self
    }

    pub fn fail_update(self, status: u16) -> Self {
        self.updates.lock().push_back(Scripted {
            delay: Duration::ZERO,
            outcome: Err(SecdeskError::HttpStatus {
                endpoint: "update",
                status,
            }),
        });
        self
    }

    pub fn searches(&self) -> Vec<Vec<(String, String)>> {
        self.search_log.lock().clone()
    }

    pub fn updates(&self) -> Vec<BatchUpdateRequest> {
        self.update_log.lock().clone()
    }
}

impl EventApi for FakeApi {
    async fn search(&self, query: &[(String, String)]) -> Result<SearchResultPage> {
        self.search_log.lock().push(query.to_vec());
        let next = self.searches.lock().pop_front();
        match next {
            Some(scripted) => {
                tokio::time::sleep(scripted.delay).await;
                scripted.outcome
            }
            None => Err(SecdeskError::malformed("search", "no scripted response")),
        }
    }

    async fn update(&self, request: &BatchUpdateRequest) -> Result<()> {
        self.update_log.lock().push(request.clone());
        let next = self.updates.lock().pop_front();
        match next {
            Some(scripted) => {
                tokio::time::sleep(scripted.delay).await;
                scripted.outcome
            }
            None => Err(SecdeskError::malformed("update", "no scripted response")),
        }
    }
}

/// Value of the first `name` parameter in a logged query.
pub fn param<'a>(query: &'a [(String, String)], name: &str) -> Option<&'a str> {
    query
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// All values of the `name` parameter in a logged query.
pub fn params<'a>(query: &'a [(String, String)], name: &str) -> Vec<&'a str> {
    query
        .iter()
        .filter(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
        .collect()
}

/// Path to the built `secdesk` binary.
pub fn secdesk_binary() -> &'static str {
    env!("CARGO_BIN_EXE_secdesk")
}
