//! Page links and the range summary shown under the event list.

use std::fmt;

use crate::types::SearchResultPage;

pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Previous,
    Page(u32),
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// Shown but not clickable (no previous/next page)
    Disabled,
    /// The page currently displayed; not clickable
    Active,
    Enabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLink {
    pub kind: LinkKind,
    pub state: LinkState,
    /// Page requested when the link is clicked
    pub target: Option<u32>,
}

impl PageLink {
    pub fn is_clickable(&self) -> bool {
        self.state == LinkState::Enabled && self.target.is_some()
    }
}

impl fmt::Display for PageLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            LinkKind::Previous => "< Previous".to_string(),
            LinkKind::Page(n) => n.to_string(),
            LinkKind::Next => "Next >".to_string(),
        };
        match self.state {
            LinkState::Disabled => write!(f, "({label})"),
            LinkState::Active => write!(f, "[{label}]"),
            LinkState::Enabled => write!(f, "{label}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationView {
    range_label: String,
    links: Vec<PageLink>,
}

impl PaginationView {
    pub fn range_label(&self) -> &str {
        &self.range_label
    }

    pub fn links(&self) -> &[PageLink] {
        &self.links
    }

    /// Target page of the link at `index`, or `None` if that link is
    /// disabled, active or absent.
    pub fn click(&self, index: usize) -> Option<u32> {
        self.links
            .get(index)
            .filter(|link| link.is_clickable())
            .and_then(|link| link.target)
    }

    /// Pages reachable from the current view.
    pub fn clickable_pages(&self) -> Vec<u32> {
        self.links
            .iter()
            .filter(|link| link.is_clickable())
            .filter_map(|link| link.target)
            .collect()
    }

    /// Single-line form of the links, e.g. `(< Previous) [1] 2 3 Next >`.
    pub fn summary(&self) -> String {
        self.links
            .iter()
            .map(|link| link.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PaginationController {
    page_size: u32,
}

impl Default for PaginationController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationController {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// "start–end of total" for the given page, `0–0 of 0` when empty.
    pub fn range_label(&self, page: &SearchResultPage) -> String {
        let total = page.count;
        if total == 0 {
            return "0–0 of 0".to_string();
        }
        let size = u64::from(self.page_size);
        let current = u64::from(page.page.max(1));
        let end = (current * size).min(total);
        let start = ((current - 1) * size + 1).min(end);
        format!("{start}–{end} of {total}")
    }

    /// Rebuild the pagination view from scratch for `page`.
    pub fn render(&self, view: &mut PaginationView, page: &SearchResultPage) {
        let mut links = Vec::with_capacity(page.page_numbers.len() + 2);

        links.push(PageLink {
            kind: LinkKind::Previous,
            state: if page.has_previous {
                LinkState::Enabled
            } else {
                LinkState::Disabled
            },
            target: page.previous_page_number.filter(|_| page.has_previous),
        });

        for &number in &page.page_numbers {
            links.push(PageLink {
                kind: LinkKind::Page(number),
                state: if number == page.page {
                    LinkState::Active
                } else {
                    LinkState::Enabled
                },
                target: Some(number),
            });
        }

        links.push(PageLink {
            kind: LinkKind::Next,
            state: if page.has_next {
                LinkState::Enabled
            } else {
                LinkState::Disabled
            },
            target: page.next_page_number.filter(|_| page.has_next),
        });

        *view = PaginationView {
            range_label: self.range_label(page),
            links,
        };
    }
}
