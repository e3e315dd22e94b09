use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SecdeskError};

/// Primary key of a security event, as carried by the `pk` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = SecdeskError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u64>()
            .map(EventId)
            .map_err(|_| SecdeskError::InvalidEventId(s.to_string()))
    }
}

/// Handling status of a security event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventStatus {
    New,
    Assigned,
    Resolved,
}

enum_display_fromstr!(
    EventStatus,
    SecdeskError::InvalidStatus,
    {
        New => "NEW",
        Assigned => "ASSIGNED",
        Resolved => "RESOLVED",
    }
);

impl EventStatus {
    pub const ALL: [EventStatus; 3] = [
        EventStatus::New,
        EventStatus::Assigned,
        EventStatus::Resolved,
    ];

    /// Statuses checked when the filter form is first shown or reset.
    pub const PRESELECTED: [EventStatus; 2] = [EventStatus::New, EventStatus::Assigned];

    /// Badge class the search endpoint sends in `status_label`.
    pub fn badge_class(self) -> &'static str {
        match self {
            EventStatus::New => "bg-primary",
            EventStatus::Assigned => "bg-secondary",
            EventStatus::Resolved => "bg-success",
        }
    }

    pub fn from_badge_class(class: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.badge_class() == class)
    }
}

/// Severity of the security problem an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SecurityLevel {
    Critical,
    High,
    Normal,
}

enum_display_fromstr!(
    SecurityLevel,
    SecdeskError::InvalidLevel,
    {
        Critical => "Critical",
        High => "High",
        Normal => "Normal",
    }
);

impl SecurityLevel {
    pub const ALL: [SecurityLevel; 3] = [
        SecurityLevel::Critical,
        SecurityLevel::High,
        SecurityLevel::Normal,
    ];

    pub const PRESELECTED: [SecurityLevel; 2] = [SecurityLevel::Critical, SecurityLevel::High];

    /// Label class the search endpoint sends in `level`.
    pub fn label_class(self) -> &'static str {
        match self {
            SecurityLevel::Critical => "label-important",
            SecurityLevel::High => "label-warning",
            SecurityLevel::Normal => "label-gentle-warning",
        }
    }

    pub fn from_label_class(class: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.label_class() == class)
    }
}

/// One row of the event list as returned by the search endpoint.
///
/// Only `pk` matters for selection and updates; everything else is display
/// data and is passed through to the row template untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub pk: EventId,
    pub problem_name: String,
    pub summary: String,
    #[serde(default)]
    pub site_uid: String,
    #[serde(default)]
    pub pc_id: Option<u64>,
    #[serde(default)]
    pub pc_name: String,
    #[serde(default)]
    pub occurred: String,
    /// Translated status text, ready for display.
    #[serde(default)]
    pub status: String,
    /// Badge class for the status.
    #[serde(default)]
    pub status_label: String,
    /// Label class for the problem level.
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub assigned_user: String,
}

/// A page of search results plus the pagination metadata needed to draw
/// page links and the "showing X-Y of Z" summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultPage {
    pub results: Vec<EventRecord>,
    /// Total number of matching events across all pages.
    pub count: u64,
    #[serde(default)]
    pub num_pages: u32,
    pub page: u32,
    pub has_previous: bool,
    pub has_next: bool,
    #[serde(default)]
    pub previous_page_number: Option<u32>,
    #[serde(default)]
    pub next_page_number: Option<u32>,
    pub page_numbers: Vec<u32>,
}

impl SearchResultPage {
    /// Parse and validate a search endpoint payload.
    ///
    /// Missing fields and inconsistent neighbour metadata are rejected as a
    /// whole; a page is never partially accepted.
    pub fn from_json(body: &str) -> Result<Self> {
        let page: SearchResultPage = serde_json::from_str(body)
            .map_err(|e| SecdeskError::malformed("search", e.to_string()))?;
        page.validate()?;
        Ok(page)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page == 0 {
            return Err(SecdeskError::malformed("search", "page numbers start at 1"));
        }
        if self.has_previous && self.previous_page_number.is_none() {
            return Err(SecdeskError::malformed(
                "search",
                "has_previous is set but previous_page_number is missing",
            ));
        }
        if self.has_next && self.next_page_number.is_none() {
            return Err(SecdeskError::malformed(
                "search",
                "has_next is set but next_page_number is missing",
            ));
        }
        Ok(())
    }
}

/// Status change applied to several events in one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchUpdateRequest {
    pub ids: Vec<EventId>,
    pub status: EventStatus,
    pub note: String,
    pub assigned_user: Option<String>,
}

impl BatchUpdateRequest {
    pub fn new(
        ids: &BTreeSet<EventId>,
        status: EventStatus,
        note: impl Into<String>,
        assigned_user: Option<String>,
    ) -> Self {
        Self {
            ids: ids.iter().copied().collect(),
            status,
            note: note.into(),
            assigned_user: assigned_user.filter(|u| !u.trim().is_empty()),
        }
    }

    /// Form fields for the update endpoint: `ids` repeated once per event.
    pub fn to_form(&self) -> Vec<(&'static str, String)> {
        let mut form: Vec<(&'static str, String)> = self
            .ids
            .iter()
            .map(|id| ("ids", id.to_string()))
            .collect();
        form.push(("status", self.status.to_string()));
        form.push(("note", self.note.clone()));
        form.push(("assigned_user", self.assigned_user.clone().unwrap_or_default()));
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_json(extra: &str) -> String {
        format!(
            r#"{{
                "results": [{{"pk": 7, "problem_name": "USB", "summary": "stick inserted"}}],
                "count": 1,
                "page": 1,
                "page_numbers": [1]
                {extra}
            }}"#
        )
    }

    #[test]
    fn test_event_status_wire_form() {
        assert_eq!(EventStatus::Assigned.to_string(), "ASSIGNED");
        assert_eq!("resolved".parse::<EventStatus>().unwrap(), EventStatus::Resolved);
        assert_eq!(
            serde_json::to_string(&EventStatus::New).unwrap(),
            "\"NEW\""
        );
    }

    #[test]
    fn test_security_level_parse() {
        assert_eq!("critical".parse::<SecurityLevel>().unwrap(), SecurityLevel::Critical);
        assert!("urgent".parse::<SecurityLevel>().is_err());
    }

    #[test]
    fn test_display_classes_map_back() {
        for status in EventStatus::ALL {
            assert_eq!(EventStatus::from_badge_class(status.badge_class()), Some(status));
        }
        assert_eq!(
            SecurityLevel::from_label_class("label-important"),
            Some(SecurityLevel::Critical)
        );
        assert_eq!(SecurityLevel::from_label_class("Critical"), None);
    }

    #[test]
    fn test_event_id_parse() {
        assert_eq!("12".parse::<EventId>().unwrap(), EventId(12));
        assert!("twelve".parse::<EventId>().is_err());
    }

    #[test]
    fn test_from_json_fills_optional_fields() {
        let page = SearchResultPage::from_json(&page_json(
            r#", "has_previous": false, "has_next": false"#,
        ))
        .unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].pk, EventId(7));
        assert_eq!(page.results[0].assigned_user, "");
        assert_eq!(page.previous_page_number, None);
    }

    #[test]
    fn test_from_json_rejects_missing_fields() {
        let err = SearchResultPage::from_json(&page_json("")).unwrap_err();
        assert!(matches!(err, SecdeskError::MalformedResponse { .. }));
    }

    #[test]
    fn test_from_json_rejects_record_without_pk() {
        let body = r#"{"results": [{"problem_name": "x", "summary": "y"}], "count": 1,
            "page": 1, "has_previous": false, "has_next": false, "page_numbers": [1]}"#;
        assert!(SearchResultPage::from_json(body).is_err());
    }

    #[test]
    fn test_from_json_rejects_next_without_target() {
        let err = SearchResultPage::from_json(&page_json(
            r#", "has_previous": false, "has_next": true"#,
        ))
        .unwrap_err();
        assert!(err.to_string().contains("next_page_number"));
    }

    #[test]
    fn test_batch_form_repeats_ids() {
        let ids: BTreeSet<EventId> = [EventId(12), EventId(7)].into_iter().collect();
        let request = BatchUpdateRequest::new(&ids, EventStatus::Resolved, "handled", None);
        assert_eq!(
            request.to_form(),
            vec![
                ("ids", "7".to_string()),
                ("ids", "12".to_string()),
                ("status", "RESOLVED".to_string()),
                ("note", "handled".to_string()),
                ("assigned_user", String::new()),
            ]
        );
    }

    #[test]
    fn test_batch_blank_assignee_is_none() {
        let ids: BTreeSet<EventId> = [EventId(1)].into_iter().collect();
        let request =
            BatchUpdateRequest::new(&ids, EventStatus::Assigned, "", Some("  ".to_string()));
        assert_eq!(request.assigned_user, None);
    }
}
