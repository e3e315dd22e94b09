//! Terminal formatting for event rows, pagination and notices.

use owo_colors::OwoColorize;

use crate::controller::{Notice, NoticeLevel};
use crate::render::{LinkState, PaginationView, RenderedRow};
use crate::types::{EventStatus, SecurityLevel};

/// Format one displayed row for single-line output with colors
pub fn format_event_line(row: &RenderedRow) -> String {
    let record = row.record();
    let checkbox = if row.is_checked() { "[x]" } else { "[ ]" };
    let id = format!("{:>8}", record.pk);

    let status_str = format!("[{}]", record.status);
    let colored_status = match EventStatus::from_badge_class(&record.status_label) {
        Some(EventStatus::New) => status_str.yellow().to_string(),
        Some(EventStatus::Assigned) => status_str.cyan().to_string(),
        Some(EventStatus::Resolved) => status_str.green().to_string(),
        None => status_str.dimmed().to_string(),
    };

    let level = SecurityLevel::from_label_class(&record.level);
    let level_str = format!("{:8}", level.map(|l| l.to_string()).unwrap_or_default());
    let colored_level = match level {
        Some(SecurityLevel::Critical) => level_str.red().bold().to_string(),
        Some(SecurityLevel::High) => level_str.yellow().to_string(),
        _ => level_str,
    };

    let mut line = format!(
        "{} {} {} {} {}",
        checkbox,
        id.cyan(),
        colored_status,
        colored_level,
        record.problem_name
    );
    if !record.pc_name.is_empty() {
        line.push_str(&format!(" - {}", record.pc_name));
    }
    if !record.occurred.is_empty() {
        line.push_str(&format!(" {}", record.occurred.dimmed()));
    }
    if !record.assigned_user.is_empty() {
        line.push_str(&format!(" (@{})", record.assigned_user));
    }
    line
}

/// Format the range label and page links, highlighting the current page
pub fn format_pagination(view: &PaginationView) -> String {
    let links: Vec<String> = view
        .links()
        .iter()
        .map(|link| match link.state {
            LinkState::Active => link.to_string().bold().to_string(),
            LinkState::Disabled => link.to_string().dimmed().to_string(),
            LinkState::Enabled => link.to_string(),
        })
        .collect();
    format!("{}  {}", view.range_label(), links.join(" "))
}

pub fn format_notice(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Info => format!("{}", notice.message.green()),
        NoticeLevel::Warning => format!("{} {}", "Warning:".yellow(), notice.message),
        NoticeLevel::Error => format!("{} {}", "Error:".red(), notice.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ListRenderer;
    use crate::types::{EventId, EventRecord};

    fn record() -> EventRecord {
        EventRecord {
            pk: EventId(42),
            problem_name: "Outdated antivirus".to_string(),
            summary: String::new(),
            site_uid: String::new(),
            pc_id: Some(3),
            pc_name: "reception-pc".to_string(),
            occurred: "2024-03-01 10:00".to_string(),
            status: "New".to_string(),
            status_label: "bg-primary".to_string(),
            level: "label-important".to_string(),
            assigned_user: String::new(),
        }
    }

    #[test]
    fn test_event_line_contains_fields() {
        owo_colors::set_override(false);
        let row = ListRenderer::new().render_row(&record()).unwrap();
        let line = format_event_line(&row);
        assert!(line.starts_with("[ ]"));
        assert!(line.contains("42"));
        assert!(line.contains("[New]"));
        assert!(line.contains("Outdated antivirus - reception-pc"));
        assert!(line.contains("Critical"));
        assert!(!line.contains("(@"));
    }

    #[test]
    fn test_unknown_level_class_is_blank() {
        owo_colors::set_override(false);
        let mut record = record();
        record.level = "label-unknown".to_string();
        record.assigned_user = "alice".to_string();
        let row = ListRenderer::new().render_row(&record).unwrap();
        let line = format_event_line(&row);
        assert!(!line.contains("label-unknown"));
        assert!(line.ends_with("(@alice)"));
    }
}
