//! Append-only log of committed status transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::Status;

/// One committed transition. Keyed by task title, so entries outlive the
/// task they describe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Assigned by the backend; absent on entries that were never stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub task: String,
    pub from: Status,
    pub to: Status,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

impl HistoryEntry {
    pub fn new(
        task: impl Into<String>,
        from: Status,
        to: Status,
        date: DateTime<Utc>,
        additional_info: Option<String>,
    ) -> Self {
        Self {
            id: None,
            task: task.into(),
            from,
            to,
            date,
            additional_info,
        }
    }

    pub fn describe(&self) -> String {
        let mut line = format!(
            "Moved from {} to {} on {}",
            self.from,
            self.to,
            self.date.format("%Y-%m-%d %H:%M:%S")
        );
        if let Some(info) = &self.additional_info {
            line.push_str(&format!(" ({})", info));
        }
        line
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries for one title in insertion order. Each call starts over.
    pub fn for_title<'a>(&'a self, title: &'a str) -> impl Iterator<Item = &'a HistoryEntry> + 'a {
        self.entries.iter().filter(move |entry| entry.task == title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, minute, 0).unwrap()
    }

    #[test]
    fn test_for_title_is_ordered_and_restartable() {
        let mut log = HistoryLog::new();
        log.append(HistoryEntry::new("A", Status::Todo, Status::InProgress, at(0), None));
        log.append(HistoryEntry::new("B", Status::Todo, Status::Done, at(1), None));
        log.append(HistoryEntry::new("A", Status::InProgress, Status::Done, at(2), None));

        let first: Vec<_> = log.for_title("A").map(|e| e.date).collect();
        assert_eq!(first, vec![at(0), at(2)]);
        let second: Vec<_> = log.for_title("A").map(|e| e.date).collect();
        assert_eq!(first, second);
        assert_eq!(log.for_title("C").count(), 0);
    }

    #[test]
    fn test_wire_format_omits_missing_fields() {
        let entry = HistoryEntry::new("A", Status::Todo, Status::InProgress, at(5), None);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "task": "A",
                "from": "to-do",
                "to": "in-progress",
                "date": "2024-05-01T09:05:00Z"
            })
        );
    }

    #[test]
    fn test_describe_includes_info() {
        let entry = HistoryEntry::new(
            "A",
            Status::Done,
            Status::Todo,
            at(7),
            Some("reopened by QA".into()),
        );
        assert_eq!(
            entry.describe(),
            "Moved from done to to-do on 2024-05-01 09:07:00 (reopened by QA)"
        );
    }
}
