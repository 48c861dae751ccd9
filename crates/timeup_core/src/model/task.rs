//! Task domain model.
//!
//! # Responsibility
//! - Define the task/exam/reminder record and its closed `type` set.
//!
//! # Invariants
//! - `title` is never blank.
//! - `due_date` is always a real instant, never a raw string.
//! - Tasks are immutable after creation; only deletion changes a collection.

use super::locale::{Labelled, Locale};
use super::record_id::RecordId;
use super::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Closed set of task categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    Task,
    Exam,
    Reminder,
}

impl Labelled for TaskKind {
    const VALUES: &'static [Self] = &[Self::Task, Self::Exam, Self::Reminder];

    fn canonical(self) -> &'static str {
        match self {
            Self::Task => "Task",
            Self::Exam => "Exam",
            Self::Reminder => "Reminder",
        }
    }

    fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (kind, Locale::English) => kind.canonical(),
            (Self::Task, Locale::Spanish) => "Tarea",
            (Self::Exam, Locale::Spanish) => "Examen",
            (Self::Reminder, Locale::Spanish) => "Recordatorio",
        }
    }
}

/// A dated entry in the task list.
///
/// Serialized with the persisted field names `dueDate` and `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: TaskKind,
}

impl Task {
    pub fn new(
        id: RecordId,
        title: impl Into<String>,
        description: Option<String>,
        due_date: DateTime<Utc>,
        kind: TaskKind,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description,
            due_date,
            kind,
        }
    }

    /// Whether the task is due at or after `now`.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.due_date >= now
    }
}

impl Record for Task {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn check(&self) -> Result<(), String> {
        if self.id.is_blank() {
            return Err("task id is empty".to_string());
        }
        if self.title.trim().is_empty() {
            return Err(format!("task `{}` has an empty title", self.id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskKind};
    use crate::model::locale::{Labelled, Locale};
    use crate::model::Record;
    use chrono::{TimeZone, Utc};

    fn sample() -> Task {
        Task::new(
            "7".into(),
            "Lab report",
            None,
            Utc.with_ymd_and_hms(2026, 10, 21, 9, 30, 0).unwrap(),
            TaskKind::Exam,
        )
    }

    #[test]
    fn serialization_uses_persisted_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], "7");
        assert_eq!(json["type"], "Exam");
        assert_eq!(json["dueDate"], "2026-10-21T09:30:00Z");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn deserializes_browser_iso_strings() {
        let value = serde_json::json!({
            "id": "1",
            "title": "Essay draft",
            "description": "Renaissance",
            "dueDate": "2026-10-21T09:30:00.000Z",
            "type": "Task"
        });
        let task: Task = serde_json::from_value(value).unwrap();
        assert_eq!(task.due_date, Utc.with_ymd_and_hms(2026, 10, 21, 9, 30, 0).unwrap());
        assert_eq!(task.description.as_deref(), Some("Renaissance"));
    }

    #[test]
    fn rejects_unknown_kind() {
        let value = serde_json::json!({
            "id": "1",
            "title": "Essay draft",
            "dueDate": "2026-10-21T09:30:00Z",
            "type": "Homework"
        });
        assert!(serde_json::from_value::<Task>(value).is_err());
    }

    #[test]
    fn check_rejects_blank_title() {
        let mut task = sample();
        task.title = "  ".to_string();
        assert!(task.check().is_err());
    }

    #[test]
    fn kind_labels_resolve_in_both_locales() {
        assert_eq!(TaskKind::Exam.label(Locale::Spanish), "Examen");
        assert_eq!(TaskKind::parse_label("recordatorio"), Some(TaskKind::Reminder));
        assert_eq!(TaskKind::parse_label("TASK"), Some(TaskKind::Task));
        assert_eq!(TaskKind::parse_label("homework"), None);
    }
}
