//! Form input validation for tasks and class entries.
//!
//! # Responsibility
//! - Turn raw form input into fully typed drafts.
//! - Report every offending field with a human-readable message.
//!
//! # Invariants
//! - Acceptance is all-or-nothing: any field error rejects the whole input.
//! - Closed-set values are resolved to canonical enums, never stored raw.

use crate::model::class_item::{ClassItem, ClockTime, Weekday};
use crate::model::locale::Labelled;
use crate::model::record_id::RecordId;
use crate::model::task::{Task, TaskKind};
use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const FIELD_TITLE: &str = "title";
pub const FIELD_DUE_DATE: &str = "dueDate";
pub const FIELD_TYPE: &str = "type";
pub const FIELD_SUBJECT: &str = "subject";
pub const FIELD_DAY: &str = "day";
pub const FIELD_START_TIME: &str = "startTime";
pub const FIELD_END_TIME: &str = "endTime";

const MSG_TIME_FORMAT: &str = "Invalid time format (HH:mm)";

/// Field name to message mapping for a rejected form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for `field`. The first message per field wins.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates `(field, message)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "invalid input: {joined}")
    }
}

impl Error for FieldErrors {}

/// Raw task form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskInput {
    pub title: String,
    pub description: Option<String>,
    /// RFC 3339 date-time or `YYYY-MM-DD` (UTC midnight).
    pub due_date: Option<String>,
    /// Canonical name or localized label; `None` defaults to `Task`.
    pub kind: Option<String>,
}

/// Raw class form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassInput {
    pub subject: String,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub location: Option<String>,
}

/// Validated task fields, waiting for an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub kind: TaskKind,
}

impl TaskDraft {
    pub fn into_task(self, id: RecordId) -> Task {
        Task::new(id, self.title, self.description, self.due_date, self.kind)
    }
}

/// Validated class fields, waiting for an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDraft {
    pub subject: String,
    pub day: Weekday,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub location: Option<String>,
}

impl ClassDraft {
    pub fn into_class(self, id: RecordId) -> ClassItem {
        ClassItem {
            id,
            subject: self.subject,
            day: self.day,
            start_time: self.start_time,
            end_time: self.end_time,
            location: self.location,
        }
    }
}

/// Validates a task form, reading date-only due dates in local time.
///
/// # Errors
/// - `title` when blank.
/// - `dueDate` when absent or unparseable.
/// - `type` when outside `Task | Exam | Reminder`.
pub fn validate_task(input: &TaskInput) -> Result<TaskDraft, FieldErrors> {
    validate_task_in(input, &Local)
}

/// Validates a task form, reading a `YYYY-MM-DD` due date as midnight in `tz`.
pub fn validate_task_in<Tz: TimeZone>(
    input: &TaskInput,
    tz: &Tz,
) -> Result<TaskDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    let title = input.title.trim();
    if title.is_empty() {
        errors.add(FIELD_TITLE, "Title is required");
    }

    let due_date = match input.due_date.as_deref().map(str::trim) {
        None | Some("") => {
            errors.add(FIELD_DUE_DATE, "A due date is required.");
            None
        }
        Some(raw) => match parse_due_date(raw, tz) {
            Some(value) => Some(value),
            None => {
                errors.add(FIELD_DUE_DATE, "Invalid due date");
                None
            }
        },
    };

    let kind = match input.kind.as_deref() {
        None => Some(TaskKind::Task),
        Some(raw) => parse_closed_value::<TaskKind>(raw, FIELD_TYPE, &mut errors),
    };

    match (due_date, kind) {
        (Some(due_date), Some(kind)) if errors.is_empty() => Ok(TaskDraft {
            title: title.to_string(),
            description: normalize_optional(input.description.as_deref()),
            due_date,
            kind,
        }),
        _ => Err(errors),
    }
}

/// Validates a class form.
///
/// # Errors
/// - `subject` when blank.
/// - `day` when outside the seven weekday names.
/// - `startTime` / `endTime` when not `HH:mm`.
pub fn validate_class(input: &ClassInput) -> Result<ClassDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    let subject = input.subject.trim();
    if subject.is_empty() {
        errors.add(FIELD_SUBJECT, "Subject is required");
    }

    let day = parse_closed_value::<Weekday>(&input.day, FIELD_DAY, &mut errors);

    let start_time = ClockTime::parse(&input.start_time).ok();
    if start_time.is_none() {
        errors.add(FIELD_START_TIME, MSG_TIME_FORMAT);
    }
    let end_time = ClockTime::parse(&input.end_time).ok();
    if end_time.is_none() {
        errors.add(FIELD_END_TIME, MSG_TIME_FORMAT);
    }

    match (day, start_time, end_time) {
        (Some(day), Some(start_time), Some(end_time)) if errors.is_empty() => Ok(ClassDraft {
            subject: subject.to_string(),
            day,
            start_time,
            end_time,
            location: normalize_optional(input.location.as_deref()),
        }),
        _ => Err(errors),
    }
}

fn parse_closed_value<T: Labelled>(
    raw: &str,
    field: &'static str,
    errors: &mut FieldErrors,
) -> Option<T> {
    let parsed = T::parse_label(raw);
    if parsed.is_none() {
        errors.add(
            field,
            format!(
                "Invalid value `{}`; expected {}",
                raw.trim(),
                T::expected_values()
            ),
        );
    }
    parsed
}

fn parse_due_date<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Some(value.with_timezone(&Utc));
    }
    let midnight = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)?;
    // Midnight can fall in a DST gap; the day then starts an hour later.
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + Duration::hours(1))).earliest())
        .map(|value| value.with_timezone(&Utc))
}

fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
