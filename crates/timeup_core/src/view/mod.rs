//! Read-only projections over in-memory collections.
//!
//! # Invariants
//! - Projections never mutate their input.
//! - All sorts are stable: equal keys keep collection order.
//! - `ClockTime` values are fixed-width, so comparing them as strings is
//!   chronological.

use crate::model::class_item::{ClassItem, Weekday};
use crate::model::locale::Labelled;
use crate::model::task::Task;
use chrono::{DateTime, Datelike, TimeZone, Utc};

/// Maximum number of entries in the upcoming task projection.
pub const UPCOMING_TASK_LIMIT: usize = 5;

/// Tasks due at or after `now`, soonest first, at most five.
pub fn upcoming_tasks(tasks: &[Task], now: DateTime<Utc>) -> Vec<&Task> {
    let mut upcoming: Vec<&Task> = tasks.iter().filter(|task| task.is_upcoming(now)).collect();
    upcoming.sort_by_key(|task| task.due_date);
    upcoming.truncate(UPCOMING_TASK_LIMIT);
    upcoming
}

/// Every task, soonest due first.
pub fn tasks_by_due_date(tasks: &[Task]) -> Vec<&Task> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by_key(|task| task.due_date);
    sorted
}

/// Classes held on `day`, earliest start first.
pub fn classes_on(schedule: &[ClassItem], day: Weekday) -> Vec<&ClassItem> {
    let mut classes: Vec<&ClassItem> = schedule.iter().filter(|class| class.day == day).collect();
    classes.sort_by(|left, right| left.start_time.cmp(&right.start_time));
    classes
}

/// Classes held on the weekday of `today`.
pub fn todays_classes<'a, Tz: TimeZone>(
    schedule: &'a [ClassItem],
    today: &DateTime<Tz>,
) -> Vec<&'a ClassItem> {
    classes_on(schedule, today.weekday().into())
}

/// One weekday's slice of the schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySchedule<'a> {
    pub day: Weekday,
    pub classes: Vec<&'a ClassItem>,
}

/// Partitions the schedule into all seven weekdays, Monday first.
///
/// Days without classes are kept with an empty list.
pub fn classes_by_day(schedule: &[ClassItem]) -> Vec<DaySchedule<'_>> {
    Weekday::VALUES
        .iter()
        .map(|day| DaySchedule {
            day: *day,
            classes: classes_on(schedule, *day),
        })
        .collect()
}

/// Landing view combining both collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard<'a> {
    pub today: Weekday,
    pub upcoming_tasks: Vec<&'a Task>,
    pub todays_classes: Vec<&'a ClassItem>,
}

impl<'a> Dashboard<'a> {
    /// Builds the dashboard for a wall-clock instant.
    ///
    /// "Today" is the weekday of `now` in its own time zone.
    pub fn build<Tz: TimeZone>(
        tasks: &'a [Task],
        schedule: &'a [ClassItem],
        now: DateTime<Tz>,
    ) -> Self {
        Self {
            today: now.weekday().into(),
            upcoming_tasks: upcoming_tasks(tasks, now.with_timezone(&Utc)),
            todays_classes: todays_classes(schedule, &now),
        }
    }
}
