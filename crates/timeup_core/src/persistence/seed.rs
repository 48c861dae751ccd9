//! Default collections shown before any user data exists.

use crate::model::class_item::{ClassItem, ClockTime, Weekday};
use crate::model::task::{Task, TaskKind};
use chrono::{DateTime, Duration, Utc};

/// Four sample tasks due relative to `now`.
pub fn seed_tasks(now: DateTime<Utc>) -> Vec<Task> {
    let due_in = |days: i64| now + Duration::days(days);
    vec![
        Task::new(
            "1".into(),
            "Finish Math homework 5",
            Some("Problems 1-10 on page 56.".to_string()),
            due_in(2),
            TaskKind::Task,
        ),
        Task::new(
            "2".into(),
            "Study for the Chemistry midterm",
            Some("Chapters 4-6.".to_string()),
            due_in(5),
            TaskKind::Exam,
        ),
        Task::new(
            "3".into(),
            "Submit History essay draft",
            Some("Topic: The Renaissance.".to_string()),
            due_in(1),
            TaskKind::Task,
        ),
        Task::new(
            "4".into(),
            "Group project meeting",
            Some("Finalize presentation slides.".to_string()),
            due_in(0),
            TaskKind::Reminder,
        ),
    ]
}

/// Six sample classes spread over the week.
pub fn seed_schedule() -> Vec<ClassItem> {
    vec![
        class("cl1", "Calculus II", Weekday::Monday, ("10:00", "11:00"), "Math Building 210"),
        class("cl2", "Intro to Physics", Weekday::Monday, ("13:00", "14:30"), "Science Hall 101"),
        class("cl3", "World History", Weekday::Tuesday, ("09:00", "10:30"), "Humanities 305"),
        class("cl4", "Calculus II", Weekday::Wednesday, ("10:00", "11:00"), "Math Building 210"),
        class("cl5", "Chemistry Lab", Weekday::Wednesday, ("14:00", "16:00"), "Chemistry Lab 3"),
        class("cl6", "Intro to Physics", Weekday::Friday, ("13:00", "14:30"), "Science Hall 101"),
    ]
}

fn class(
    id: &str,
    subject: &str,
    day: Weekday,
    (start, end): (&'static str, &'static str),
    location: &str,
) -> ClassItem {
    ClassItem {
        id: id.into(),
        subject: subject.to_string(),
        day,
        start_time: fixed_time(start),
        end_time: fixed_time(end),
        location: Some(location.to_string()),
    }
}

fn fixed_time(raw: &'static str) -> ClockTime {
    ClockTime::parse(raw).expect("valid seed clock time")
}
