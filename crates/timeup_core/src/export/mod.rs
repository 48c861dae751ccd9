//! Plain-text share rendering of both collections.
//!
//! Output only; nothing here is persisted or parsed back.

use crate::model::class_item::ClassItem;
use crate::model::locale::{Labelled, Locale};
use crate::model::task::Task;
use crate::view::{classes_by_day, tasks_by_due_date};
use chrono::{DateTime, Datelike, Local, TimeZone};
use std::fmt::Write;

/// Renders every task sorted by due date, dates in local time.
///
/// Format: heading, blank line, then `- [<type>] <title> - Due: <date>`.
pub fn tasks_share_text(tasks: &[Task], locale: Locale) -> String {
    tasks_share_text_in(tasks, locale, &Local)
}

/// Same as [`tasks_share_text`] with due dates shown in `tz`.
pub fn tasks_share_text_in<Tz: TimeZone>(tasks: &[Task], locale: Locale, tz: &Tz) -> String {
    let mut text = String::new();
    text.push_str(match locale {
        Locale::English => "My Tasks & Deadlines:\n\n",
        Locale::Spanish => "Mis tareas y fechas de entrega:\n\n",
    });
    let due_word = match locale {
        Locale::English => "Due",
        Locale::Spanish => "Fecha",
    };
    for task in tasks_by_due_date(tasks) {
        let _ = writeln!(
            text,
            "- [{}] {} - {}: {}",
            task.kind.label(locale),
            task.title,
            due_word,
            long_date(&task.due_date.with_timezone(tz), locale)
        );
    }
    text
}

/// Renders the weekly schedule grouped by day, skipping empty days.
pub fn schedule_share_text(schedule: &[ClassItem], locale: Locale) -> String {
    let mut text = String::new();
    text.push_str(match locale {
        Locale::English => "My Weekly Schedule:\n\n",
        Locale::Spanish => "Mi horario semanal:\n\n",
    });
    let at_word = match locale {
        Locale::English => "at",
        Locale::Spanish => "en",
    };
    for day in classes_by_day(schedule) {
        if day.classes.is_empty() {
            continue;
        }
        let _ = writeln!(text, "{}:", day.day.label(locale));
        for class in day.classes {
            let _ = write!(
                text,
                "  - {}-{}: {}",
                class.start_time, class.end_time, class.subject
            );
            if let Some(location) = class.location.as_deref() {
                let _ = write!(text, " {at_word} {location}");
            }
            text.push('\n');
        }
        text.push('\n');
    }
    text
}

/// Long calendar date, e.g. `October 21st, 2026` or `21 de octubre de 2026`.
///
/// The calendar day is taken in `value`'s own time zone.
pub fn long_date<Tz: TimeZone>(value: &DateTime<Tz>, locale: Locale) -> String {
    let day = value.day();
    let month = locale.month_name(value.month());
    match locale {
        Locale::English => format!("{month} {day}{}, {}", ordinal_suffix(day), value.year()),
        Locale::Spanish => format!("{day} de {month} de {}", value.year()),
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::{long_date, ordinal_suffix};
    use crate::model::locale::Locale;
    use chrono::{FixedOffset, TimeZone, Utc};

    #[test]
    fn ordinal_suffixes_cover_teens() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(13), "th");
        assert_eq!(ordinal_suffix(22), "nd");
        assert_eq!(ordinal_suffix(31), "st");
    }

    #[test]
    fn long_date_follows_locale() {
        let date = Utc.with_ymd_and_hms(2026, 10, 21, 12, 0, 0).unwrap();
        assert_eq!(long_date(&date, Locale::English), "October 21st, 2026");
        assert_eq!(long_date(&date, Locale::Spanish), "21 de octubre de 2026");
    }

    #[test]
    fn long_date_uses_the_value_zone_calendar_day() {
        let date = Utc.with_ymd_and_hms(2026, 10, 21, 2, 0, 0).unwrap();
        let new_york = FixedOffset::west_opt(4 * 3600).unwrap();
        assert_eq!(
            long_date(&date.with_timezone(&new_york), Locale::English),
            "October 20th, 2026"
        );
    }
}
