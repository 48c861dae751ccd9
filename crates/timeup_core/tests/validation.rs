use chrono::{TimeZone, Utc};
use timeup_core::validation::{
    FIELD_DAY, FIELD_DUE_DATE, FIELD_END_TIME, FIELD_START_TIME, FIELD_SUBJECT, FIELD_TITLE,
    FIELD_TYPE,
};
use timeup_core::{validate_class, validate_task, ClassInput, TaskInput, TaskKind, Weekday};

fn task_input(title: &str, due_date: Option<&str>, kind: Option<&str>) -> TaskInput {
    TaskInput {
        title: title.to_string(),
        description: None,
        due_date: due_date.map(str::to_string),
        kind: kind.map(str::to_string),
    }
}

fn class_input(subject: &str, day: &str, start: &str, end: &str) -> ClassInput {
    ClassInput {
        subject: subject.to_string(),
        day: day.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        location: None,
    }
}

#[test]
fn valid_task_is_fully_typed() {
    let mut input = task_input("  Chemistry midterm ", Some("2026-10-24T08:00:00Z"), Some("Exam"));
    input.description = Some("Chapters 4-6".to_string());

    let draft = validate_task(&input).unwrap();
    assert_eq!(draft.title, "Chemistry midterm");
    assert_eq!(draft.kind, TaskKind::Exam);
    assert_eq!(draft.due_date, Utc.with_ymd_and_hms(2026, 10, 24, 8, 0, 0).unwrap());
    assert_eq!(draft.description.as_deref(), Some("Chapters 4-6"));
}

#[test]
fn missing_kind_defaults_to_task_and_localized_kind_is_canonicalized() {
    let draft = validate_task(&task_input("Essay", Some("2026-10-24"), None)).unwrap();
    assert_eq!(draft.kind, TaskKind::Task);

    let draft = validate_task(&task_input("Essay", Some("2026-10-24"), Some("Recordatorio"))).unwrap();
    assert_eq!(draft.kind, TaskKind::Reminder);
}

#[test]
fn empty_title_is_rejected_with_field_error() {
    let errors = validate_task(&task_input("   ", Some("2026-10-24"), Some("Task"))).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get(FIELD_TITLE), Some("Title is required"));
}

#[test]
fn every_bad_task_field_is_reported_at_once() {
    let errors = validate_task(&task_input("", None, Some("Homework"))).unwrap_err();
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.get(FIELD_DUE_DATE), Some("A due date is required."));
    assert!(errors.get(FIELD_TYPE).unwrap().contains("Task | Exam | Reminder"));
    assert!(errors.contains(FIELD_TITLE));
}

#[test]
fn unparseable_due_date_is_rejected() {
    let errors = validate_task(&task_input("Essay", Some("soon"), None)).unwrap_err();
    assert_eq!(errors.get(FIELD_DUE_DATE), Some("Invalid due date"));
}

#[test]
fn valid_class_normalizes_times_and_day() {
    let mut input = class_input(" Calculus II ", "lunes", "9:00", "10:30");
    input.location = Some("  ".to_string());

    let draft = validate_class(&input).unwrap();
    assert_eq!(draft.subject, "Calculus II");
    assert_eq!(draft.day, Weekday::Monday);
    assert_eq!(draft.start_time.as_str(), "09:00");
    assert_eq!(draft.end_time.as_str(), "10:30");
    assert_eq!(draft.location, None);
}

#[test]
fn class_end_before_start_is_accepted() {
    let draft = validate_class(&class_input("Night lab", "Friday", "22:00", "01:00")).unwrap();
    assert_eq!(draft.start_time.as_str(), "22:00");
    assert_eq!(draft.end_time.as_str(), "01:00");
}

#[test]
fn bad_class_fields_are_all_reported() {
    let errors = validate_class(&class_input("", "Caturday", "24:00", "7pm")).unwrap_err();
    assert_eq!(errors.len(), 4);
    assert_eq!(errors.get(FIELD_SUBJECT), Some("Subject is required"));
    assert!(errors.get(FIELD_DAY).unwrap().starts_with("Invalid value `Caturday`"));
    assert_eq!(errors.get(FIELD_START_TIME), Some("Invalid time format (HH:mm)"));
    assert_eq!(errors.get(FIELD_END_TIME), Some("Invalid time format (HH:mm)"));
}

#[test]
fn field_errors_display_lists_fields() {
    let errors = validate_class(&class_input("Physics", "Monday", "10:00", "")).unwrap_err();
    assert_eq!(
        errors.to_string(),
        "invalid input: endTime: Invalid time format (HH:mm)"
    );
}
