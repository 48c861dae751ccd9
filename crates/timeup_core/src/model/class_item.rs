//! Weekly schedule domain model.
//!
//! # Responsibility
//! - Define class entries, the closed weekday set and validated clock times.
//!
//! # Invariants
//! - `subject` is never blank.
//! - `ClockTime` is always zero-padded `HH:mm` within `00:00..=23:59`, so
//!   lexical ordering equals chronological ordering.
//! - No ordering is enforced between `start_time` and `end_time`.

use super::locale::{Labelled, Locale};
use super::record_id::RecordId;
use super::Record;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

static CLOCK_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-1]?[0-9]|2[0-3]):([0-5][0-9])$").expect("valid clock time regex")
});

/// Day of the week a class takes place on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<chrono::Weekday> for Weekday {
    fn from(value: chrono::Weekday) -> Self {
        match value {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

impl Labelled for Weekday {
    const VALUES: &'static [Self] = &[
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    fn canonical(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    fn label(self, locale: Locale) -> &'static str {
        match locale {
            Locale::English => self.canonical(),
            Locale::Spanish => match self {
                Self::Monday => "Lunes",
                Self::Tuesday => "Martes",
                Self::Wednesday => "Miércoles",
                Self::Thursday => "Jueves",
                Self::Friday => "Viernes",
                Self::Saturday => "Sábado",
                Self::Sunday => "Domingo",
            },
        }
    }
}

/// A 24-hour `HH:mm` wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(String);

impl ClockTime {
    /// Parses `H:mm` or `HH:mm` and normalizes to zero-padded `HH:mm`.
    pub fn parse(raw: &str) -> Result<Self, InvalidClockTime> {
        let trimmed = raw.trim();
        let captures = CLOCK_TIME_RE
            .captures(trimmed)
            .ok_or_else(|| InvalidClockTime(raw.to_string()))?;
        let hours: u32 = captures[1]
            .parse()
            .map_err(|_| InvalidClockTime(raw.to_string()))?;
        Ok(Self(format!("{hours:02}:{}", &captures[2])))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = InvalidClockTime;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.0
    }
}

/// Rejected clock time input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidClockTime(pub String);

impl Display for InvalidClockTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid time `{}`; expected HH:mm", self.0)
    }
}

impl std::error::Error for InvalidClockTime {}

/// One recurring class in the weekly schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassItem {
    pub id: RecordId,
    pub subject: String,
    pub day: Weekday,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Record for ClassItem {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn check(&self) -> Result<(), String> {
        if self.id.is_blank() {
            return Err("class id is empty".to_string());
        }
        if self.subject.trim().is_empty() {
            return Err(format!("class `{}` has an empty subject", self.id));
        }
        Ok(())
    }
}
