//! Display-locale mapping for closed value sets.
//!
//! Canonical enum values are what gets stored; labels are what gets shown.
//! Form parsing accepts labels from any supported locale so that older
//! localized inputs still resolve to the same canonical value.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Supported display locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    English,
    Spanish,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::English, Locale::Spanish];

    /// Short language tag (`en`, `es`).
    pub fn tag(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Spanish => "es",
        }
    }

    pub(crate) fn month_name(self, month: u32) -> &'static str {
        const EN: [&str; 12] = [
            "January", "February", "March", "April", "May", "June", "July", "August",
            "September", "October", "November", "December",
        ];
        const ES: [&str; 12] = [
            "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto",
            "septiembre", "octubre", "noviembre", "diciembre",
        ];
        let index = (month.clamp(1, 12) - 1) as usize;
        match self {
            Self::English => EN[index],
            Self::Spanish => ES[index],
        }
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error for unknown locale tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLocale(pub String);

impl Display for UnknownLocale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unsupported locale `{}`; expected en|es", self.0)
    }
}

impl std::error::Error for UnknownLocale {}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en_us" | "english" => Ok(Self::English),
            "es" | "es-es" | "es_es" | "spanish" | "español" => Ok(Self::Spanish),
            other => Err(UnknownLocale(other.to_string())),
        }
    }
}

/// Closed value set with a display label per locale.
pub trait Labelled: Sized + Copy + 'static {
    /// Every value, in display order.
    const VALUES: &'static [Self];

    /// Canonical (stored) name.
    fn canonical(self) -> &'static str;

    /// Human-readable label for one locale.
    fn label(self, locale: Locale) -> &'static str;

    /// Resolves a canonical name or a label of any locale, ignoring case and
    /// surrounding whitespace.
    fn parse_label(raw: &str) -> Option<Self> {
        let needle = raw.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        Self::VALUES.iter().copied().find(|value| {
            value.canonical().to_lowercase() == needle
                || Locale::ALL
                    .iter()
                    .any(|locale| value.label(*locale).to_lowercase() == needle)
        })
    }

    /// `a | b | c` listing of canonical names, used in error messages.
    fn expected_values() -> String {
        Self::VALUES
            .iter()
            .map(|value| value.canonical())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
