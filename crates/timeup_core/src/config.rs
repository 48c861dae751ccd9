//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve database path, logging and display locale settings.
//! - Fall back to working defaults when variables are unset or blank.
//!
//! # Invariants
//! - Resolution never touches the file system.
//! - Invalid values are reported, never silently replaced.

use crate::logging::{default_log_level, normalize_level};
use crate::model::locale::{Locale, UnknownLocale};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "TIMEUP_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "TIMEUP_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TIMEUP_LOG_DIR";
pub const ENV_LOCALE: &str = "TIMEUP_LOCALE";

const DEFAULT_DB_FILE_NAME: &str = "timeup.sqlite3";

/// Resolved core settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite file holding both collections.
    pub db_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` disables file logs.
    pub log_dir: Option<PathBuf>,
    /// Display locale for labels and share text.
    pub locale: Locale,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
            locale: Locale::default(),
        }
    }
}

/// Configuration error.
#[derive(Debug)]
pub enum ConfigError {
    Locale(UnknownLocale),
    LogLevel(String),
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Locale(err) => write!(f, "{ENV_LOCALE}: {err}"),
            Self::LogLevel(reason) => write!(f, "{ENV_LOG_LEVEL}: {reason}"),
            Self::RelativeLogDir(path) => write!(
                f,
                "{ENV_LOG_DIR} must be an absolute path, got `{}`",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Locale(err) => Some(err),
            Self::LogLevel(_) | Self::RelativeLogDir(_) => None,
        }
    }
}

impl CoreConfig {
    /// Resolves settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = read(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.set_log_level(&level)?;
        }
        if let Some(dir) = read(ENV_LOG_DIR) {
            let dir = PathBuf::from(dir);
            if !dir.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir));
            }
            config.log_dir = Some(dir);
        }
        if let Some(locale) = read(ENV_LOCALE) {
            config.locale = locale.parse().map_err(ConfigError::Locale)?;
        }
        Ok(config)
    }

    /// Replaces the log level, normalized to `trace|debug|info|warn|error`.
    pub fn set_log_level(&mut self, level: &str) -> Result<(), ConfigError> {
        self.log_level = normalize_level(level)
            .map_err(ConfigError::LogLevel)?
            .to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, ENV_DB_PATH, ENV_LOCALE, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use crate::model::locale::Locale;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = CoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CoreConfig::default());
        assert!(config.db_path.ends_with("timeup.sqlite3"));
    }

    #[test]
    fn variables_override_defaults_and_blank_is_ignored() {
        let config = CoreConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, " /var/lib/timeup/data.db "),
            (ENV_LOCALE, "es"),
            (ENV_LOG_DIR, "   "),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/var/lib/timeup/data.db"));
        assert_eq!(config.locale, Locale::Spanish);
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = CoreConfig::from_lookup(lookup(&[(ENV_LOCALE, "klingon")])).unwrap_err();
        assert!(matches!(err, ConfigError::Locale(_)));

        let err = CoreConfig::from_lookup(lookup(&[(ENV_LOG_DIR, "logs")])).unwrap_err();
        assert!(matches!(err, ConfigError::RelativeLogDir(_)));
    }

    #[test]
    fn log_level_is_checked_without_a_log_dir() {
        let err = CoreConfig::from_lookup(lookup(&[(ENV_LOG_LEVEL, "loud")])).unwrap_err();
        assert!(matches!(err, ConfigError::LogLevel(_)));
        assert!(err.to_string().starts_with("TIMEUP_LOG_LEVEL: "));

        let config = CoreConfig::from_lookup(lookup(&[(ENV_LOG_LEVEL, " Warning ")])).unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, None);
    }
}
