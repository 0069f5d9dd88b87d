//! Runtime configuration for roster hosts.
//!
//! # Responsibility
//! - Provide defaults for database location, page size and logging.
//! - Bring up file logging from the resolved settings.
//! - Overlay `ROSTER_*` environment variables on those defaults.
//!
//! # Invariants
//! - Blank environment values are ignored, not treated as overrides.
//! - `page_size` is always at least 1.

use crate::logging::{default_log_level, init_logging, normalize_level, LoggingError};
use crate::query::DEFAULT_PAGE_SIZE;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "ROSTER_DB_PATH";
pub const PAGE_SIZE_ENV: &str = "ROSTER_PAGE_SIZE";
pub const LOG_LEVEL_ENV: &str = "ROSTER_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "ROSTER_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "roster.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "roster-logs";

/// Rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value } => write!(f, "invalid value `{value}` for {key}"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved host configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    pub db_path: PathBuf,
    pub page_size: usize,
    pub log_level: &'static str,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            page_size: DEFAULT_PAGE_SIZE,
            log_level: default_log_level(),
            log_dir: std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME),
        }
    }
}

impl RosterConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through `lookup`, which returns the raw value of a key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(path) = read(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }

        if let Some(raw) = read(PAGE_SIZE_ENV) {
            config.page_size = match raw.parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: PAGE_SIZE_ENV,
                        value: raw,
                    })
                }
            };
        }

        if let Some(raw) = read(LOG_LEVEL_ENV) {
            config.log_level = normalize_level(&raw).map_err(|_| ConfigError::InvalidValue {
                key: LOG_LEVEL_ENV,
                value: raw.clone(),
            })?;
        }

        if let Some(dir) = read(LOG_DIR_ENV) {
            config.log_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    /// Starts file logging at `log_level` under `log_dir`.
    ///
    /// Safe to call again with the same settings.
    pub fn init_logging(&self) -> Result<(), LoggingError> {
        init_logging(self.log_level, &self.log_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ConfigError, RosterConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV, PAGE_SIZE_ENV,
    };
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let config = RosterConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, RosterConfig::default());
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn overrides_are_trimmed_and_blank_values_ignored() {
        let config = RosterConfig::from_lookup(lookup_from(&[
            (DB_PATH_ENV, "  /var/lib/roster.db "),
            (PAGE_SIZE_ENV, " 25 "),
            (LOG_LEVEL_ENV, "   "),
            (LOG_DIR_ENV, " /var/log/roster "),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/var/lib/roster.db"));
        assert_eq!(config.page_size, 25);
        assert_eq!(config.log_level, RosterConfig::default().log_level);
        assert_eq!(config.log_dir, PathBuf::from("/var/log/roster"));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let err = RosterConfig::from_lookup(lookup_from(&[(PAGE_SIZE_ENV, "0")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: PAGE_SIZE_ENV,
                value: "0".to_string(),
            }
        );
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let err =
            RosterConfig::from_lookup(lookup_from(&[(LOG_LEVEL_ENV, "chatty")])).unwrap_err();
        assert!(err.to_string().contains(LOG_LEVEL_ENV));
    }
}
