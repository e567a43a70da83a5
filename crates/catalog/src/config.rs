//! Library configuration.

use chrono::Duration;
use thiserror::Error;

/// Environment variable overriding [`LibraryConfig::overdue_after_days`].
pub const OVERDUE_DAYS_ENV: &str = "LENDING_OVERDUE_DAYS";

/// Default number of days a copy may be out before it counts as overdue.
pub const DEFAULT_OVERDUE_AFTER_DAYS: u32 = 7;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Tunables for a [`crate::Library`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryConfig {
    /// A copy borrowed strictly before `today - overdue_after_days` is overdue.
    pub overdue_after_days: u32,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            overdue_after_days: DEFAULT_OVERDUE_AFTER_DAYS,
        }
    }
}

impl LibraryConfig {
    pub fn with_overdue_after_days(mut self, days: u32) -> Self {
        self.overdue_after_days = days;
        self
    }

    pub fn overdue_after(&self) -> Duration {
        Duration::days(i64::from(self.overdue_after_days))
    }

    /// Load from the process environment, falling back to defaults for unset
    /// variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup (used by `from_env` and tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(OVERDUE_DAYS_ENV) {
            config.overdue_after_days =
                raw.trim()
                    .parse::<u32>()
                    .map_err(|e| ConfigError::InvalidValue {
                        name: OVERDUE_DAYS_ENV,
                        value: raw.clone(),
                        reason: e.to_string(),
                    })?;
        }

        Ok(config)
    }
}
