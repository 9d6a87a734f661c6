//! Runtime tuning for the desktop app.
//!
//! Values layer as: built-in default, then environment variable, then
//! command-line flag (applied by the binary through the setters).

use std::time::Duration;

use flow_core::model::DEFAULT_TIME_BUDGET_SECS;

use crate::error::ConfigError;

pub const ENV_LESSON_SECONDS: &str = "ENGLISHFLOW_LESSON_SECONDS";
pub const ENV_AUTH_DELAY_MS: &str = "ENGLISHFLOW_AUTH_DELAY_MS";
pub const ENV_ASSESSMENT_DELAY_MS: &str = "ENGLISHFLOW_ASSESSMENT_DELAY_MS";
pub const ENV_PROVIDER_TIMEOUT_MS: &str = "ENGLISHFLOW_PROVIDER_TIMEOUT_MS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    lesson_time_budget_secs: u32,
    auth_delay_ms: u64,
    social_auth_delay_ms: u64,
    assessment_delay_ms: u64,
    provider_timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            lesson_time_budget_secs: DEFAULT_TIME_BUDGET_SECS,
            auth_delay_ms: 1500,
            social_auth_delay_ms: 1000,
            assessment_delay_ms: 2000,
            provider_timeout_ms: 10_000,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is not a whole number or yields an invalid config.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each known variable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value is not a whole number or yields an invalid config.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_LESSON_SECONDS) {
            config.lesson_time_budget_secs = parse_number(ENV_LESSON_SECONDS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_AUTH_DELAY_MS) {
            config.auth_delay_ms = parse_number(ENV_AUTH_DELAY_MS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_ASSESSMENT_DELAY_MS) {
            config.assessment_delay_ms = parse_number(ENV_ASSESSMENT_DELAY_MS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_PROVIDER_TIMEOUT_MS) {
            config.provider_timeout_ms = parse_number(ENV_PROVIDER_TIMEOUT_MS, &raw)?;
        }
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::ZeroLessonBudget` or `ConfigError::ZeroTimeout`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lesson_time_budget_secs == 0 {
            return Err(ConfigError::ZeroLessonBudget);
        }
        if self.provider_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    #[must_use]
    pub fn with_lesson_time_budget_secs(mut self, secs: u32) -> Self {
        self.lesson_time_budget_secs = secs;
        self
    }

    #[must_use]
    pub fn with_auth_delay_ms(mut self, ms: u64) -> Self {
        self.auth_delay_ms = ms;
        self
    }

    #[must_use]
    pub fn with_social_auth_delay_ms(mut self, ms: u64) -> Self {
        self.social_auth_delay_ms = ms;
        self
    }

    #[must_use]
    pub fn with_assessment_delay_ms(mut self, ms: u64) -> Self {
        self.assessment_delay_ms = ms;
        self
    }

    #[must_use]
    pub fn with_provider_timeout_ms(mut self, ms: u64) -> Self {
        self.provider_timeout_ms = ms;
        self
    }

    #[must_use]
    pub fn lesson_time_budget_secs(&self) -> u32 {
        self.lesson_time_budget_secs
    }

    #[must_use]
    pub fn auth_delay(&self) -> Duration {
        Duration::from_millis(self.auth_delay_ms)
    }

    #[must_use]
    pub fn social_auth_delay(&self) -> Duration {
        Duration::from_millis(self.social_auth_delay_ms)
    }

    #[must_use]
    pub fn assessment_delay(&self) -> Duration {
        Duration::from_millis(self.assessment_delay_ms)
    }

    #[must_use]
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }
}

/// Parses a whole number for `key`, trimming surrounding whitespace.
///
/// # Errors
///
/// Returns `ConfigError::InvalidNumber` when `raw` is not a whole number.
pub fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        key: key.to_owned(),
        raw: raw.to_owned(),
    })
}
