use anyhow::Result;
use chrono::Weekday;
use chrono_tz::Tz;
use config::Config;
use icu::locale::Locale;
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};
use crate::types::parse_weekday;
use crate::zone::resolve_zone;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub schedule: ScheduleConfig,
    pub locale: LocaleConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Zone applied when a descriptor's time carries no zone of its own.
    pub time_zone: String,
    /// First day of a week period for weekly stepping.
    pub week_start: String,
}

impl ScheduleConfig {
    /// ## Summary
    /// Resolves the configured default zone.
    ///
    /// ## Errors
    /// Returns an error if the zone name is unknown.
    pub fn zone(&self) -> CoreResult<Tz> {
        Ok(resolve_zone(&self.time_zone)?)
    }

    /// ## Summary
    /// Parses the configured week start.
    ///
    /// ## Errors
    /// Returns an error if the value is not a weekday name.
    pub fn week_start(&self) -> CoreResult<Weekday> {
        parse_weekday(&self.week_start).ok_or_else(|| {
            CoreError::ConfigError(format!("invalid week_start: {}", self.week_start))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocaleConfig {
    /// Locale used when the caller does not supply one.
    pub default: String,
    /// Locale retried once when describing a rule fails.
    pub fallback: String,
}

impl LocaleConfig {
    /// ## Summary
    /// Parses the default locale.
    ///
    /// ## Errors
    /// Returns an error if the value is not a valid BCP-47 locale.
    pub fn default_locale(&self) -> CoreResult<Locale> {
        parse_locale(&self.default)
    }

    /// ## Summary
    /// Parses the fallback locale.
    ///
    /// ## Errors
    /// Returns an error if the value is not a valid BCP-47 locale.
    pub fn fallback_locale(&self) -> CoreResult<Locale> {
        parse_locale(&self.fallback)
    }
}

fn parse_locale(value: &str) -> CoreResult<Locale> {
    value
        .parse::<Locale>()
        .map_err(|err| CoreError::ConfigError(format!("invalid locale {value}: {err}")))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schedule: ScheduleConfig {
                time_zone: "UTC".to_string(),
                week_start: "monday".to_string(),
            },
            locale: LocaleConfig {
                default: "en".to_string(),
                fallback: "en".to_string(),
            },
        }
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from a `.env` file, environment variables and `cadence.toml`
    /// into a `Settings`. Environment variables (`CADENCE_SCHEDULE__TIME_ZONE`, ...) take
    /// precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config::builder()
            .set_default("schedule.time_zone", "UTC")?
            .set_default("schedule.week_start", "monday")?
            .set_default("locale.default", "en")?
            .set_default("locale.fallback", "en")?
            // TOML file
            .add_source(config::File::with_name("cadence.toml").required(false))
            // Env vars
            .add_source(
                config::Environment::with_prefix("CADENCE")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }
}
