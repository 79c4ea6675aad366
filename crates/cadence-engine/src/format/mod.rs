//! Human-readable rendering of rules.

mod english;

use cadence_core::config::Settings;
use cadence_core::error::CoreResult;
use cadence_core::types::RuleKind;
use chrono::DateTime;
use chrono_tz::Tz;
use icu::locale::{Locale, locale};

use crate::error::FormattingError;
use crate::rule::Rule;

pub use english::EnglishLocalizer;

/// Renders instants and rule descriptions for a locale.
pub trait Localizer {
    /// ## Summary
    /// Formats a single instant.
    ///
    /// ## Errors
    /// Returns an error if `locale` is unsupported or formatting fails.
    fn localize(&self, instant: &DateTime<Tz>, locale: &Locale) -> Result<String, FormattingError>;

    /// ## Summary
    /// Describes a recurring rule in words.
    ///
    /// ## Errors
    /// Returns an error if `locale` is unsupported or formatting fails.
    fn describe_rule(&self, rule: &Rule, locale: &Locale) -> Result<String, FormattingError>;
}

/// Rule descriptions with a single retry in a fallback locale.
#[derive(Debug, Clone)]
pub struct Formatter<L> {
    localizer: L,
    default: Locale,
    fallback: Locale,
}

impl Formatter<EnglishLocalizer> {
    /// English descriptions, falling back to `en`.
    #[must_use]
    pub fn english() -> Self {
        Self::new(EnglishLocalizer, locale!("en"))
    }
}

impl Default for Formatter<EnglishLocalizer> {
    fn default() -> Self {
        Self::english()
    }
}

impl<L: Localizer> Formatter<L> {
    /// A formatter whose default locale is also `fallback`.
    #[must_use]
    pub fn new(localizer: L, fallback: Locale) -> Self {
        Self {
            localizer,
            default: fallback.clone(),
            fallback,
        }
    }

    /// ## Summary
    /// Builds a formatter with the configured default and fallback locales.
    ///
    /// ## Errors
    /// Returns an error if either configured locale does not parse.
    pub fn from_settings(localizer: L, settings: &Settings) -> CoreResult<Self> {
        Ok(Self::new(localizer, settings.locale.fallback_locale()?)
            .with_default_locale(settings.locale.default_locale()?))
    }

    #[must_use]
    pub fn with_default_locale(mut self, locale: Locale) -> Self {
        self.default = locale;
        self
    }

    #[must_use]
    pub const fn default_locale(&self) -> &Locale {
        &self.default
    }

    #[must_use]
    pub const fn fallback_locale(&self) -> &Locale {
        &self.fallback
    }

    /// ## Summary
    /// Describes `rule` in the default locale.
    ///
    /// ## Errors
    /// See [`Formatter::describe`].
    pub fn describe_default(&self, rule: &Rule) -> Result<String, FormattingError> {
        self.describe(rule, &self.default)
    }

    /// ## Summary
    /// Describes `rule` in `locale`.
    ///
    /// Singular rules render as their anchor instant. Recurring rules are
    /// described in `locale`; when that fails the description is retried
    /// exactly once in the fallback locale.
    ///
    /// ## Errors
    /// Returns the localizer's error for singular rules, and the error of
    /// the fallback attempt when both attempts fail.
    #[tracing::instrument(skip(self, rule), fields(kind = %rule.kind(), locale = %locale))]
    pub fn describe(&self, rule: &Rule, locale: &Locale) -> Result<String, FormattingError> {
        if rule.kind() == RuleKind::Singular {
            return self.localizer.localize(&rule.anchor(), locale);
        }

        match self.localizer.describe_rule(rule, locale) {
            Ok(text) => Ok(text),
            Err(err) => {
                tracing::debug!(
                    error = %err,
                    fallback = %self.fallback,
                    "Describing rule failed, retrying in fallback locale"
                );
                self.localizer.describe_rule(rule, &self.fallback)
            }
        }
    }
}
