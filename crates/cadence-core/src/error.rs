use std::fmt;

use thiserror::Error;

/// Core-level errors
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Zone(#[from] crate::zone::ZoneError),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// A single problem found while validating a schedule descriptor.
///
/// Validation never stops at the first problem; every error found in a
/// descriptor is reported together in [`ValidationErrors`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("rule is required")]
    MissingRule,

    #[error("time is required")]
    MissingTime,

    #[error("date is required for singular schedules")]
    MissingDate,

    #[error("weekly schedules need at least one day")]
    EmptyDayList,

    #[error("day_of_week needs at least one weekday with a position")]
    EmptyDayOfWeek,

    #[error("unknown rule: {0}")]
    UnknownRule(String),

    #[error("invalid time of day: {0}")]
    InvalidTime(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("invalid until: {0}")]
    InvalidUntil(String),

    #[error("unknown weekday: {0}")]
    UnknownWeekday(String),

    /// Positions must lie in `-5..=-1` or `1..=5`.
    #[error("invalid weekday position: {0}")]
    InvalidOrdinal(String),

    #[error("invalid month: {0}")]
    InvalidMonth(String),

    #[error("unknown time zone: {0}")]
    UnknownTimeZone(String),
}

/// Every validation problem found in one descriptor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    #[must_use]
    pub fn new(first: ValidationError, rest: impl IntoIterator<Item = ValidationError>) -> Self {
        let mut errors = vec![first];
        errors.extend(rest);
        Self(errors)
    }

    /// Wraps the collected errors; `None` when nothing was collected.
    #[must_use]
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    #[must_use]
    pub fn contains(&self, error: &ValidationError) -> bool {
        self.0.contains(error)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; an empty set of errors is never constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
