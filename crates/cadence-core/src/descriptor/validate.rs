//! Descriptor validation and canonicalization.

use chrono::{Month, NaiveDate};

use super::values::{TimeOfDay, Until, parse_date, parse_time_of_day, parse_until};
use super::{Descriptor, FormValue, OwnerRef};
use crate::error::{ValidationError, ValidationErrors};
use crate::types::{
    MonthSet, Ordinal, OrdinalWeekdays, RuleKind, WEEKDAYS, WeekdaySet, parse_month,
    parse_weekday,
};

/// A descriptor that passed validation, with defaults applied and blank
/// entries removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDescriptor {
    id: Option<i64>,
    kind: RuleKind,
    date: Option<NaiveDate>,
    time: TimeOfDay,
    interval: u32,
    count: Option<u32>,
    until: Option<Until>,
    days: WeekdaySet,
    day_of_week: OrdinalWeekdays,
    month_of_year: MonthSet,
    owner: Option<OwnerRef>,
}

impl ValidDescriptor {
    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        self.id
    }

    #[must_use]
    pub const fn kind(&self) -> RuleKind {
        self.kind
    }

    #[must_use]
    pub const fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    #[must_use]
    pub const fn time(&self) -> TimeOfDay {
        self.time
    }

    /// Step size in units of the rule kind; always at least 1.
    #[must_use]
    pub const fn interval(&self) -> u32 {
        self.interval
    }

    /// Occurrence limit; `None` when unbounded by count.
    #[must_use]
    pub const fn count(&self) -> Option<u32> {
        self.count
    }

    #[must_use]
    pub const fn until(&self) -> Option<Until> {
        self.until
    }

    /// Weekday filter of a weekly schedule; empty for other kinds.
    #[must_use]
    pub const fn days(&self) -> WeekdaySet {
        self.days
    }

    /// Weekday positions of a monthly or yearly schedule; empty for other kinds.
    #[must_use]
    pub const fn day_of_week(&self) -> &OrdinalWeekdays {
        &self.day_of_week
    }

    /// Month scope of a yearly schedule; empty when unscoped.
    #[must_use]
    pub const fn month_of_year(&self) -> MonthSet {
        self.month_of_year
    }

    #[must_use]
    pub const fn owner(&self) -> Option<&OwnerRef> {
        self.owner.as_ref()
    }
}

/// ## Summary
/// Validates a descriptor and resolves its string fields.
///
/// Takes the descriptor by value: blank entries are stripped from the
/// working copy before anything else looks at it.
///
/// ## Errors
///
/// Returns every problem found, not just the first:
/// - `MissingRule` / `UnknownRule` when `rule` is absent or not a known kind
/// - `MissingTime` / `InvalidTime` / `UnknownTimeZone` for `time`
/// - `MissingDate` when a singular schedule has no date
/// - `EmptyDayList` when a weekly schedule names no weekday
/// - `EmptyDayOfWeek` when a monthly or yearly schedule names no position
#[tracing::instrument(skip(descriptor), fields(id = ?descriptor.id, rule = ?descriptor.rule))]
pub fn validate(mut descriptor: Descriptor) -> Result<ValidDescriptor, ValidationErrors> {
    descriptor.strip_blanks();

    let mut errors = Vec::new();

    let kind = match descriptor.rule.as_deref().map(str::trim) {
        None | Some("") => Err(ValidationError::MissingRule),
        Some(name) => {
            RuleKind::parse(name).ok_or_else(|| ValidationError::UnknownRule(name.to_string()))
        }
    };

    let time = match descriptor.time.as_deref().map(str::trim) {
        None | Some("") => Err(ValidationError::MissingTime),
        Some(value) => parse_time_of_day(value),
    };
    let kind_ok = kind.as_ref().ok().copied();

    let date = match descriptor.date.as_deref().map(str::trim) {
        None | Some("") => {
            if kind_ok == Some(RuleKind::Singular) {
                errors.push(ValidationError::MissingDate);
            }
            None
        }
        Some(value) => parse_date(value).map_err(|err| errors.push(err)).ok(),
    };

    let until = match descriptor.until.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => parse_until(value).map_err(|err| errors.push(err)).ok(),
    };

    let days = if kind_ok == Some(RuleKind::Weekly) {
        collect_days(&descriptor.day, &mut errors)
    } else {
        WeekdaySet::new()
    };

    let day_of_week = if matches!(kind_ok, Some(RuleKind::Monthly | RuleKind::Yearly)) {
        collect_positions(&descriptor, &mut errors)
    } else {
        OrdinalWeekdays::new()
    };

    let month_of_year = if kind_ok == Some(RuleKind::Yearly) {
        collect_months(&descriptor, &mut errors)
    } else {
        MonthSet::new()
    };

    let (kind, time) = match (kind, time) {
        (Ok(kind), Ok(time)) => match ValidationErrors::from_vec(errors) {
            None => (kind, time),
            Some(errors) => return Err(rejected(errors)),
        },
        (Err(rule_error), time) => {
            return Err(rejected(ValidationErrors::new(
                rule_error,
                time.err().into_iter().chain(errors),
            )));
        }
        (Ok(_), Err(time_error)) => {
            return Err(rejected(ValidationErrors::new(time_error, errors)));
        }
    };

    Ok(ValidDescriptor {
        id: descriptor.id,
        kind,
        date,
        time,
        interval: coerce_interval(descriptor.interval.as_ref()),
        count: coerce_count(descriptor.count.as_ref()),
        until,
        days,
        day_of_week,
        month_of_year,
        owner: descriptor.owner,
    })
}

fn rejected(errors: ValidationErrors) -> ValidationErrors {
    tracing::debug!(%errors, "Descriptor rejected");
    errors
}

fn collect_days(entries: &[String], errors: &mut Vec<ValidationError>) -> WeekdaySet {
    let mut days = WeekdaySet::new();
    let mut any_unknown = false;
    for entry in entries {
        match parse_weekday(entry) {
            Some(day) => days.insert(day),
            None => {
                any_unknown = true;
                errors.push(ValidationError::UnknownWeekday(entry.clone()));
            }
        }
    }
    if days.is_empty() && !any_unknown {
        errors.push(ValidationError::EmptyDayList);
    }
    days
}

fn collect_positions(
    descriptor: &Descriptor,
    errors: &mut Vec<ValidationError>,
) -> OrdinalWeekdays {
    let mut positions = OrdinalWeekdays::new();
    let mut any_invalid = false;
    for day in WEEKDAYS {
        for value in descriptor.day_of_week.positions(day) {
            match value.as_integer().and_then(Ordinal::new) {
                Some(position) => positions.insert(day, position),
                None => {
                    any_invalid = true;
                    errors.push(ValidationError::InvalidOrdinal(value.to_text()));
                }
            }
        }
    }
    if positions.is_empty() && !any_invalid {
        errors.push(ValidationError::EmptyDayOfWeek);
    }
    positions
}

fn collect_months(descriptor: &Descriptor, errors: &mut Vec<ValidationError>) -> MonthSet {
    let Some(values) = &descriptor.month_of_year else {
        return MonthSet::new();
    };
    values
        .iter()
        .filter_map(|value| {
            let month = parse_form_month(value);
            if month.is_none() {
                errors.push(ValidationError::InvalidMonth(value.to_text()));
            }
            month
        })
        .collect()
}

fn parse_form_month(value: &FormValue) -> Option<Month> {
    match value {
        FormValue::Integer(number) => u8::try_from(*number)
            .ok()
            .and_then(|number| Month::try_from(number).ok()),
        FormValue::Text(text) => parse_month(text),
    }
}

/// Malformed, absent or non-positive intervals become 1.
fn coerce_interval(value: Option<&FormValue>) -> u32 {
    value.and_then(positive_integer).unwrap_or(1)
}

/// Only a positive count bounds the schedule.
fn coerce_count(value: Option<&FormValue>) -> Option<u32> {
    value.and_then(positive_integer)
}

/// Positive integers, saturating at `u32::MAX`.
fn positive_integer(value: &FormValue) -> Option<u32> {
    value
        .as_integer()
        .filter(|number| *number > 0)
        .map(|number| u32::try_from(number).unwrap_or(u32::MAX))
}
