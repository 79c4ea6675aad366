use cadence_core::config::Settings;
use cadence_core::descriptor::Until;
use cadence_core::error::CoreResult;
use cadence_core::types::RuleKind;
use cadence_core::zone::localize;
use cadence_core::{Descriptor, ValidDescriptor, ValidationErrors, validate};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, Timelike, Utc, Weekday};
use chrono_tz::Tz;

use super::{Recurrence, Rule};

/// Ambient inputs to compilation that do not come from the descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileContext {
    zone: Tz,
    week_start: Weekday,
    now: Option<DateTime<Utc>>,
}

impl Default for CompileContext {
    fn default() -> Self {
        Self {
            zone: Tz::UTC,
            week_start: Weekday::Mon,
            now: None,
        }
    }
}

impl CompileContext {
    #[must_use]
    pub const fn new(zone: Tz, week_start: Weekday) -> Self {
        Self {
            zone,
            week_start,
            now: None,
        }
    }

    /// ## Summary
    /// Builds a context from the configured default zone and week start.
    ///
    /// ## Errors
    /// Returns an error if either setting does not parse.
    pub fn from_settings(settings: &Settings) -> CoreResult<Self> {
        Ok(Self::new(
            settings.schedule.zone()?,
            settings.schedule.week_start()?,
        ))
    }

    /// Pins "today" for descriptors without a date. Unpinned contexts read
    /// the system clock at compile time.
    #[must_use]
    pub const fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    #[must_use]
    pub const fn zone(&self) -> Tz {
        self.zone
    }

    #[must_use]
    pub const fn week_start(&self) -> Weekday {
        self.week_start
    }

    fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}

/// ## Summary
/// Turns a validated descriptor into a [`Rule`].
///
/// The descriptor's own zone wins over the context zone. The anchor is the
/// descriptor date (or today) at the descriptor time; yearly rules instead
/// anchor at midnight on January 1 of the following year, so they never
/// produce an occurrence in the year the date falls in.
#[tracing::instrument(skip_all, fields(kind = %valid.kind()))]
#[must_use]
pub fn compile(valid: &ValidDescriptor, context: &CompileContext) -> Rule {
    let zone = valid.time().zone.unwrap_or(context.zone);
    let time = valid.time().time;
    let anchor = select_anchor(valid, zone, context.now());

    let recurrence = match valid.kind() {
        RuleKind::Singular => Recurrence::Singular,
        RuleKind::Daily => Recurrence::Daily,
        RuleKind::Weekly => Recurrence::Weekly {
            days: valid.days(),
        },
        RuleKind::Monthly => Recurrence::Monthly {
            positions: valid.day_of_week().clone(),
        },
        RuleKind::Yearly => Recurrence::Yearly {
            positions: valid.day_of_week().clone(),
            months: valid.month_of_year(),
        },
    };

    let (count, until) = if valid.kind().is_recurring() {
        (valid.count(), valid.until().map(|until| resolve_until(until, zone)))
    } else {
        (None, None)
    };

    tracing::debug!(%anchor, zone = zone.name(), ?count, ?until, "Compiled rule");

    Rule {
        recurrence,
        zone,
        anchor,
        time,
        interval: valid.interval(),
        count,
        until,
        week_start: context.week_start,
    }
}

impl Rule {
    /// ## Summary
    /// Validates `descriptor` and compiles it in one step.
    ///
    /// ## Errors
    /// Returns every validation failure when the descriptor is invalid.
    pub fn from_descriptor(
        descriptor: Descriptor,
        context: &CompileContext,
    ) -> Result<Self, ValidationErrors> {
        validate(descriptor).map(|valid| compile(&valid, context))
    }
}

fn select_anchor(valid: &ValidDescriptor, zone: Tz, now: DateTime<Utc>) -> DateTime<Tz> {
    let today = now.with_timezone(&zone).date_naive();
    let date = valid.date().unwrap_or(today);

    if valid.kind() == RuleKind::Yearly {
        let year = date.year().saturating_add(1);
        if let Some(new_year) = NaiveDate::from_ymd_opt(year, 1, 1) {
            return localize(new_year.and_time(NaiveTime::MIN), zone);
        }
    }

    // Midnight plus elapsed seconds, so leap seconds normalize away.
    let seconds = i64::from(valid.time().time.num_seconds_from_midnight());
    localize(
        date.and_time(NaiveTime::MIN) + TimeDelta::seconds(seconds),
        zone,
    )
}

fn resolve_until(until: Until, zone: Tz) -> DateTime<Tz> {
    match until {
        Until::Instant(instant) => instant.with_timezone(&zone),
        Until::Date(date) => localize(
            date.and_time(NaiveTime::MIN) + TimeDelta::days(1) - TimeDelta::seconds(1),
            zone,
        ),
    }
}
