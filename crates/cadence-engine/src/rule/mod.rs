//! Compiled recurrence rules.

mod compile;
mod export;

use cadence_core::types::{MonthSet, OrdinalWeekdays, RuleKind, WeekdaySet, weekday_name};
use chrono::{DateTime, NaiveTime, Weekday};
use chrono_tz::Tz;
use serde::{Serialize, Serializer};

pub use compile::{CompileContext, compile};

/// Kind of a rule together with the day constraints that kind uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recurrence {
    /// A single occurrence at the anchor.
    Singular,
    Daily,
    /// Every matching weekday of each stepped week.
    Weekly { days: WeekdaySet },
    /// The given weekday positions of each stepped month.
    Monthly { positions: OrdinalWeekdays },
    /// The given weekday positions of each stepped year, within `months`
    /// when any are listed and within the whole year otherwise.
    Yearly {
        positions: OrdinalWeekdays,
        months: MonthSet,
    },
}

impl Recurrence {
    #[must_use]
    pub const fn kind(&self) -> RuleKind {
        match self {
            Self::Singular => RuleKind::Singular,
            Self::Daily => RuleKind::Daily,
            Self::Weekly { .. } => RuleKind::Weekly,
            Self::Monthly { .. } => RuleKind::Monthly,
            Self::Yearly { .. } => RuleKind::Yearly,
        }
    }
}

/// A validated, immutable recurrence rule with its anchor precomputed.
///
/// Built by [`compile`]; recompile whenever the source descriptor changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    recurrence: Recurrence,
    #[serde(serialize_with = "serialize_zone")]
    zone: Tz,
    anchor: DateTime<Tz>,
    time: NaiveTime,
    interval: u32,
    count: Option<u32>,
    until: Option<DateTime<Tz>>,
    #[serde(serialize_with = "serialize_weekday")]
    week_start: Weekday,
}

impl Rule {
    #[must_use]
    pub const fn recurrence(&self) -> &Recurrence {
        &self.recurrence
    }

    #[must_use]
    pub const fn kind(&self) -> RuleKind {
        self.recurrence.kind()
    }

    /// Zone in which calendar arithmetic happens.
    #[must_use]
    pub const fn zone(&self) -> Tz {
        self.zone
    }

    /// Lower bound of the occurrence search.
    #[must_use]
    pub fn anchor(&self) -> DateTime<Tz> {
        self.anchor
    }

    /// Wall-clock time of every occurrence.
    #[must_use]
    pub const fn time_of_day(&self) -> NaiveTime {
        self.time
    }

    #[must_use]
    pub const fn interval(&self) -> u32 {
        self.interval
    }

    #[must_use]
    pub const fn count(&self) -> Option<u32> {
        self.count
    }

    /// Inclusive upper bound.
    #[must_use]
    pub fn until(&self) -> Option<DateTime<Tz>> {
        self.until
    }

    #[must_use]
    pub const fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// True when the occurrence sequence ends on its own.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        matches!(self.recurrence, Recurrence::Singular)
            || self.count.is_some()
            || self.until.is_some()
    }
}

fn serialize_zone<S: Serializer>(zone: &Tz, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(zone.name())
}

fn serialize_weekday<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(weekday_name(*day))
}
