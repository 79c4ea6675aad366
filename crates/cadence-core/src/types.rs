//! Calendar value types shared by descriptor validation and the engine.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{Month, Weekday};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Recurrence kind of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Singular,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RuleKind {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Singular => "singular",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Parses a rule kind from its wire name (case-insensitive).
    ///
    /// Only the five exact names are accepted: `"month"` is not an alias of
    /// `"monthly"`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.trim().to_ascii_lowercase().as_str() {
            "singular" => Self::Singular,
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            "yearly" => Self::Yearly,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn is_recurring(self) -> bool {
        !matches!(self, Self::Singular)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weekdays in Monday-first order.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Lowercase English name, as used by the wire format.
#[must_use]
pub const fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Parses a weekday from a full or abbreviated English name (case-insensitive).
#[must_use]
pub fn parse_weekday(s: &str) -> Option<Weekday> {
    s.trim().parse::<Weekday>().ok()
}

/// Parses a month from a number (`1..=12`) or an English name.
#[must_use]
pub fn parse_month(s: &str) -> Option<Month> {
    let trimmed = s.trim();
    if let Ok(number) = trimmed.parse::<u8>() {
        return Month::try_from(number).ok();
    }
    trimmed.parse::<Month>().ok()
}

/// Signed position of a weekday within a month or year.
///
/// `1` is the first occurrence, `-1` the last, `-2` the second to last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Ordinal(i8);

impl Ordinal {
    pub const FIRST: Self = Self(1);
    pub const LAST: Self = Self(-1);

    /// Creates an ordinal in `-5..=-1` or `1..=5`.
    #[must_use]
    pub fn new(position: i64) -> Option<Self> {
        if (1..=5).contains(&position) || (-5..=-1).contains(&position) {
            i8::try_from(position).ok().map(Self)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn get(self) -> i8 {
        self.0
    }

    #[must_use]
    pub const fn is_from_end(self) -> bool {
        self.0 < 0
    }

    /// ## Summary
    /// Picks this position out of the chronologically ordered `matches`.
    ///
    /// Returns `None` when the period has too few matches, e.g. a fifth
    /// Monday in a month that only has four.
    #[must_use]
    pub fn pick<T: Copy>(self, matches: &[T]) -> Option<T> {
        let magnitude = usize::from(self.0.unsigned_abs());
        if magnitude > matches.len() {
            return None;
        }
        let index = if self.is_from_end() {
            matches.len() - magnitude
        } else {
            magnitude - 1
        };
        matches.get(index).copied()
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Set of weekdays, iterated Monday first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.num_days_from_monday();
    }

    #[must_use]
    pub fn contains(self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_monday()) != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        WEEKDAYS.into_iter().filter(move |day| self.contains(*day))
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::new();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl Serialize for WeekdaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(weekday_name))
    }
}

/// Set of months, iterated January first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MonthSet(u16);

impl MonthSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, month: Month) {
        self.0 |= 1 << month.number_from_month();
    }

    #[must_use]
    pub fn contains(self, month: Month) -> bool {
        self.0 & (1 << month.number_from_month()) != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Month> {
        (1..=12u8)
            .filter_map(|number| Month::try_from(number).ok())
            .filter(move |month| self.contains(*month))
    }
}

impl FromIterator<Month> for MonthSet {
    fn from_iter<I: IntoIterator<Item = Month>>(iter: I) -> Self {
        let mut set = Self::new();
        for month in iter {
            set.insert(month);
        }
        set
    }
}

impl Serialize for MonthSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(|month| month.number_from_month()))
    }
}

/// Weekday positions keyed by weekday, e.g. `{monday: [1, -1]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OrdinalWeekdays([BTreeSet<Ordinal>; 7]);

impl OrdinalWeekdays {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, day: Weekday, position: Ordinal) {
        self.0[day.num_days_from_monday() as usize].insert(position);
    }

    #[must_use]
    pub fn positions(&self, day: Weekday) -> &BTreeSet<Ordinal> {
        &self.0[day.num_days_from_monday() as usize]
    }

    /// True when no weekday carries a position.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(BTreeSet::is_empty)
    }

    /// Weekdays that carry at least one position, Monday first.
    pub fn weekdays(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEKDAYS
            .into_iter()
            .filter(|day| !self.positions(*day).is_empty())
    }

    /// Every `(weekday, position)` pair, Monday first, positions ascending.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, Ordinal)> + '_ {
        WEEKDAYS.into_iter().flat_map(move |day| {
            self.positions(day)
                .iter()
                .map(move |position| (day, *position))
        })
    }
}

impl FromIterator<(Weekday, Ordinal)> for OrdinalWeekdays {
    fn from_iter<I: IntoIterator<Item = (Weekday, Ordinal)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (day, position) in iter {
            map.insert(day, position);
        }
        map
    }
}

impl Serialize for OrdinalWeekdays {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for day in self.weekdays() {
            map.serialize_entry(weekday_name(day), self.positions(day))?;
        }
        map.end()
    }
}
