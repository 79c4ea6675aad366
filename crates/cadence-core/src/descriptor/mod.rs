//! Schedule descriptors as supplied by the persistence or form layer.
//!
//! The serde shape of [`Descriptor`] is the field allow-list shared with
//! that layer: `id, date, time, rule, until, count, interval, month_of_year,
//! day[], day_of_week{monday[] .. sunday[]}`. Values arrive form-encoded, so
//! blank strings are tolerated everywhere and numbers may be strings.

mod validate;
mod values;

use chrono::Weekday;
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::RuleKind;

pub use validate::{ValidDescriptor, validate};
pub use values::{TimeOfDay, Until};

/// Passive reference to the entity that owns a schedule.
///
/// Carried as-is; never resolved or inspected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerRef {
    pub owner_id: String,
    pub owner_type: String,
}

impl OwnerRef {
    #[must_use]
    pub fn new(owner_id: impl Into<String>, owner_type: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            owner_type: owner_type.into(),
        }
    }
}

/// A scalar form value: either a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Integer(i64),
    Text(String),
}

impl FormValue {
    /// True for empty or whitespace-only strings.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }

    /// Integer value, parsing strings leniently.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }

    /// Text form, for error messages and name lookups.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Integer(value) => value.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

impl From<i64> for FormValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A single value or a list of values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Self::One(value) => std::slice::from_ref(value).iter(),
            Self::Many(values) => values.iter(),
        }
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        match self {
            Self::One(value) => {
                if !keep(value) {
                    *self = Self::Many(Vec::new());
                }
            }
            Self::Many(values) => values.retain(keep),
        }
    }
}

/// Ordinal positions per weekday, as sent by the form layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOfWeekParams {
    #[serde(default, deserialize_with = "null_as_default")]
    pub monday: Vec<FormValue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tuesday: Vec<FormValue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wednesday: Vec<FormValue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub thursday: Vec<FormValue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub friday: Vec<FormValue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub saturday: Vec<FormValue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sunday: Vec<FormValue>,
}

impl DayOfWeekParams {
    #[must_use]
    pub fn positions(&self, day: Weekday) -> &[FormValue] {
        match day {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    pub fn positions_mut(&mut self, day: Weekday) -> &mut Vec<FormValue> {
        match day {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        }
    }
}

/// Caller-supplied recurrence intent, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub rule: Option<String>,
    #[serde(default)]
    pub until: Option<String>,
    #[serde(default)]
    pub count: Option<FormValue>,
    #[serde(default)]
    pub interval: Option<FormValue>,
    #[serde(default)]
    pub month_of_year: Option<OneOrMany<FormValue>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub day: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub day_of_week: DayOfWeekParams,
    /// Owning entity; maintained by the persistence layer, not serialized.
    #[serde(skip)]
    pub owner: Option<OwnerRef>,
}

impl Descriptor {
    #[must_use]
    pub fn new(kind: RuleKind) -> Self {
        Self {
            rule: Some(kind.as_str().to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    #[must_use]
    pub fn with_until(mut self, until: impl Into<String>) -> Self {
        self.until = Some(until.into());
        self
    }

    #[must_use]
    pub fn with_count(mut self, count: i64) -> Self {
        self.count = Some(FormValue::Integer(count));
        self
    }

    #[must_use]
    pub fn with_interval(mut self, interval: i64) -> Self {
        self.interval = Some(FormValue::Integer(interval));
        self
    }

    #[must_use]
    pub fn with_day(mut self, day: Weekday) -> Self {
        self.day.push(crate::types::weekday_name(day).to_string());
        self
    }

    #[must_use]
    pub fn with_position(mut self, day: Weekday, position: i64) -> Self {
        self.day_of_week
            .positions_mut(day)
            .push(FormValue::Integer(position));
        self
    }

    #[must_use]
    pub fn with_month(mut self, month: chrono::Month) -> Self {
        let value = FormValue::Integer(i64::from(month.number_from_month()));
        self.month_of_year = Some(match self.month_of_year.take() {
            None => OneOrMany::One(value),
            Some(OneOrMany::One(existing)) => OneOrMany::Many(vec![existing, value]),
            Some(OneOrMany::Many(mut values)) => {
                values.push(value);
                OneOrMany::Many(values)
            }
        });
        self
    }

    #[must_use]
    pub fn with_owner(mut self, owner: OwnerRef) -> Self {
        self.owner = Some(owner);
        self
    }

    /// ## Summary
    /// Discards blank entries from `day`, every `day_of_week` list and
    /// `month_of_year`.
    ///
    /// ## Side Effects
    ///
    /// The stripped entries are gone for good; validation works on the
    /// stripped lists.
    pub fn strip_blanks(&mut self) {
        self.day.retain(|day| !day.trim().is_empty());
        for day in crate::types::WEEKDAYS {
            self.day_of_week
                .positions_mut(day)
                .retain(|position| !position.is_blank());
        }
        if let Some(months) = &mut self.month_of_year {
            months.retain(|month| !month.is_blank());
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
