//! RFC 5545 export through the `rrule` crate.

use cadence_core::types::OrdinalWeekdays;
use cadence_core::zone::localize;
use chrono::Month;
use rrule::{Frequency, NWeekday, RRule, RRuleSet};

use super::{Recurrence, Rule};
use crate::error::{EngineError, EngineResult};

impl Rule {
    /// ## Summary
    /// Expresses this rule as an `rrule` set starting at the first
    /// candidate instant.
    ///
    /// Singular rules become a set holding one RDATE.
    ///
    /// ## Errors
    /// Returns an error if the interval exceeds what RFC 5545 tooling
    /// accepts or if `rrule` rejects the built rule.
    pub fn to_rrule_set(&self) -> EngineResult<RRuleSet> {
        let zone = rrule::Tz::Tz(self.zone);
        let dt_start = localize(self.anchor.date_naive().and_time(self.time), self.zone)
            .with_timezone(&zone);

        let frequency = match &self.recurrence {
            Recurrence::Singular => {
                return Ok(RRuleSet::new(dt_start).set_rdates(vec![dt_start]));
            }
            Recurrence::Daily => Frequency::Daily,
            Recurrence::Weekly { .. } => Frequency::Weekly,
            Recurrence::Monthly { .. } => Frequency::Monthly,
            Recurrence::Yearly { .. } => Frequency::Yearly,
        };

        let interval = u16::try_from(self.interval).map_err(|_e| {
            EngineError::ExportError(format!("interval {} is too large", self.interval))
        })?;

        let mut rrule = RRule::new(frequency)
            .interval(interval)
            .week_start(self.week_start);
        if let Some(count) = self.count {
            rrule = rrule.count(count);
        }
        if let Some(until) = self.until {
            rrule = rrule.until(until.with_timezone(&rrule::Tz::UTC));
        }

        rrule = match &self.recurrence {
            Recurrence::Weekly { days } => {
                rrule.by_weekday(days.iter().map(NWeekday::Every).collect())
            }
            Recurrence::Monthly { positions } => rrule.by_weekday(nth_weekdays(positions)),
            Recurrence::Yearly { positions, months } => {
                // Without BYMONTH a yearly BYDAY ordinal counts across the year.
                let months: Vec<Month> = if months.is_empty() && !positions.is_empty() {
                    (1..=12_u8).filter_map(|number| Month::try_from(number).ok()).collect()
                } else {
                    months.iter().collect()
                };
                let rrule = rrule.by_weekday(nth_weekdays(positions));
                if months.is_empty() {
                    rrule
                } else {
                    rrule.by_month(&months)
                }
            }
            Recurrence::Singular | Recurrence::Daily => rrule,
        };

        tracing::trace!(rule = ?rrule, "Exporting rule");

        Ok(rrule.build(dt_start)?)
    }

    /// ## Summary
    /// RFC 5545 text (`DTSTART` plus `RRULE` or `RDATE` lines).
    ///
    /// ## Errors
    /// See [`Rule::to_rrule_set`].
    pub fn to_rrule_string(&self) -> EngineResult<String> {
        Ok(self.to_rrule_set()?.to_string())
    }
}

fn nth_weekdays(positions: &OrdinalWeekdays) -> Vec<NWeekday> {
    positions
        .iter()
        .map(|(day, position)| NWeekday::Nth(i16::from(position.get()), day))
        .collect()
}
