//! Calendar periods of a rule and the candidate dates inside each one.
//!
//! Period `n` is the `n * interval`-th day, week, month or year counted
//! from the anchor's local date.

use cadence_core::types::OrdinalWeekdays;
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::rule::{Recurrence, Rule};

/// ## Summary
/// Dates of period `index`, ascending and without duplicates.
///
/// Returns `None` once the period lies beyond the representable calendar.
pub(crate) fn candidate_dates(rule: &Rule, index: u64) -> Option<Vec<NaiveDate>> {
    let origin = rule.anchor().date_naive();
    let steps = index.checked_mul(u64::from(rule.interval()))?;

    let mut dates = match rule.recurrence() {
        Recurrence::Singular => {
            return (index == 0).then(|| vec![origin]);
        }
        Recurrence::Daily => vec![origin.checked_add_days(Days::new(steps))?],
        Recurrence::Weekly { days } => {
            let week = start_of_week(origin, rule.week_start())?
                .checked_add_days(Days::new(steps.checked_mul(7)?))?;
            days.iter()
                .filter_map(|day| {
                    week.checked_add_days(Days::new(days_after(rule.week_start(), day)))
                })
                .collect()
        }
        Recurrence::Monthly { positions } => {
            let month = first_of_month(origin)
                .checked_add_months(Months::new(u32::try_from(steps).ok()?))?;
            let last = last_of_month(month)?;
            if positions.is_empty() {
                month.with_day(origin.day()).into_iter().collect()
            } else {
                resolve_positions(positions, month, last)
            }
        }
        Recurrence::Yearly { positions, months } => {
            let year = origin
                .year()
                .checked_add(i32::try_from(steps).ok()?)?;
            if months.is_empty() && positions.is_empty() {
                origin.with_year(year).into_iter().collect()
            } else {
                // Ordinals always count within a month; no listed month means every month.
                let numbers: Vec<u32> = if months.is_empty() {
                    (1..=12).collect()
                } else {
                    months.iter().map(|month| month.number_from_month()).collect()
                };
                let mut dates = Vec::new();
                for number in numbers {
                    let first = NaiveDate::from_ymd_opt(year, number, 1)?;
                    if positions.is_empty() {
                        dates.extend(first.with_day(origin.day()));
                    } else {
                        dates.extend(resolve_positions(positions, first, last_of_month(first)?));
                    }
                }
                dates
            }
        }
    };

    dates.sort_unstable();
    dates.dedup();
    Some(dates)
}

/// ## Summary
/// Index of the period that contains `date`, or `0` when `date` precedes
/// the anchor.
pub(crate) fn period_containing(rule: &Rule, date: NaiveDate) -> u64 {
    let origin = rule.anchor().date_naive();
    if date <= origin {
        return 0;
    }
    let units = match rule.recurrence() {
        Recurrence::Singular => 0,
        Recurrence::Daily => (date - origin).num_days(),
        Recurrence::Weekly { .. } => {
            let week_start = rule.week_start();
            match (start_of_week(date, week_start), start_of_week(origin, week_start)) {
                (Some(week), Some(first_week)) => (week - first_week).num_days() / 7,
                _ => 0,
            }
        }
        Recurrence::Monthly { .. } => {
            i64::from(date.year() - origin.year()) * 12 + i64::from(date.month0())
                - i64::from(origin.month0())
        }
        Recurrence::Yearly { .. } => i64::from(date.year() - origin.year()),
    };
    u64::try_from(units).map_or(0, |units| units / u64::from(rule.interval()))
}

/// Dates in `first..=last` matching the requested weekday positions.
fn resolve_positions(
    positions: &OrdinalWeekdays,
    first: NaiveDate,
    last: NaiveDate,
) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    for day in positions.weekdays() {
        let matches = weekdays_between(day, first, last);
        dates.extend(
            positions
                .positions(day)
                .iter()
                .filter_map(|position| position.pick(&matches)),
        );
    }
    dates
}

fn weekdays_between(day: Weekday, first: NaiveDate, last: NaiveDate) -> Vec<NaiveDate> {
    first
        .checked_add_days(Days::new(days_after(first.weekday(), day)))
        .into_iter()
        .flat_map(|start| start.iter_weeks())
        .take_while(|date| *date <= last)
        .collect()
}

/// Days from `from` forward to the next `to`, `0` when equal.
fn days_after(from: Weekday, to: Weekday) -> u64 {
    u64::from((7 + to.num_days_from_monday() - from.num_days_from_monday()) % 7)
}

fn start_of_week(date: NaiveDate, week_start: Weekday) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(days_after(week_start, date.weekday())))
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

fn last_of_month(first: NaiveDate) -> Option<NaiveDate> {
    first.checked_add_months(Months::new(1))?.pred_opt()
}
