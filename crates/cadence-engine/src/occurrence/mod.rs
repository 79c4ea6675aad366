//! Lazy occurrence generation.

mod period;

use std::collections::VecDeque;
use std::iter::FusedIterator;

use cadence_core::zone::localize;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::rule::Rule;

/// Consecutive periods without a single candidate after which the search
/// gives up, e.g. a 5th-Friday rule stepped only through short months.
const MAX_EMPTY_PERIODS: u32 = 1_000;

/// Chronological occurrences of a [`Rule`], computed on demand.
///
/// Ends after `count` occurrences, after the last occurrence not later than
/// `until`, or never.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    rule: &'a Rule,
    next_period: u64,
    pending: VecDeque<DateTime<Tz>>,
    emitted: u32,
    exhausted: bool,
}

impl<'a> Occurrences<'a> {
    fn new(rule: &'a Rule) -> Self {
        Self {
            rule,
            next_period: 0,
            pending: VecDeque::new(),
            emitted: 0,
            exhausted: false,
        }
    }

    /// Skips whole periods ending before `date`.
    ///
    /// Only sound while nothing has been emitted and the rule has no count,
    /// since skipped occurrences would otherwise go uncounted.
    fn fast_forward(&mut self, date: NaiveDate) {
        if self.rule.count().is_some() || self.emitted > 0 {
            return;
        }
        let target = period::period_containing(self.rule, date);
        if target > self.next_period {
            tracing::trace!(from = self.next_period, to = target, "Fast-forwarding periods");
            self.next_period = target;
            self.pending.clear();
        }
    }

    /// Loads the next period that has candidates. Returns false when the
    /// sequence cannot continue.
    fn refill(&mut self) -> bool {
        let anchor = self.rule.anchor();
        let zone = self.rule.zone();
        let time = self.rule.time_of_day();
        let mut empty_periods = 0;

        while self.pending.is_empty() {
            let index = self.next_period;
            let Some(dates) = period::candidate_dates(self.rule, index) else {
                return false;
            };
            let Some(next_period) = index.checked_add(1) else {
                return false;
            };
            self.next_period = next_period;

            let mut candidates: Vec<DateTime<Tz>> = dates
                .into_iter()
                .map(|date| localize(date.and_time(time), zone))
                .filter(|candidate| *candidate >= anchor)
                .collect();
            candidates.sort_unstable();
            candidates.dedup();
            tracing::trace!(period = index, candidates = candidates.len(), "Examined period");
            self.pending.extend(candidates);

            if self.pending.is_empty() {
                empty_periods += 1;
                if empty_periods >= MAX_EMPTY_PERIODS {
                    tracing::warn!(
                        kind = %self.rule.kind(),
                        periods = empty_periods,
                        "No occurrence found in consecutive periods, ending sequence"
                    );
                    return false;
                }
            }
        }
        true
    }
}

impl Iterator for Occurrences<'_> {
    type Item = DateTime<Tz>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.exhausted {
            if self
                .rule
                .count()
                .is_some_and(|count| self.emitted >= count)
            {
                self.exhausted = true;
                break;
            }

            let Some(candidate) = self.pending.pop_front() else {
                if !self.refill() {
                    self.exhausted = true;
                }
                continue;
            };

            if self.rule.until().is_some_and(|until| candidate > until) {
                tracing::trace!(%candidate, "Passed until bound");
                self.exhausted = true;
                break;
            }

            self.emitted += 1;
            return Some(candidate);
        }
        None
    }
}

impl FusedIterator for Occurrences<'_> {}

impl Rule {
    /// Every occurrence from the anchor on, lazily.
    #[must_use]
    pub fn occurrences(&self) -> Occurrences<'_> {
        Occurrences::new(self)
    }

    /// ## Summary
    /// Occurrences in `from..=to`.
    ///
    /// Unbounded rules skip ahead to the period containing `from` instead
    /// of walking every period since the anchor.
    pub fn occurrences_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> impl Iterator<Item = DateTime<Tz>> + '_ {
        self.occurrences_from(from)
            .skip_while(move |occurrence| *occurrence < from)
            .take_while(move |occurrence| *occurrence <= to)
    }

    /// First occurrence strictly after `after`.
    #[must_use]
    pub fn next_occurrence(&self, after: DateTime<Utc>) -> Option<DateTime<Tz>> {
        self.occurrences_from(after)
            .find(|occurrence| *occurrence > after)
    }

    /// The first `n` occurrences, fewer if the sequence ends sooner.
    #[must_use]
    pub fn first(&self, n: usize) -> Vec<DateTime<Tz>> {
        self.occurrences().take(n).collect()
    }

    /// True when some occurrence falls on `date` in the rule's zone.
    #[must_use]
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        let start = localize(date.and_time(chrono::NaiveTime::MIN), self.zone());
        self.occurrences_from(start.with_timezone(&Utc))
            .map(|occurrence| occurrence.date_naive())
            .take_while(|day| *day <= date)
            .any(|day| day == date)
    }

    fn occurrences_from(&self, from: DateTime<Utc>) -> Occurrences<'_> {
        let mut occurrences = self.occurrences();
        occurrences.fast_forward(from.with_timezone(&self.zone()).date_naive());
        occurrences
    }
}
