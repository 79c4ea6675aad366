use cadence_core::types::{Ordinal, OrdinalWeekdays, RuleKind, WeekdaySet};
use chrono::{DateTime, Weekday};
use chrono_tz::Tz;
use icu::locale::Locale;
use icu::locale::subtags::language;

use super::Localizer;
use crate::error::FormattingError;
use crate::rule::{Recurrence, Rule};

/// Layout of a single rendered instant, e.g. `Mon, 01 Jan 2024 09:00:00 +0000`.
const INSTANT_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";
const UNTIL_FORMAT: &str = "%B %-d, %Y";

/// English rendering for every `en` locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnglishLocalizer;

impl EnglishLocalizer {
    fn ensure_supported(locale: &Locale) -> Result<(), FormattingError> {
        if locale.id.language == language!("en") {
            Ok(())
        } else {
            Err(FormattingError::UnsupportedLocale(locale.to_string()))
        }
    }
}

impl Localizer for EnglishLocalizer {
    fn localize(&self, instant: &DateTime<Tz>, locale: &Locale) -> Result<String, FormattingError> {
        Self::ensure_supported(locale)?;
        Ok(instant.format(INSTANT_FORMAT).to_string())
    }

    fn describe_rule(&self, rule: &Rule, locale: &Locale) -> Result<String, FormattingError> {
        Self::ensure_supported(locale)?;

        let mut text = frequency(rule.kind(), rule.interval());
        match rule.recurrence() {
            Recurrence::Singular => {
                text.push_str(" on ");
                text.push_str(&rule.anchor().format(INSTANT_FORMAT).to_string());
            }
            Recurrence::Daily => {}
            Recurrence::Weekly { days } => {
                text.push_str(" on ");
                text.push_str(&weekdays(*days));
            }
            Recurrence::Monthly { positions } => {
                if !positions.is_empty() {
                    text.push_str(" on ");
                    text.push_str(&ordinal_weekdays(positions));
                }
            }
            Recurrence::Yearly { positions, months } => {
                if months.is_empty() {
                    if !positions.is_empty() {
                        text.push_str(" in every month");
                    }
                } else {
                    let names: Vec<String> =
                        months.iter().map(|month| month.name().to_string()).collect();
                    text.push_str(" in ");
                    text.push_str(&sentence(&names));
                }
                if !positions.is_empty() {
                    text.push_str(" on ");
                    text.push_str(&ordinal_weekdays(positions));
                }
            }
        }

        match rule.count() {
            Some(1) => text.push_str(" once"),
            Some(count) => text.push_str(&format!(" {count} times")),
            None => {}
        }
        if let Some(until) = rule.until() {
            text.push_str(" until ");
            text.push_str(&until.format(UNTIL_FORMAT).to_string());
        }

        Ok(text)
    }
}

fn frequency(kind: RuleKind, interval: u32) -> String {
    let (adverb, unit) = match kind {
        RuleKind::Singular => return "Once".to_string(),
        RuleKind::Daily => ("Daily", "days"),
        RuleKind::Weekly => ("Weekly", "weeks"),
        RuleKind::Monthly => ("Monthly", "months"),
        RuleKind::Yearly => ("Yearly", "years"),
    };
    if interval == 1 {
        adverb.to_string()
    } else {
        format!("Every {interval} {unit}")
    }
}

fn weekdays(days: WeekdaySet) -> String {
    let workweek: WeekdaySet = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ]
    .into_iter()
    .collect();
    let weekend: WeekdaySet = [Weekday::Sat, Weekday::Sun].into_iter().collect();

    if days == workweek {
        return "Weekdays".to_string();
    }
    if days == weekend {
        return "Weekends".to_string();
    }
    let names: Vec<String> = days.iter().map(|day| format!("{}s", day_name(day))).collect();
    sentence(&names)
}

fn ordinal_weekdays(positions: &OrdinalWeekdays) -> String {
    let phrases: Vec<String> = positions
        .iter()
        .map(|(day, position)| format!("{} {}", ordinal(position), day_name(day)))
        .collect();
    format!("the {}", sentence(&phrases))
}

fn ordinal(position: Ordinal) -> String {
    let magnitude = position.get().unsigned_abs();
    if position == Ordinal::LAST {
        return "last".to_string();
    }
    let suffix = match magnitude {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    };
    if position.is_from_end() {
        format!("{magnitude}{suffix} to last")
    } else {
        format!("{magnitude}{suffix}")
    }
}

const fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// `a`, `a and b`, `a, b and c`.
fn sentence(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}
