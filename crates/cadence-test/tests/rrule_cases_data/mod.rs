use cadence_core::Descriptor;
use cadence_engine::{CompileContext, Rule};
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use rrule::RRuleSet;

/// A descriptor, the occurrences it must produce, and the hand-written
/// RFC 5545 rule that produces the same instants.
pub struct RuleCase {
    pub name: &'static str,
    pub descriptor: &'static str,
    pub rruleset: Option<&'static str>,
    pub expected: &'static [&'static str],
    pub limit: u16,
}

#[expect(clippy::too_many_lines)]
pub fn rule_cases() -> Vec<RuleCase> {
    vec![
        RuleCase {
            name: "daily_basic",
            descriptor: r#"{"rule": "daily", "date": "2012-02-01", "time": "09:30", "count": 3}"#,
            rruleset: Some("DTSTART:20120201T093000Z\nRRULE:FREQ=DAILY;COUNT=3"),
            expected: &[
                "2012-02-01T09:30:00+00:00",
                "2012-02-02T09:30:00+00:00",
                "2012-02-03T09:30:00+00:00",
            ],
            limit: 10,
        },
        RuleCase {
            name: "daily_interval_until_date",
            descriptor: r#"{"rule": "daily", "date": "2024-01-01", "time": "08:00", "interval": "3", "until": "2024-01-10"}"#,
            rruleset: Some(
                "DTSTART:20240101T080000Z\nRRULE:FREQ=DAILY;INTERVAL=3;UNTIL=20240110T235959Z",
            ),
            expected: &[
                "2024-01-01T08:00:00+00:00",
                "2024-01-04T08:00:00+00:00",
                "2024-01-07T08:00:00+00:00",
                "2024-01-10T08:00:00+00:00",
            ],
            limit: 10,
        },
        RuleCase {
            name: "weekly_biweekly_monday_wednesday",
            descriptor: r#"{"rule": "weekly", "date": "2024-01-01", "time": "09:00", "interval": 2, "count": 4, "day": ["monday", "wednesday"]}"#,
            rruleset: Some(
                "DTSTART:20240101T090000Z\nRRULE:FREQ=WEEKLY;INTERVAL=2;COUNT=4;BYDAY=MO,WE;WKST=MO",
            ),
            expected: &[
                "2024-01-01T09:00:00+00:00",
                "2024-01-03T09:00:00+00:00",
                "2024-01-15T09:00:00+00:00",
                "2024-01-17T09:00:00+00:00",
            ],
            limit: 10,
        },
        RuleCase {
            name: "weekly_blank_days_stripped",
            descriptor: r#"{"rule": "weekly", "date": "1997-09-02", "time": "09:00", "count": "3", "day": ["", "tuesday", "thursday"]}"#,
            rruleset: Some("DTSTART:19970902T090000Z\nRRULE:FREQ=WEEKLY;COUNT=3;BYDAY=TU,TH"),
            expected: &[
                "1997-09-02T09:00:00+00:00",
                "1997-09-04T09:00:00+00:00",
                "1997-09-09T09:00:00+00:00",
            ],
            limit: 10,
        },
        RuleCase {
            name: "monthly_last_friday",
            descriptor: r#"{"rule": "monthly", "date": "2024-01-01", "time": "18:00", "count": 3, "day_of_week": {"friday": ["", "-1"]}}"#,
            rruleset: Some("DTSTART:20240101T180000Z\nRRULE:FREQ=MONTHLY;COUNT=3;BYDAY=-1FR"),
            expected: &[
                "2024-01-26T18:00:00+00:00",
                "2024-02-23T18:00:00+00:00",
                "2024-03-29T18:00:00+00:00",
            ],
            limit: 10,
        },
        RuleCase {
            name: "monthly_first_and_third_monday_every_other_month",
            descriptor: r#"{"rule": "monthly", "date": "2024-01-01", "time": "07:15", "interval": 2, "count": 4, "day_of_week": {"monday": ["1", "3"]}}"#,
            rruleset: Some(
                "DTSTART:20240101T071500Z\nRRULE:FREQ=MONTHLY;INTERVAL=2;COUNT=4;BYDAY=1MO,3MO",
            ),
            expected: &[
                "2024-01-01T07:15:00+00:00",
                "2024-01-15T07:15:00+00:00",
                "2024-03-04T07:15:00+00:00",
                "2024-03-18T07:15:00+00:00",
            ],
            limit: 10,
        },
        RuleCase {
            name: "monthly_fifth_friday_skips_short_months",
            descriptor: r#"{"rule": "monthly", "date": "2024-01-01", "time": "12:00", "count": 3, "day_of_week": {"friday": [5]}}"#,
            rruleset: Some("DTSTART:20240101T120000Z\nRRULE:FREQ=MONTHLY;COUNT=3;BYDAY=5FR"),
            expected: &[
                "2024-03-29T12:00:00+00:00",
                "2024-05-31T12:00:00+00:00",
                "2024-08-30T12:00:00+00:00",
            ],
            limit: 10,
        },
        RuleCase {
            name: "yearly_second_tuesday_of_march",
            descriptor: r#"{"rule": "yearly", "date": "2023-06-01", "time": "10:00", "count": 3, "day_of_week": {"tuesday": [2]}, "month_of_year": 3}"#,
            rruleset: Some(
                "DTSTART:20240101T100000Z\nRRULE:FREQ=YEARLY;COUNT=3;BYMONTH=3;BYDAY=2TU",
            ),
            expected: &[
                "2024-03-12T10:00:00+00:00",
                "2025-03-11T10:00:00+00:00",
                "2026-03-10T10:00:00+00:00",
            ],
            limit: 10,
        },
        RuleCase {
            name: "yearly_last_friday_of_every_month",
            descriptor: r#"{"rule": "yearly", "date": "2023-01-01", "time": "09:00", "count": 4, "day_of_week": {"friday": ["-1"]}}"#,
            rruleset: Some(
                "DTSTART:20240101T090000Z\nRRULE:FREQ=YEARLY;COUNT=4;BYMONTH=1,2,3,4,5,6,7,8,9,10,11,12;BYDAY=-1FR",
            ),
            expected: &[
                "2024-01-26T09:00:00+00:00",
                "2024-02-23T09:00:00+00:00",
                "2024-03-29T09:00:00+00:00",
                "2024-04-26T09:00:00+00:00",
            ],
            limit: 10,
        },
        RuleCase {
            name: "until_cuts_count_short",
            descriptor: r#"{"rule": "daily", "date": "2024-01-01", "time": "09:00", "count": 10, "until": "2024-01-03"}"#,
            rruleset: Some("DTSTART:20240101T090000Z\nRRULE:FREQ=DAILY;COUNT=10;UNTIL=20240103T235959Z"),
            expected: &[
                "2024-01-01T09:00:00+00:00",
                "2024-01-02T09:00:00+00:00",
                "2024-01-03T09:00:00+00:00",
            ],
            limit: 20,
        },
        RuleCase {
            name: "count_ends_before_until",
            descriptor: r#"{"until": "2024-03-31", "rule": "weekly", "date": "2024-01-01", "time": "09:00", "count": 2, "day": ["friday"]}"#,
            rruleset: Some(
                "DTSTART:20240101T090000Z\nRRULE:FREQ=WEEKLY;COUNT=2;UNTIL=20240331T235959Z;BYDAY=FR",
            ),
            expected: &["2024-01-05T09:00:00+00:00", "2024-01-12T09:00:00+00:00"],
            limit: 20,
        },
        RuleCase {
            name: "monthly_from_the_31st_visits_every_month",
            descriptor: r#"{"rule": "monthly", "date": "2024-01-31", "time": "09:00", "count": 4, "day_of_week": {"monday": [1]}}"#,
            rruleset: Some("DTSTART:20240131T090000Z\nRRULE:FREQ=MONTHLY;COUNT=4;BYDAY=1MO"),
            expected: &[
                "2024-02-05T09:00:00+00:00",
                "2024-03-04T09:00:00+00:00",
                "2024-04-01T09:00:00+00:00",
                "2024-05-06T09:00:00+00:00",
            ],
            limit: 10,
        },
        RuleCase {
            name: "weekly_across_dst_in_new_york",
            descriptor: r#"{"rule": "weekly", "date": "2026-03-02", "time": "09:00 America/New_York", "count": 3, "day": ["monday"]}"#,
            rruleset: Some(
                "DTSTART;TZID=America/New_York:20260302T090000\nRRULE:FREQ=WEEKLY;COUNT=3;BYDAY=MO",
            ),
            expected: &[
                "2026-03-02T09:00:00-05:00",
                "2026-03-09T09:00:00-04:00",
                "2026-03-16T09:00:00-04:00",
            ],
            limit: 10,
        },
        RuleCase {
            name: "singular_ignores_count",
            descriptor: r#"{"rule": "singular", "date": "2024-05-01", "time": "14:30", "count": 5}"#,
            rruleset: None,
            expected: &["2024-05-01T14:30:00+00:00"],
            limit: 10,
        },
    ]
}

/// ## Summary
/// Compiles the case's descriptor at a fixed "now" and checks its
/// occurrences, its own `rrule` export and the reference rule against
/// `expected`.
pub fn assert_case(case: &RuleCase) {
    let descriptor: Descriptor = serde_json::from_str(case.descriptor)
        .unwrap_or_else(|err| panic!("Failed to parse descriptor for {}: {}", case.name, err));
    let now = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid fixed now");
    let context = CompileContext::default().at(now);
    let rule = Rule::from_descriptor(descriptor, &context)
        .unwrap_or_else(|err| panic!("Failed to compile {}: {}", case.name, err));

    let expected: Vec<i64> = case
        .expected
        .iter()
        .map(|value| parse_rfc3339(value).timestamp())
        .collect();

    let generated: Vec<i64> = rule
        .first(usize::from(case.limit))
        .iter()
        .map(DateTime::timestamp)
        .collect();
    assert_eq!(generated, expected, "Case {} generated wrong occurrences", case.name);

    let exported: Vec<i64> = rule
        .to_rrule_set()
        .unwrap_or_else(|err| panic!("Failed to export {}: {}", case.name, err))
        .all(case.limit)
        .dates
        .iter()
        .map(DateTime::timestamp)
        .collect();
    assert_eq!(exported, expected, "Case {} export did not match", case.name);

    if let Some(rruleset) = case.rruleset {
        let reference: RRuleSet = rruleset
            .parse()
            .unwrap_or_else(|err| panic!("Failed to parse {}: {}", case.name, err));
        let reference: Vec<i64> = reference
            .all(case.limit)
            .dates
            .iter()
            .map(DateTime::timestamp)
            .collect();
        assert_eq!(reference, expected, "Case {} reference rule disagrees", case.name);
    }
}

fn parse_rfc3339(value: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(value)
        .unwrap_or_else(|err| panic!("Failed to parse rfc3339 value {value}: {err}"))
}
