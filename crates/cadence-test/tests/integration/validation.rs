use cadence_test::prelude::*;
use serde_json::json;

use super::helpers::{descriptor, rejection};

#[test_log::test]
fn reports_every_problem_at_once() {
    let errors = rejection(descriptor(json!({
        "rule": "weekly",
        "day": ["", ""]
    })));

    assert!(errors.contains(&ValidationError::MissingTime));
    assert!(errors.contains(&ValidationError::EmptyDayList));
    assert_eq!(errors.len(), 2);
}

#[test_log::test]
fn missing_rule_and_time() {
    let errors = rejection(descriptor(json!({})));

    assert_eq!(
        errors.errors(),
        &[ValidationError::MissingRule, ValidationError::MissingTime]
    );
}

#[test_log::test]
fn singular_needs_a_date() {
    let errors = rejection(descriptor(json!({"rule": "singular", "time": "10:00"})));

    assert_eq!(errors.errors(), &[ValidationError::MissingDate]);
}

#[test_log::test]
fn monthly_and_yearly_need_positions() {
    let monthly = rejection(descriptor(json!({
        "rule": "monthly",
        "time": "10:00",
        "day_of_week": {"monday": [""], "friday": []}
    })));
    assert_eq!(monthly.errors(), &[ValidationError::EmptyDayOfWeek]);

    let yearly = rejection(descriptor(json!({
        "rule": "yearly",
        "time": "10:00",
        "month_of_year": 3
    })));
    assert_eq!(yearly.errors(), &[ValidationError::EmptyDayOfWeek]);
}

#[test_log::test]
fn month_is_not_an_alias_for_monthly() {
    let errors = rejection(descriptor(json!({
        "rule": "month",
        "time": "10:00",
        "day_of_week": {"monday": [1]}
    })));

    assert_eq!(
        errors.errors(),
        &[ValidationError::UnknownRule("month".to_string())]
    );
}

#[test_log::test]
fn error_display_joins_messages() {
    let errors = rejection(descriptor(json!({"rule": "weekly"})));

    let message = errors.to_string();
    assert!(message.contains("; "), "{message}");
}

#[test_log::test]
fn accepts_form_encoded_values() {
    let valid = validate(descriptor(json!({
        "id": 12,
        "rule": "Monthly",
        "time": "6:45 PM",
        "interval": "2",
        "count": "",
        "until": "",
        "day": [""],
        "day_of_week": {"thursday": ["", "2", "-1"], "sunday": null},
        "month_of_year": [""]
    })))
    .expect("form-shaped monthly descriptor is valid");

    assert_eq!(valid.id(), Some(12));
    assert_eq!(valid.kind(), RuleKind::Monthly);
    assert_eq!(valid.interval(), 2);
    assert_eq!(valid.count(), None);
    assert_eq!(valid.until(), None);
    assert_eq!(
        valid.day_of_week().positions(chrono::Weekday::Thu).len(),
        2
    );
}
