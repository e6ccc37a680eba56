mod common;

use chrono::{Datelike, TimeDelta, TimeZone, Utc};
use common::{params, parse};
use searchcrate::{FilterValue, QueryParser};

#[test]
fn test_relative_days_against_fixed_clock() {
    let request = parse(&[
        ("created_at:gte", "7_days_ago"),
        ("due_at:lte", "30_days"),
        ("touched_at:lt", "current_time"),
    ]);

    assert_eq!(
        request.filters[0].value(),
        &FilterValue::DateTime(Utc.with_ymd_and_hms(2024, 6, 8, 12, 0, 0).unwrap())
    );
    assert_eq!(
        request.filters[1].value(),
        &FilterValue::DateTime(Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap())
    );
    assert_eq!(
        request.filters[2].value(),
        &FilterValue::DateTime(Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap())
    );
}

#[test]
fn test_year_tokens_are_integers() {
    let request = parse(&[("year", "current_year"), ("renewal", "next_year")]);
    assert_eq!(request.filters[0].value(), &FilterValue::Integer(2024));
    assert_eq!(request.filters[1].value(), &FilterValue::Integer(2025));
}

#[test]
fn test_dynamic_tokens_inside_lists() {
    let request = parse(&[("filters", "created_at:btw:[90_days_ago,1_day_ago]")]);
    assert_eq!(
        request.filters[0].value(),
        &FilterValue::from(vec![
            Utc.with_ymd_and_hms(2024, 3, 17, 12, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 6, 14, 12, 0, 0).unwrap(),
        ])
    );
}

#[test]
fn test_unknown_tokens_stay_text() {
    let request = parse(&[("note", "8_days_ago"), ("other", "Current_Year")]);
    assert_eq!(request.filters[0].value(), &FilterValue::from("8_days_ago"));
    assert_eq!(request.filters[1].value(), &FilterValue::from("Current_Year"));
}

#[test]
fn test_real_clock_resolution() {
    let raw = params(&[("created_at:gte", "7_days_ago"), ("year", "current_year")]);

    let before = Utc::now();
    let request = QueryParser::default().parse(&raw);
    let after = Utc::now();

    let FilterValue::DateTime(resolved) = request.filters[0].value() else {
        panic!("expected a timestamp, got {:?}", request.filters[0].value());
    };
    assert!(*resolved >= before - TimeDelta::days(7));
    assert!(*resolved <= after - TimeDelta::days(7));

    let FilterValue::Integer(year) = request.filters[1].value() else {
        panic!("expected a year, got {:?}", request.filters[1].value());
    };
    assert!(*year == i64::from(before.year()) || *year == i64::from(after.year()));
}

#[test]
fn test_parses_are_evaluated_per_call() {
    let raw = params(&[("created_at:gte", "current_time")]);
    let parser = QueryParser::default();

    let first = parser.parse(&raw);
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = parser.parse(&raw);

    let (FilterValue::DateTime(a), FilterValue::DateTime(b)) =
        (first.filters[0].value(), second.filters[0].value())
    else {
        panic!("expected timestamps");
    };
    assert!(b > a);
}
