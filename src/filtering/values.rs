//! Filter values and the string-to-value transformation applied to every
//! scalar in a query.
//!
//! Transformation precedence:
//!
//! 1. dynamic tokens (`7_days_ago`, `current_year`, ...) evaluated against `now`
//! 2. `YYYY-MM-DD` dates, as UTC midnight
//! 3. `true`, `false`, `null`
//! 4. anything else stays text

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::Serialize;

/// A value bound into a filter condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Null,
    Bool(bool),
    Integer(i64),
    Text(String),
    DateTime(DateTime<Utc>),
    List(Vec<FilterValue>),
}

impl FilterValue {
    #[must_use]
    pub fn as_list(&self) -> Option<&[FilterValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Replace booleans and null with their JSON text, recursing into lists.
    ///
    /// The `->>` accessor yields text, so `true` has to be compared as `'true'`.
    #[must_use]
    pub fn into_json_text(self) -> Self {
        match self {
            Self::Null => Self::Text(serde_json::Value::Null.to_string()),
            Self::Bool(b) => Self::Text(serde_json::Value::Bool(b).to_string()),
            Self::List(items) => Self::List(items.into_iter().map(Self::into_json_text).collect()),
            other => other,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<FilterValue> for sea_orm::Value {
    fn from(value: FilterValue) -> Self {
        match value {
            FilterValue::Null => Option::<String>::None.into(),
            FilterValue::Bool(b) => b.into(),
            FilterValue::Integer(i) => i.into(),
            FilterValue::Text(s) => s.into(),
            FilterValue::DateTime(dt) => dt.into(),
            // Lists are expanded before binding; a nested list binds as JSON text
            FilterValue::List(items) => serde_json::to_string(&items)
                .unwrap_or_default()
                .into(),
        }
    }
}

/// A reserved token resolved against the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicValue {
    DaysAgo(i64),
    DaysFromNow(i64),
    CurrentYear,
    NextYear,
    CurrentTime,
}

impl DynamicValue {
    /// Look up a token such as `30_days_ago` or `next_year`. Case-sensitive.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        let value = match token {
            "1_day_ago" => Self::DaysAgo(1),
            "7_days_ago" => Self::DaysAgo(7),
            "14_days_ago" => Self::DaysAgo(14),
            "30_days_ago" => Self::DaysAgo(30),
            "60_days_ago" => Self::DaysAgo(60),
            "90_days_ago" => Self::DaysAgo(90),
            "1_day" => Self::DaysFromNow(1),
            "7_days" => Self::DaysFromNow(7),
            "14_days" => Self::DaysFromNow(14),
            "30_days" => Self::DaysFromNow(30),
            "60_days" => Self::DaysFromNow(60),
            "90_days" => Self::DaysFromNow(90),
            "current_year" => Self::CurrentYear,
            "next_year" => Self::NextYear,
            "current_time" => Self::CurrentTime,
            _ => return None,
        };
        Some(value)
    }

    #[must_use]
    pub fn resolve(self, now: DateTime<Utc>) -> FilterValue {
        match self {
            Self::DaysAgo(days) => FilterValue::DateTime(now - TimeDelta::days(days)),
            Self::DaysFromNow(days) => FilterValue::DateTime(now + TimeDelta::days(days)),
            Self::CurrentYear => FilterValue::Integer(i64::from(now.year())),
            Self::NextYear => FilterValue::Integer(i64::from(now.year()) + 1),
            Self::CurrentTime => FilterValue::DateTime(now),
        }
    }
}

/// Matches exactly `DDDD-DD-DD`
fn looks_like_date(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if !looks_like_date(raw) {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// Turn one raw scalar into a [`FilterValue`].
#[must_use]
pub fn transform_value(raw: &str, now: DateTime<Utc>) -> FilterValue {
    if let Some(dynamic) = DynamicValue::from_token(raw) {
        return dynamic.resolve(now);
    }
    if let Some(date) = parse_date(raw) {
        return FilterValue::DateTime(date);
    }
    match raw {
        "true" => FilterValue::Bool(true),
        "false" => FilterValue::Bool(false),
        "null" => FilterValue::Null,
        _ => FilterValue::Text(raw.to_string()),
    }
}

/// Split a list literal such as `[10,20]` or `a, b` into trimmed elements.
///
/// One leading `[` and one trailing `]` are stripped when present. Empty
/// elements (trailing commas, blank input) are skipped.
#[must_use]
pub fn split_list_value(raw: &str) -> Vec<&str> {
    let trimmed = raw.trim();
    let inner = trimmed.strip_prefix('[').unwrap_or(trimmed);
    let inner = inner.strip_suffix(']').unwrap_or(inner);

    inner
        .split(',')
        .map(str::trim)
        .filter(|element| !element.is_empty())
        .collect()
}
