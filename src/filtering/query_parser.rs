//! Query parameters to [`RequestDescriptor`].
//!
//! Two filter forms are accepted. When the batch key (`filters` by default)
//! is present it wins:
//!
//! ```text
//! ?filters=status:eq:active,score:btw:[10,20],created_at:gte:7_days_ago
//! ```
//!
//! Otherwise every non-reserved key is a filter, optionally carrying its
//! operator after a colon:
//!
//! ```text
//! ?status=active&age:gte=18&role:in=[admin,editor]&page=2
//! ```

use chrono::{DateTime, Utc};

use super::search::{FullTextSearch, SearchStrategy, search_plan};
use super::sort::parse_order;
use super::values::{split_list_value, transform_value};
use super::{FilterOperator, FilterValue};
use crate::config::SearchConfig;
use crate::models::{
    Aggregation, DatePeriod, FilterSpec, GroupSpec, Keywords, RawParams, RawValue,
    RequestDescriptor, SelectSpec,
};

const DELIMITER: char = ':';
const PAGE_KEY: &str = "page";
const PER_PAGE_KEY: &str = "per_page";
const ORDER_KEY: &str = "order";
const INCLUDE_KEY: &str = "include";
const SELECT_KEY: &str = "select";
const GROUP_BY_KEY: &str = "group_by";
const KEYWORDS_KEY: &str = "keywords";
const QUERY_KEY: &str = "query";

/// Split on commas that are not inside `[...]`.
///
/// `a:btw:[1,2],b:eq:3` gives `["a:btw:[1,2]", "b:eq:3"]`. Unbalanced closing
/// brackets are ignored. Tokens are trimmed and empty tokens skipped.
#[must_use]
pub fn split_top_level(input: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, ch) in input.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                tokens.push(&input[start..i]);
                start = i + ch.len_utf8();
            }
            _ => {}
        }
    }
    tokens.push(&input[start..]);

    tokens
        .into_iter()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Build a filter from its parts, dropping it (with a debug log) when the
/// value does not fit the operator.
fn build_filter(
    field: &str,
    operator: FilterOperator,
    raw_values: &[&str],
    now: DateTime<Utc>,
) -> Option<FilterSpec> {
    let value = if operator.is_list() {
        FilterValue::List(
            raw_values
                .iter()
                .flat_map(|raw| split_list_value(raw))
                .map(|element| transform_value(element, now))
                .collect(),
        )
    } else {
        transform_value(raw_values.last().copied().unwrap_or_default(), now)
    };

    match FilterSpec::new(field.trim(), operator, value) {
        Ok(filter) => Some(filter),
        Err(err) => {
            tracing::debug!(field, operator = operator.key(), error = %err, "Dropping malformed filter");
            None
        }
    }
}

fn resolve_operator(field: &str, key: Option<&str>) -> FilterOperator {
    let operator = FilterOperator::from_key_or_eq(key);
    if let Some(key) = key
        && FilterOperator::from_key(key).is_none()
    {
        tracing::debug!(field, operator = key, "Unknown filter operator, using eq");
    }
    operator
}

/// Parse one batch token `field:op:value`.
///
/// Only the first two colons split, so `at:gte:2024-01-01T10:00` keeps its
/// time. `field:value` is an equality filter, and `field:op` with a known
/// operator gets an empty value.
#[must_use]
pub fn parse_filter_token(token: &str, now: DateTime<Utc>) -> Option<FilterSpec> {
    let mut parts = token.splitn(3, DELIMITER);
    let field = parts.next().unwrap_or_default();

    let (operator, value) = match (parts.next(), parts.next()) {
        (Some(key), Some(value)) => (resolve_operator(field, Some(key)), value),
        (Some(second), None) => match FilterOperator::from_key(second) {
            Some(operator) => (operator, ""),
            None => (FilterOperator::Eq, second),
        },
        _ => {
            tracing::debug!(token, "Dropping filter token without an operator or value");
            return None;
        }
    };

    build_filter(field, operator, &[value], now)
}

/// Comma-split every element of a raw value into trimmed, non-empty tokens
fn split_tokens(raw: Option<&RawValue>) -> Vec<&str> {
    raw.map(|value| {
        value
            .iter()
            .flat_map(|element| element.split(','))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// Split `field:qualifier`; the qualifier is dropped when `lookup` rejects it
fn split_qualified<T>(token: &str, lookup: impl Fn(&str) -> Option<T>) -> Option<(String, Option<T>)> {
    let (field, qualifier) = match token.split_once(DELIMITER) {
        Some((field, qualifier)) => (field.trim(), Some(qualifier.trim())),
        None => (token, None),
    };
    if field.is_empty() {
        return None;
    }

    let parsed = qualifier.and_then(|q| {
        let parsed = lookup(q);
        if parsed.is_none() {
            tracing::debug!(field, qualifier = q, "Ignoring unknown qualifier");
        }
        parsed
    });
    Some((field.to_string(), parsed))
}

/// Positive integer or `default`; zero clamps to 1
fn parse_positive(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(default)
        .max(1)
}

/// Compiles raw query parameters into a [`RequestDescriptor`].
///
/// Holds only configuration, so one parser can be shared across requests.
#[derive(Debug, Clone, Default)]
pub struct QueryParser {
    config: SearchConfig,
}

impl QueryParser {
    #[must_use]
    pub const fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Parse using the current time for dynamic values.
    ///
    /// The clock is read once, so every dynamic value in the request agrees.
    #[must_use]
    pub fn parse(&self, params: &RawParams) -> RequestDescriptor {
        self.parse_at(params, Utc::now())
    }

    /// Parse with dynamic values resolved against `now`.
    #[must_use]
    pub fn parse_at(&self, params: &RawParams, now: DateTime<Utc>) -> RequestDescriptor {
        RequestDescriptor {
            filters: self.parse_filters(params, now),
            sort: params.get_str(ORDER_KEY).and_then(parse_order),
            includes: split_tokens(params.get(INCLUDE_KEY))
                .into_iter()
                .map(str::to_string)
                .collect(),
            select: split_tokens(params.get(SELECT_KEY))
                .into_iter()
                .filter_map(|token| split_qualified(token, Aggregation::from_key))
                .map(|(field, aggregation)| SelectSpec { field, aggregation })
                .collect(),
            group_by: split_tokens(params.get(GROUP_BY_KEY))
                .into_iter()
                .filter_map(|token| split_qualified(token, DatePeriod::from_key))
                .map(|(field, period)| GroupSpec { field, period })
                .collect(),
            keywords: self.parse_keywords(params),
            page: parse_positive(params.get_str(PAGE_KEY), 1),
            per_page: parse_positive(params.get_str(PER_PAGE_KEY), self.config.default_per_page),
        }
    }

    /// Filters in input order, from the batch key if present, otherwise per key.
    #[must_use]
    pub fn parse_filters(&self, params: &RawParams, now: DateTime<Utc>) -> Vec<FilterSpec> {
        if let Some(batch) = params.get(&self.config.filters_key) {
            return batch
                .iter()
                .flat_map(split_top_level)
                .filter_map(|token| parse_filter_token(token, now))
                .collect();
        }

        params
            .iter()
            .filter_map(|(key, raw)| {
                let (field, operator_key) = match key.split_once(DELIMITER) {
                    Some((field, operator_key)) => (field, Some(operator_key)),
                    None => (key, None),
                };
                if self.config.is_reserved(field) {
                    return None;
                }
                let operator = resolve_operator(field, operator_key);
                let raw_values: Vec<&str> = raw.iter().collect();
                build_filter(field, operator, &raw_values, now)
            })
            .collect()
    }

    /// Keywords and the strategy to run them with, preferring the configured
    /// [`SearchConfig::search_strategy`].
    ///
    /// `None` when the request has no keywords, the configured strategy is
    /// [`SearchStrategy::None`], or the target cannot search at all.
    #[must_use]
    pub fn search_plan<'a, T>(
        &self,
        request: &'a RequestDescriptor,
        target: &T,
    ) -> Option<(SearchStrategy, &'a Keywords)>
    where
        T: FullTextSearch + ?Sized,
    {
        if self.config.search_strategy == SearchStrategy::None {
            return None;
        }
        search_plan(request, target, self.config.search_strategy)
    }

    fn parse_keywords(&self, params: &RawParams) -> Option<Keywords> {
        let raw = params
            .get_str(KEYWORDS_KEY)
            .or_else(|| params.get_str(QUERY_KEY))?;
        if raw.trim().is_empty() {
            return None;
        }

        if !raw.contains(self.config.keyword_delimiter) {
            return Some(Keywords::Single(raw.to_string()));
        }

        let terms: Vec<String> = raw
            .split(self.config.keyword_delimiter)
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_string)
            .collect();
        if terms.is_empty() {
            None
        } else {
            Some(Keywords::Many(terms))
        }
    }
}
