use serde::Serialize;
use utoipa::ToSchema;

use crate::errors::QueryError;
use crate::filtering::{
    ConditionFragment, FilterOperator, FilterValue, SortFragment, build_condition,
    build_sort_condition,
};

/// One decoded query-string value.
///
/// `key[]=a&key[]=b` decodes to `Many`, a plain `key=a` to `Single`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Single(String),
    Many(Vec<String>),
}

impl RawValue {
    /// The value a scalar consumer should use: the string itself, or the last array element
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            Self::Many(values) => values.last().map(String::as_str),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let values: &[String] = match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        };
        values.iter().map(String::as_str)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for RawValue {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<Vec<&str>> for RawValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(str::to_string).collect())
    }
}

/// Decoded query parameters, in the order they were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams {
    entries: Vec<(String, RawValue)>,
}

impl RawParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a raw query string (`a=1&tags[]=x&tags[]=y`).
    ///
    /// A repeated plain key keeps its last value; `key[]` entries accumulate.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::new();
        for (key, value) in url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            if let Some(array_key) = key.strip_suffix("[]") {
                params.append(array_key, value.into_owned());
            } else {
                params.insert(key.into_owned(), value.into_owned());
            }
        }
        params
    }

    /// Set `key`, replacing an existing value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Add one element to the array under `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => {
                let mut values = match std::mem::replace(slot, RawValue::Many(Vec::new())) {
                    RawValue::Single(previous) => vec![previous],
                    RawValue::Many(values) => values,
                };
                values.push(value);
                *slot = RawValue::Many(values);
            }
            None => self.entries.push((key, RawValue::Many(vec![value]))),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Shorthand for the scalar view of `key`
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(RawValue::last)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for RawParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// One `field operator value` predicate.
///
/// Construct through [`FilterSpec::new`], which enforces the value shape of
/// list-typed operators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSpec {
    field: String,
    operator: FilterOperator,
    value: FilterValue,
}

impl FilterSpec {
    /// Build a filter, checking that `IN`/`NOT IN`/`BETWEEN` carry a list and
    /// that `BETWEEN` has two bounds. Extra `BETWEEN` elements are dropped.
    ///
    /// # Errors
    ///
    /// - [`QueryError::EmptyField`] when `field` is blank
    /// - [`QueryError::ListRequired`] when a list operator gets a scalar
    /// - [`QueryError::BetweenArity`] when `BETWEEN` gets fewer than two values
    pub fn new(
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<FilterValue>,
    ) -> Result<Self, QueryError> {
        let field = field.into();
        if field.trim().is_empty() {
            return Err(QueryError::EmptyField);
        }

        let mut value = value.into();
        if operator.is_list() {
            let FilterValue::List(items) = &mut value else {
                return Err(QueryError::ListRequired { operator });
            };
            if operator == FilterOperator::Between {
                if items.len() < 2 {
                    return Err(QueryError::BetweenArity { found: items.len() });
                }
                items.truncate(2);
            }
        }

        Ok(Self {
            field,
            operator,
            value,
        })
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub const fn operator(&self) -> FilterOperator {
        self.operator
    }

    #[must_use]
    pub const fn value(&self) -> &FilterValue {
        &self.value
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// `asc`/`desc` in any case; anything else is `Desc`
    #[must_use]
    pub fn parse(token: Option<&str>) -> Self {
        match token.map(str::trim) {
            Some(t) if t.eq_ignore_ascii_case("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }

    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl From<SortDirection> for sea_orm::Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Self::Asc,
            SortDirection::Desc => Self::Desc,
        }
    }
}

/// Single-key sort order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

/// Aggregate function applied to a selected field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl Aggregation {
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "count" => Some(Self::Count),
            "sum" => Some(Self::Sum),
            "avg" => Some(Self::Avg),
            "min" => Some(Self::Min),
            "max" => Some(Self::Max),
            _ => None,
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Sum => "sum",
            Self::Avg => "avg",
            Self::Min => "min",
            Self::Max => "max",
        }
    }

    #[must_use]
    pub const fn function(self) -> &'static str {
        match self {
            Self::Count => "COUNT",
            Self::Sum => "SUM",
            Self::Avg => "AVG",
            Self::Min => "MIN",
            Self::Max => "MAX",
        }
    }
}

/// Date truncation period for grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DatePeriod {
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl DatePeriod {
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "hour" => Some(Self::Hour),
            "day" => Some(Self::Day),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "quarter" => Some(Self::Quarter),
            "year" => Some(Self::Year),
            _ => None,
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }
}

/// A selected field, optionally aggregated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectSpec {
    pub field: String,
    pub aggregation: Option<Aggregation>,
}

/// A group-by field, optionally truncated to a date period
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSpec {
    pub field: String,
    pub period: Option<DatePeriod>,
}

/// Free-text search input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Keywords {
    Single(String),
    Many(Vec<String>),
}

impl Keywords {
    #[must_use]
    pub fn terms(&self) -> Vec<&str> {
        match self {
            Self::Single(term) => vec![term.as_str()],
            Self::Many(terms) => terms.iter().map(String::as_str).collect(),
        }
    }

    /// All terms joined by spaces, for engines that take one search string
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.terms().join(" ")
    }
}

/// Everything extracted from one request's query parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDescriptor {
    /// AND-combined, in input order
    pub filters: Vec<FilterSpec>,
    pub sort: Option<SortSpec>,
    pub includes: Vec<String>,
    pub select: Vec<SelectSpec>,
    pub group_by: Vec<GroupSpec>,
    pub keywords: Option<Keywords>,
    /// 1-based
    pub page: u64,
    pub per_page: u64,
}

impl RequestDescriptor {
    #[must_use]
    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    #[must_use]
    pub fn has_keywords(&self) -> bool {
        self.keywords.is_some()
    }

    /// One fragment per filter, in filter order
    #[must_use]
    pub fn conditions(&self) -> Vec<ConditionFragment> {
        self.filters.iter().map(build_condition).collect()
    }

    /// All filters as a single AND-joined fragment, `None` without filters
    #[must_use]
    pub fn where_fragment(&self) -> Option<ConditionFragment> {
        ConditionFragment::all(self.conditions())
    }

    #[must_use]
    pub fn sort_fragment(&self) -> Option<SortFragment> {
        self.sort.as_ref().map(build_sort_condition)
    }
}
