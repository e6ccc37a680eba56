use sea_orm::sea_query::{Expr, SimpleExpr};
use serde::Serialize;

use super::{FilterOperator, FilterValue};
use crate::models::{FilterSpec, GroupSpec, SelectSpec};

const JSON_DELIMITER: char = '.';

/// How a field reference is read: a plain column, or a key inside a JSON column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath<'a> {
    Column(&'a str),
    Json { column: &'a str, key: &'a str },
}

impl<'a> FieldPath<'a> {
    /// `meta.score` is a JSON path; `score` and `a.b.c` are plain columns.
    #[must_use]
    pub fn parse(field: &'a str) -> Self {
        let mut parts = field.split(JSON_DELIMITER);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(column), Some(key), None) if !column.is_empty() && !key.is_empty() => {
                Self::Json { column, key }
            }
            _ => Self::Column(field),
        }
    }

    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self, Self::Json { .. })
    }

    /// The column that must exist on the target table
    #[must_use]
    pub const fn column(&self) -> &'a str {
        match self {
            Self::Column(column) | Self::Json { column, .. } => column,
        }
    }

    /// SQL that reads the field, e.g. `meta ->> 'score'`
    #[must_use]
    pub fn accessor(&self) -> String {
        match self {
            Self::Column(column) => (*column).to_string(),
            Self::Json { column, key } => {
                format!("{column} ->> '{}'", key.replace('\'', "''"))
            }
        }
    }

    /// Identifier-friendly name, `meta.score` becomes `meta_score`
    #[must_use]
    pub fn alias(&self) -> String {
        match self {
            Self::Column(column) => column.replace(JSON_DELIMITER, "_"),
            Self::Json { column, key } => format!("{column}_{key}"),
        }
    }
}

/// One typed comparison, kept alongside the template so the expression can be
/// rebuilt with whatever placeholder syntax the backend uses.
#[derive(Debug, Clone, PartialEq)]
struct Predicate {
    accessor: String,
    operator: FilterOperator,
    values: Vec<FilterValue>,
}

impl Predicate {
    fn into_expr(self) -> SimpleExpr {
        let lhs = Expr::expr(Expr::cust(self.accessor));
        let mut values = self.values.into_iter();

        match self.operator {
            FilterOperator::In | FilterOperator::NotIn => {
                let items = match values.next() {
                    Some(FilterValue::List(items)) => items,
                    Some(scalar) => vec![scalar],
                    None => Vec::new(),
                };
                let items: Vec<sea_orm::Value> = items.into_iter().map(Into::into).collect();
                match (self.operator, items.is_empty()) {
                    (FilterOperator::In, true) => Expr::cust("1 = 0"),
                    (_, true) => Expr::cust("1 = 1"),
                    (FilterOperator::In, false) => lhs.is_in(items),
                    (_, false) => lhs.is_not_in(items),
                }
            }
            FilterOperator::Between => match (values.next(), values.next()) {
                (Some(low), Some(high)) => {
                    lhs.between(sea_orm::Value::from(low), sea_orm::Value::from(high))
                }
                _ => Expr::cust("1 = 0"),
            },
            operator => {
                let value = sea_orm::Value::from(values.next().unwrap_or(FilterValue::Null));
                match operator {
                    FilterOperator::Neq => lhs.ne(value),
                    FilterOperator::Gt => lhs.gt(value),
                    FilterOperator::Gte => lhs.gte(value),
                    FilterOperator::Lt => lhs.lt(value),
                    FilterOperator::Lte => lhs.lte(value),
                    _ => lhs.eq(value),
                }
            }
        }
    }
}

/// A parameterized condition: `?` placeholders in `template`, matched in order
/// by `values`.
///
/// `template` and `values` describe the condition for logging and API output.
/// [`ConditionFragment::into_expr`] builds the executable expression from the
/// typed comparisons the fragment was made of, so it renders correctly for
/// every sea-query backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionFragment {
    pub template: String,
    pub values: Vec<FilterValue>,
    #[serde(skip)]
    predicates: Vec<Predicate>,
}

impl ConditionFragment {
    /// AND-join fragments: templates joined by `" AND "`, values concatenated.
    /// Returns `None` when there is nothing to join.
    pub fn all<I>(fragments: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut templates = Vec::new();
        let mut values = Vec::new();
        let mut predicates = Vec::new();
        for fragment in fragments {
            templates.push(fragment.template);
            values.extend(fragment.values);
            predicates.extend(fragment.predicates);
        }
        if templates.is_empty() {
            return None;
        }
        Some(Self {
            template: templates.join(" AND "),
            values,
            predicates,
        })
    }

    /// Convert into a sea-query expression with bound parameters.
    ///
    /// Each comparison becomes a typed sea-query expression over the raw
    /// accessor, so placeholders follow the backend (`?` for `SQLite` and
    /// `MySQL`, `$N` for `PostgreSQL`). A list binds one parameter per element.
    /// An empty `IN` renders as `1 = 0`, an empty `NOT IN` as `1 = 1`.
    #[must_use]
    pub fn into_expr(self) -> SimpleExpr {
        let mut exprs = self.predicates.into_iter().map(Predicate::into_expr);
        let first = exprs.next().unwrap_or_else(|| Expr::cust("1 = 1"));
        exprs.fold(first, SimpleExpr::and)
    }
}

/// Build the parameterized condition for one filter.
///
/// ```text
/// status = (?)                  ["active"]
/// meta ->> 'vip' = (?)          ["true"]
/// role IN (?)                   [["admin", "editor"]]
/// score BETWEEN ? AND ?         ["10", "20"]
/// ```
#[must_use]
pub fn build_condition(filter: &FilterSpec) -> ConditionFragment {
    let path = FieldPath::parse(filter.field());
    let accessor = path.accessor();
    let operator = filter.operator();

    let value = if path.is_json() {
        filter.value().clone().into_json_text()
    } else {
        filter.value().clone()
    };

    let (template, values) = if operator == FilterOperator::Between {
        let bounds: Vec<FilterValue> = match value {
            FilterValue::List(items) => items.into_iter().take(2).collect(),
            scalar => vec![scalar],
        };
        (format!("{accessor} BETWEEN ? AND ?"), bounds)
    } else {
        (format!("{accessor} {} (?)", operator.symbol()), vec![value])
    };

    ConditionFragment {
        template,
        predicates: vec![Predicate {
            accessor,
            operator,
            values: values.clone(),
        }],
        values,
    }
}

impl SelectSpec {
    /// Select-list entry, e.g. `COUNT(id) AS id_count` or `meta ->> 'tier' AS meta_tier`
    #[must_use]
    pub fn to_sql(&self) -> String {
        let path = FieldPath::parse(&self.field);
        match self.aggregation {
            Some(aggregation) => format!(
                "{}({}) AS {}_{}",
                aggregation.function(),
                path.accessor(),
                path.alias(),
                aggregation.key()
            ),
            None if path.is_json() => format!("{} AS {}", path.accessor(), path.alias()),
            None => path.accessor(),
        }
    }
}

impl GroupSpec {
    /// Group-by expression, e.g. `date_trunc('month', created_at)`
    #[must_use]
    pub fn to_sql(&self) -> String {
        let path = FieldPath::parse(&self.field);
        match (self.period, path.is_json()) {
            (Some(period), false) => format!("date_trunc('{}', {})", period.key(), path.accessor()),
            (Some(period), true) => format!(
                "date_trunc('{}', ({})::timestamptz)",
                period.key(),
                path.accessor()
            ),
            (None, _) => path.accessor(),
        }
    }
}
