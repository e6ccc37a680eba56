use sea_orm::{
    Order,
    sea_query::{Alias, Expr, SimpleExpr},
};
use serde::Serialize;

use super::conditions::FieldPath;
use crate::models::{SortDirection, SortSpec};

const SORT_DELIMITER: char = ':';

/// Parse `field:direction` from the `order` parameter.
///
/// The direction defaults to `desc` when missing or unrecognized. A blank
/// field yields no sort at all.
#[must_use]
pub fn parse_order(raw: &str) -> Option<SortSpec> {
    let (field, direction) = match raw.split_once(SORT_DELIMITER) {
        Some((field, direction)) => (field.trim(), Some(direction)),
        None => (raw.trim(), None),
    };

    if field.is_empty() {
        tracing::debug!(order = raw, "Ignoring sort without a field");
        return None;
    }

    Some(SortSpec {
        field: field.to_string(),
        direction: SortDirection::parse(direction),
    })
}

/// Sort instruction handed to the executor.
///
/// JSON-path sorts need raw SQL; plain columns stay structured so the executor
/// can quote and validate the column itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SortFragment {
    /// `accessor` is already-built SQL such as `meta ->> 'rank'`
    Raw {
        accessor: String,
        direction: SortDirection,
    },
    Column {
        field: String,
        direction: SortDirection,
    },
}

impl SortFragment {
    #[must_use]
    pub const fn direction(&self) -> SortDirection {
        match self {
            Self::Raw { direction, .. } | Self::Column { direction, .. } => *direction,
        }
    }

    #[must_use]
    pub const fn is_raw(&self) -> bool {
        matches!(self, Self::Raw { .. })
    }

    /// The raw `ORDER BY` fragment, e.g. `meta ->> 'rank' DESC`.
    /// `None` for structured column sorts.
    #[must_use]
    pub fn sql(&self) -> Option<String> {
        match self {
            Self::Raw {
                accessor,
                direction,
            } => Some(format!("{accessor} {}", direction.as_sql())),
            Self::Column { .. } => None,
        }
    }

    /// Expression and order for `QuerySelect::order_by` style APIs
    #[must_use]
    pub fn to_order_by(&self) -> (SimpleExpr, Order) {
        match self {
            Self::Raw {
                accessor,
                direction,
            } => (Expr::cust(accessor.clone()), (*direction).into()),
            Self::Column { field, direction } => (
                Expr::col(Alias::new(field.as_str())).into(),
                (*direction).into(),
            ),
        }
    }
}

/// Build the sort instruction for one sort spec.
#[must_use]
pub fn build_sort_condition(sort: &SortSpec) -> SortFragment {
    let path = FieldPath::parse(&sort.field);
    if path.is_json() {
        SortFragment::Raw {
            accessor: path.accessor(),
            direction: sort.direction,
        }
    } else {
        SortFragment::Column {
            field: sort.field.clone(),
            direction: sort.direction,
        }
    }
}
