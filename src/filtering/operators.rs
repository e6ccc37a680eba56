//! Comparison operators accepted in filter tokens.

use serde::Serialize;

/// Comparison operators for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FilterOperator {
    /// Equality (=)
    #[serde(rename = "=")]
    Eq,
    /// Not equal (!=)
    #[serde(rename = "!=")]
    Neq,
    /// Greater than (>)
    #[serde(rename = ">")]
    Gt,
    /// Greater than or equal (>=)
    #[serde(rename = ">=")]
    Gte,
    /// Less than (<)
    #[serde(rename = "<")]
    Lt,
    /// Less than or equal (<=)
    #[serde(rename = "<=")]
    Lte,
    /// IN (list of values)
    #[serde(rename = "IN")]
    In,
    /// NOT IN (list of values)
    #[serde(rename = "NOT IN")]
    NotIn,
    /// BETWEEN (two bounds)
    #[serde(rename = "BETWEEN")]
    Between,
}

impl FilterOperator {
    /// Every operator, in the order its key appears in the query language
    pub const ALL: [Self; 9] = [
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
        Self::Eq,
        Self::Neq,
        Self::In,
        Self::NotIn,
        Self::Between,
    ];

    /// Look up an operator from its query key (`gte`, `nin`, `btw`, ...).
    ///
    /// Keys are case-sensitive.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            "eq" => Some(Self::Eq),
            "neq" => Some(Self::Neq),
            "in" => Some(Self::In),
            "nin" => Some(Self::NotIn),
            "btw" => Some(Self::Between),
            _ => None,
        }
    }

    /// Same as [`from_key`](Self::from_key) but falls back to `Eq`
    #[must_use]
    pub fn from_key_or_eq(key: Option<&str>) -> Self {
        key.and_then(Self::from_key).unwrap_or(Self::Eq)
    }

    /// The query key for this operator
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::In => "in",
            Self::NotIn => "nin",
            Self::Between => "btw",
        }
    }

    /// The SQL symbol written into condition templates
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Neq => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Between => "BETWEEN",
        }
    }

    /// Whether the value for this operator is always a list
    #[must_use]
    pub const fn is_list(self) -> bool {
        matches!(self, Self::In | Self::NotIn | Self::Between)
    }
}
