//! # Error Handling
//!
//! Parsing query parameters never fails: malformed tokens are defaulted or
//! dropped. [`QueryError`] covers the strict edges around that lenient core:
//!
//! - constructing a [`FilterSpec`](crate::models::FilterSpec) by hand with a value
//!   that breaks the operator's shape (a scalar for `IN`, one value for `BETWEEN`)
//! - rejecting fields that are not on an executor's allow-list
//!
//! `QueryError` implements [`IntoResponse`] so handlers can return it directly:
//!
//! ```rust,ignore
//! use searchcrate::{FieldAllowList, QueryError, QueryParser, RawParams};
//!
//! async fn list_todos(params: RawParams) -> Result<Json<Vec<Todo>>, QueryError> {
//!     let request = QueryParser::default().parse(&params);
//!     FieldAllowList::new(["title", "completed", "meta"]).check(&request)?;
//!     // ... hand the request to the executor
//! }
//! ```
//!
//! ## Logging
//!
//! Errors are logged through `tracing` when they are turned into a response.
//! Nothing is printed unless the application installs a subscriber.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;

use crate::filtering::FilterOperator;

/// Error raised at the strict edges of query compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// 422 - A list-typed operator (`IN`, `NOT IN`, `BETWEEN`) was given a scalar
    ListRequired {
        /// The operator that needed a list
        operator: FilterOperator,
    },

    /// 422 - `BETWEEN` needs two bounds
    BetweenArity {
        /// Number of elements actually supplied
        found: usize,
    },

    /// 422 - Filter or sort without a field name
    EmptyField,

    /// 400 - Field is not exposed by the target resource
    UnknownField {
        /// The offending field, as it appeared in the request
        field: String,
    },
}

impl QueryError {
    /// Create an unknown-field error
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ListRequired { .. } | Self::BetweenArity { .. } | Self::EmptyField => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::UnknownField { .. } => StatusCode::BAD_REQUEST,
        }
    }

    fn user_message(&self) -> String {
        match self {
            Self::ListRequired { operator } => {
                format!("Operator '{}' requires a list value", operator.symbol())
            }
            Self::BetweenArity { found } => {
                format!("BETWEEN requires exactly 2 values, got {found}")
            }
            Self::EmptyField => "Field name must not be empty".to_string(),
            Self::UnknownField { field } => format!("Unknown field '{field}'"),
        }
    }
}

/// Error body sent to API clients
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = self.user_message();

        tracing::warn!(status = %status, error = %error, "Rejected query parameters");

        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for QueryError {}
