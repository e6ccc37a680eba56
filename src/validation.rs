//! Field allow-lists
//!
//! Field names in a [`RequestDescriptor`] come straight from the query string and
//! end up in SQL templates. Executors that know their schema should check them
//! before applying any fragment:
//!
//! ```rust,ignore
//! use searchcrate::{FieldAllowList, QueryParser};
//!
//! let allowed = FieldAllowList::new(["title", "status", "created_at", "meta"]);
//! let request = QueryParser::default().parse(&params);
//! allowed.check(&request)?; // 400 on `?password_hash=...`
//! ```
//!
//! For JSON paths only the column part (`meta` in `meta.score`) is checked.

use std::collections::HashSet;

use crate::errors::QueryError;
use crate::filtering::FieldPath;
use crate::models::RequestDescriptor;

/// Columns a target resource exposes for filtering, sorting, selecting and grouping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldAllowList {
    columns: HashSet<String>,
}

impl FieldAllowList {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `field` (plain or JSON path) refers to an allowed column
    #[must_use]
    pub fn allows(&self, field: &str) -> bool {
        self.columns.contains(FieldPath::parse(field).column())
    }

    /// Reject the request if any referenced field is not allowed.
    ///
    /// # Errors
    ///
    /// [`QueryError::UnknownField`] for the first offending field, checked in
    /// filter, sort, select, group-by order.
    pub fn check(&self, request: &RequestDescriptor) -> Result<(), QueryError> {
        let fields = request
            .filters
            .iter()
            .map(|filter| filter.field())
            .chain(request.sort.iter().map(|sort| sort.field.as_str()))
            .chain(request.select.iter().map(|select| select.field.as_str()))
            .chain(request.group_by.iter().map(|group| group.field.as_str()));

        for field in fields {
            if !self.allows(field) {
                return Err(QueryError::unknown_field(field));
            }
        }
        Ok(())
    }

    /// Drop every entry that references a field outside the list
    #[must_use]
    pub fn retain(&self, mut request: RequestDescriptor) -> RequestDescriptor {
        request.filters.retain(|filter| {
            let allowed = self.allows(filter.field());
            if !allowed {
                tracing::debug!(field = filter.field(), "Dropping filter on unknown field");
            }
            allowed
        });
        request.sort = request.sort.filter(|sort| self.allows(&sort.field));
        request.select.retain(|select| self.allows(&select.field));
        request.group_by.retain(|group| self.allows(&group.field));
        request
    }
}
