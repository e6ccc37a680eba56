//! # Filtering, Sorting & Search
//!
//! Turns flat query parameters into typed filters, then into parameterized
//! condition fragments. No SQL is executed here: the output is data and
//! templates that a query executor applies.
//!
//! ## Main Components
//!
//! - **[`QueryParser`]**: raw parameters to [`RequestDescriptor`](crate::RequestDescriptor)
//! - **[`build_condition`]**: one filter to a [`ConditionFragment`]
//! - **[`build_sort_condition`]**: one sort to a [`SortFragment`]
//! - **[`resolve_search_strategy`]**: which full-text strategy a target can run
//!
//! ## Query Parameter Examples
//!
//! ### Per-key filters
//! ```rust,ignore
//! GET /todos?status=active                 // status = 'active'
//! GET /todos?priority:gte=5                // priority >= '5'
//! GET /todos?role:in=[admin,editor]        // role IN ('admin', 'editor')
//! GET /todos?created_at:gte=7_days_ago     // dynamic date
//! GET /todos?meta.vip=true                 // meta ->> 'vip' = 'true'
//! ```
//!
//! ### Batch filters
//! ```rust,ignore
//! GET /todos?filters=status:eq:active,score:btw:[10,20]
//! ```
//!
//! ### Operators
//!
//! | key   | SQL       | value  |
//! |-------|-----------|--------|
//! | `eq`  | `=`       | scalar |
//! | `neq` | `!=`      | scalar |
//! | `gt`  | `>`       | scalar |
//! | `gte` | `>=`      | scalar |
//! | `lt`  | `<`       | scalar |
//! | `lte` | `<=`      | scalar |
//! | `in`  | `IN`      | list   |
//! | `nin` | `NOT IN`  | list   |
//! | `btw` | `BETWEEN` | 2 values |
//!
//! Unknown operator keys fall back to `eq`.
//!
//! ### Sorting, includes, selection, grouping
//! ```rust,ignore
//! GET /todos?order=created_at:asc
//! GET /todos?include=author,comments
//! GET /todos?select=id:count,status&group_by=created_at:month
//! GET /todos?query=urgent&page=2&per_page=50
//! ```
//!
//! ## Using the fragments with Sea-ORM
//!
//! ```rust,ignore
//! let request = QueryParser::default().parse(&params);
//! let mut select = todo::Entity::find();
//! if let Some(fragment) = request.where_fragment() {
//!     select = select.filter(fragment.into_expr());
//! }
//! if let Some(sort) = request.sort_fragment() {
//!     let (expr, order) = sort.to_order_by();
//!     select = select.order_by(expr, order);
//! }
//! ```

pub mod conditions;
pub mod operators;
pub mod query_parser;
pub mod search;
pub mod sort;
pub mod values;

// Re-export commonly used items
pub use conditions::{ConditionFragment, FieldPath, build_condition};
pub use operators::FilterOperator;
pub use query_parser::{QueryParser, parse_filter_token, split_top_level};
pub use search::{FullTextSearch, SearchStrategy, resolve_search_strategy, search_plan};
pub use sort::{SortFragment, build_sort_condition, parse_order};
pub use values::{DynamicValue, FilterValue, split_list_value, transform_value};
