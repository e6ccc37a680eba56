pub mod config;
pub mod errors;
mod extract;
pub mod filtering;
pub mod models;
pub mod pagination;
pub mod validation;

pub use config::SearchConfig;
pub use errors::QueryError;
pub use filtering::{
    ConditionFragment, FilterOperator, FilterValue, FullTextSearch, QueryParser, SearchStrategy,
    SortFragment, build_condition, build_sort_condition, resolve_search_strategy,
};
pub use models::{
    Aggregation, DatePeriod, FilterSpec, GroupSpec, Keywords, RawParams, RawValue,
    RequestDescriptor, SelectSpec, SortDirection, SortSpec,
};
pub use pagination::{PageInfo, Pagination};
pub use validation::FieldAllowList;
