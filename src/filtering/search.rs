use serde::{Deserialize, Serialize};

use crate::models::{Keywords, RequestDescriptor};

/// How keywords are handed to a search backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// `PostgreSQL` full-text search (tsvector/trigram indexes)
    #[default]
    PgSearch,
    /// Backend-specific search, typically LIKE over a set of columns
    Generic,
    /// Keywords are ignored
    None,
}

/// Implemented by query executors to report which search strategies they can run.
///
/// ```rust,ignore
/// impl FullTextSearch for PostRepository {
///     fn supports(&self, strategy: SearchStrategy) -> bool {
///         match strategy {
///             SearchStrategy::PgSearch => self.backend == DatabaseBackend::Postgres,
///             SearchStrategy::Generic => true,
///             SearchStrategy::None => true,
///         }
///     }
/// }
/// ```
pub trait FullTextSearch {
    fn supports(&self, strategy: SearchStrategy) -> bool;
}

/// Pick the strategy to run: `preferred` if supported, else `Generic` if
/// supported, else `None`.
pub fn resolve_search_strategy<T>(target: &T, preferred: SearchStrategy) -> SearchStrategy
where
    T: FullTextSearch + ?Sized,
{
    if preferred != SearchStrategy::None && target.supports(preferred) {
        return preferred;
    }
    if target.supports(SearchStrategy::Generic) {
        return SearchStrategy::Generic;
    }
    tracing::debug!(?preferred, "Target supports no search strategy, keywords ignored");
    SearchStrategy::None
}

/// Keywords paired with the strategy that should execute them.
///
/// `None` when the request has no keywords or the target cannot search.
pub fn search_plan<'a, T>(
    request: &'a RequestDescriptor,
    target: &T,
    preferred: SearchStrategy,
) -> Option<(SearchStrategy, &'a Keywords)>
where
    T: FullTextSearch + ?Sized,
{
    let keywords = request.keywords.as_ref()?;
    match resolve_search_strategy(target, preferred) {
        SearchStrategy::None => None,
        strategy => Some((strategy, keywords)),
    }
}
