//! Parser configuration.
//!
//! Passed explicitly into [`QueryParser`](crate::QueryParser); nothing is global.
//! Deserializes from any serde format with every field optional:
//!
//! ```rust,ignore
//! let config: SearchConfig = serde_json::from_str(r#"{"max_per_page": 50}"#)?;
//! assert_eq!(config.default_per_page, 20);
//! ```

use serde::Deserialize;

use crate::filtering::SearchStrategy;

pub const DEFAULT_PER_PAGE: u64 = 20;
pub const MAX_PER_PAGE: u64 = 100;

fn default_per_page() -> u64 {
    DEFAULT_PER_PAGE
}

fn max_per_page() -> u64 {
    MAX_PER_PAGE
}

fn default_filters_key() -> String {
    "filters".to_string()
}

fn default_keyword_delimiter() -> char {
    ','
}

fn default_reserved_params() -> Vec<String> {
    [
        "page", "per_page", "query", "keywords", "order", "include", "select", "group_by",
        "format",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchConfig {
    /// Page size when the request does not give one
    #[serde(default = "default_per_page")]
    pub default_per_page: u64,
    /// Upper bound applied by [`Pagination`](crate::Pagination)
    #[serde(default = "max_per_page")]
    pub max_per_page: u64,
    /// Preferred full-text strategy, read by [`QueryParser::search_plan`](crate::QueryParser::search_plan)
    #[serde(default)]
    pub search_strategy: SearchStrategy,
    /// Key holding the batch filter list (`filters=a:eq:1,b:gt:2`)
    #[serde(default = "default_filters_key")]
    pub filters_key: String,
    /// Splits the keyword parameter into several terms
    #[serde(default = "default_keyword_delimiter")]
    pub keyword_delimiter: char,
    /// Keys never treated as per-key filters
    #[serde(default = "default_reserved_params")]
    pub reserved_params: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_per_page: DEFAULT_PER_PAGE,
            max_per_page: MAX_PER_PAGE,
            search_strategy: SearchStrategy::default(),
            filters_key: default_filters_key(),
            keyword_delimiter: default_keyword_delimiter(),
            reserved_params: default_reserved_params(),
        }
    }
}

impl SearchConfig {
    #[must_use]
    pub fn with_default_per_page(mut self, per_page: u64) -> Self {
        self.default_per_page = per_page;
        self
    }

    #[must_use]
    pub fn with_max_per_page(mut self, per_page: u64) -> Self {
        self.max_per_page = per_page;
        self
    }

    #[must_use]
    pub fn with_search_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.search_strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_filters_key(mut self, key: impl Into<String>) -> Self {
        self.filters_key = key.into();
        self
    }

    #[must_use]
    pub fn with_keyword_delimiter(mut self, delimiter: char) -> Self {
        self.keyword_delimiter = delimiter;
        self
    }

    /// Add a key to the reserved set
    #[must_use]
    pub fn reserve(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        if !self.reserved_params.contains(&key) {
            self.reserved_params.push(key);
        }
        self
    }

    /// Whether `key` is a control parameter rather than a filter.
    /// The batch filter key is always reserved.
    #[must_use]
    pub fn is_reserved(&self, key: &str) -> bool {
        key == self.filters_key || self.reserved_params.iter().any(|reserved| reserved == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.default_per_page, 20);
        assert_eq!(config.max_per_page, 100);
        assert_eq!(config.search_strategy, SearchStrategy::PgSearch);
        assert!(config.is_reserved("page"));
        assert!(config.is_reserved("format"));
        assert!(config.is_reserved("filters"));
        assert!(!config.is_reserved("status"));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"max_per_page": 50, "search_strategy": "generic"}"#).unwrap();
        assert_eq!(config.max_per_page, 50);
        assert_eq!(config.default_per_page, 20);
        assert_eq!(config.search_strategy, SearchStrategy::Generic);
        assert_eq!(config.reserved_params, SearchConfig::default().reserved_params);
    }

    #[test]
    fn test_builder() {
        let config = SearchConfig::default()
            .with_default_per_page(10)
            .with_filters_key("f")
            .reserve("locale")
            .reserve("locale");
        assert_eq!(config.default_per_page, 10);
        assert!(config.is_reserved("f"));
        assert!(!config.is_reserved("filters"));
        assert_eq!(
            config.reserved_params.iter().filter(|k| *k == "locale").count(),
            1
        );
    }
}
