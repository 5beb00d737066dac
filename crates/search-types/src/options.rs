//! Per-request search options selected in the UI.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Result ordering requested by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Engine ranking, no explicit sort
    Relevance,
    /// Newest first
    #[default]
    DateDesc,
    /// Oldest first
    DateAsc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Relevance => "relevance",
            SortOrder::DateDesc => "date_desc",
            SortOrder::DateAsc => "date_asc",
        }
    }

    /// Parse from string, returning None for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "relevance" => Some(SortOrder::Relevance),
            "date_desc" => Some(SortOrder::DateDesc),
            "date_asc" => Some(SortOrder::DateAsc),
            _ => None,
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| SearchError::InvalidInput(format!("unknown sort: {}", s)))
    }
}

/// Options that accompany a raw query.
///
/// Owned by the caller and passed by value for each request. Values are
/// not validated here; out-of-range filters are dropped when the filter
/// expression is compiled and `limit` is clamped when the request is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Content type picked in the UI (empty = none)
    pub type_filter: Option<String>,
    /// Document category picked in the UI
    pub doctype: Option<String>,
    /// Year picked in the UI
    pub year: Option<i32>,
    pub sort: SortOrder,
    /// Require every term to match literally
    pub exact_match: bool,
    /// Maximum results to return
    pub limit: i64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchOptions {
    pub fn new() -> Self {
        Self {
            type_filter: None,
            doctype: None,
            year: None,
            sort: SortOrder::default(),
            exact_match: false,
            limit: 10,
        }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_type_filter(mut self, type_filter: impl Into<String>) -> Self {
        self.type_filter = Some(type_filter.into());
        self
    }

    pub fn with_doctype(mut self, doctype: impl Into<String>) -> Self {
        self.doctype = Some(doctype.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_exact_match(mut self, exact_match: bool) -> Self {
        self.exact_match = exact_match;
        self
    }

    /// UI type filter, treating an empty string as unset.
    pub fn type_filter(&self) -> Option<&str> {
        non_empty(self.type_filter.as_deref())
    }

    /// UI document category, treating an empty string as unset.
    pub fn doctype(&self) -> Option<&str> {
        non_empty(self.doctype.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
