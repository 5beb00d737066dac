//! Engine request construction.
//!
//! Shapes the JSON body sent to the engine's search endpoint. Hybrid
//! (keyword + semantic) ranking and explicit ordering are mutually
//! exclusive: hybrid is only requested for relevance-sorted, non-exact
//! searches.

use serde::Serialize;
use search_types::{SearchOptions, SortOrder};

/// Smallest result count ever requested.
pub const MIN_LIMIT: usize = 1;

/// Largest result count ever requested.
pub const MAX_LIMIT: usize = 100;

/// Sortable date attribute, stored as `YYYYMMDD`.
pub const SORT_FIELD: &str = "date_sortable";

pub const HIGHLIGHT_PRE_TAG: &str = "<mark>";
pub const HIGHLIGHT_POST_TAG: &str = "</mark>";

/// Words kept around each highlighted content match.
pub const CROP_LENGTH: usize = 150;

/// Share of the hybrid score taken from semantic similarity.
pub const SEMANTIC_RATIO: f64 = 0.2;

/// Embedder configured on the index for hybrid search.
pub const EMBEDDER: &str = "openai";

/// Attributes returned with every hit.
pub const ATTRIBUTES_TO_RETRIEVE: [&str; 16] = [
    "id",
    "type",
    "title",
    "content",
    "filename",
    "path",
    "url_prefix",
    "url",
    "excerpt",
    "date_display",
    "document_type",
    "page",
    "categories",
    "priority",
    "event_time",
    "event_location",
];

/// Body of a search call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub q: String,
    pub limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<String>>,
    pub attributes_to_retrieve: Vec<String>,
    pub attributes_to_highlight: Vec<String>,
    pub highlight_pre_tag: String,
    pub highlight_post_tag: String,
    pub attributes_to_crop: Vec<String>,
    pub crop_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hybrid: Option<HybridSearch>,
    #[serde(flatten)]
    pub exact_match: Option<ExactMatch>,
}

/// Blend of keyword and semantic ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HybridSearch {
    pub semantic_ratio: f64,
    pub embedder: String,
}

impl Default for HybridSearch {
    fn default() -> Self {
        Self {
            semantic_ratio: SEMANTIC_RATIO,
            embedder: EMBEDDER.to_string(),
        }
    }
}

/// Literal matching: every term must match and typos are not tolerated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExactMatch {
    pub matching_strategy: String,
    pub typo_tolerance: TypoTolerance,
}

impl Default for ExactMatch {
    fn default() -> Self {
        Self {
            matching_strategy: "all".to_string(),
            typo_tolerance: TypoTolerance { enabled: false },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypoTolerance {
    pub enabled: bool,
}

impl SearchRequest {
    /// Whether the request asks for hybrid ranking.
    pub fn is_hybrid(&self) -> bool {
        self.hybrid.is_some()
    }

    pub fn is_exact(&self) -> bool {
        self.exact_match.is_some()
    }
}

/// Clamp a caller-supplied limit to `[MIN_LIMIT, MAX_LIMIT]`.
pub fn clamp_limit(limit: i64) -> usize {
    limit.clamp(MIN_LIMIT as i64, MAX_LIMIT as i64) as usize
}

/// Sort spec for an ordering, None for engine relevance.
pub fn sort_spec(sort: SortOrder) -> Option<Vec<String>> {
    match sort {
        SortOrder::Relevance => None,
        SortOrder::DateDesc => Some(vec![format!("{}:desc", SORT_FIELD)]),
        SortOrder::DateAsc => Some(vec![format!("{}:asc", SORT_FIELD)]),
    }
}

/// Build the engine request from cleaned text, a compiled filter and UI options.
///
/// An empty `filter` sends no filter at all.
pub fn build(text: &str, filter: &str, options: &SearchOptions) -> SearchRequest {
    let hybrid = (!options.exact_match && options.sort == SortOrder::Relevance)
        .then(HybridSearch::default);
    let exact_match = options.exact_match.then(ExactMatch::default);

    SearchRequest {
        q: text.to_string(),
        limit: clamp_limit(options.limit),
        filter: (!filter.is_empty()).then(|| filter.to_string()),
        sort: sort_spec(options.sort),
        attributes_to_retrieve: ATTRIBUTES_TO_RETRIEVE.iter().map(|a| a.to_string()).collect(),
        attributes_to_highlight: vec!["content".to_string(), "title".to_string()],
        highlight_pre_tag: HIGHLIGHT_PRE_TAG.to_string(),
        highlight_post_tag: HIGHLIGHT_POST_TAG.to_string(),
        attributes_to_crop: vec!["content".to_string()],
        crop_length: CROP_LENGTH,
        hybrid,
        exact_match,
    }
}
