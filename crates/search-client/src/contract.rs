//! Caller-facing JSON contract.
//!
//! The UI posts `{query, limit, type, doctype, year, sort, exactMatch}`
//! and receives either a `SearchResult` or `{message}`. Loose inputs are
//! normalized here: empty strings mean "unset", `limit` and `year` may be
//! numbers or strings, `exactMatch` may be a bool or `"1"`, and unknown
//! sort values fall back to newest first. Values that cannot be read are
//! treated as unset.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use search_query::SearchResult;
use search_types::{SearchOptions, SortOrder};

use crate::client::SearchClient;
use crate::error::ClientError;

/// Search input as sent by the UI.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInput {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub limit: Option<LooseValue>,
    #[serde(default, rename = "type")]
    pub type_filter: Option<String>,
    #[serde(default)]
    pub doctype: Option<String>,
    #[serde(default)]
    pub year: Option<LooseValue>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub exact_match: Option<LooseValue>,
}

/// A form value that may arrive as a string, number or bool.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseValue {
    Bool(bool),
    Number(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

impl LooseValue {
    fn as_int(&self) -> Option<i64> {
        match self {
            LooseValue::Number(n) => Some(*n),
            LooseValue::Float(f) => whole_number(*f),
            LooseValue::Text(s) => {
                let s = s.trim();
                s.parse()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(whole_number))
            }
            LooseValue::Bool(_) | LooseValue::Other(_) => None,
        }
    }

    fn as_flag(&self) -> bool {
        match self {
            LooseValue::Bool(b) => *b,
            LooseValue::Number(n) => *n == 1,
            LooseValue::Float(f) => *f == 1.0,
            LooseValue::Text(s) => matches!(s.trim(), "1" | "true"),
            LooseValue::Other(_) => false,
        }
    }
}

fn whole_number(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
}

impl SearchInput {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Options for this input; `default_limit` applies when none was sent.
    pub fn to_options(&self, default_limit: u32) -> SearchOptions {
        let sort = self
            .sort
            .as_deref()
            .and_then(SortOrder::parse)
            .unwrap_or_default();

        SearchOptions {
            type_filter: self.type_filter.clone(),
            doctype: self.doctype.clone(),
            year: self
                .year
                .as_ref()
                .and_then(LooseValue::as_int)
                .and_then(|y| i32::try_from(y).ok()),
            sort,
            exact_match: self.exact_match.as_ref().is_some_and(LooseValue::as_flag),
            limit: self
                .limit
                .as_ref()
                .and_then(LooseValue::as_int)
                .unwrap_or(i64::from(default_limit)),
        }
    }
}

/// Error body returned to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub message: String,
}

impl From<ClientError> for ErrorEnvelope {
    fn from(error: ClientError) -> Self {
        Self {
            message: error.to_string(),
        }
    }
}

impl SearchClient {
    /// Handle one UI search call.
    pub async fn handle(&self, input: SearchInput) -> Result<SearchResult, ErrorEnvelope> {
        if input.query.trim().is_empty() {
            return Err(ClientError::EmptyQuery.into());
        }

        let options = input.to_options(self.config().results_per_page);
        self.search(&input.query, &options).await.map_err(|error| {
            if error.is_local() {
                debug!(error = %error, "Search rejected");
            } else {
                warn!(error = %error, "Search failed");
            }
            ErrorEnvelope::from(error)
        })
    }
}
