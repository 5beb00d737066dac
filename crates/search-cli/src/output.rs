//! Output formatting for search results.
//!
//! Supports both human-readable terminal output and JSON for scripting.

use anyhow::{Context, Result};
use serde::Serialize;

use search_query::request::{HIGHLIGHT_POST_TAG, HIGHLIGHT_PRE_TAG};
use search_query::{QueryPlan, SearchRequest, SearchResult};

/// Marker printed around highlighted terms in terminal output
const EMPHASIS: &str = "*";

/// JSON view of a compiled query
#[derive(Serialize)]
struct JsonPlan<'a> {
    text: &'a str,
    clauses: Vec<&'a str>,
    filter: String,
    request: &'a SearchRequest,
}

/// Formats search results as JSON.
pub fn format_json(result: &SearchResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize search results")
}

/// Formats search results for human-readable terminal output.
pub fn format_human(result: &SearchResult) -> String {
    if result.hits.is_empty() {
        return format!("No results found for \"{}\"\n", result.query);
    }

    let mut out = format!(
        "{} of {} results for \"{}\" ({} ms)\n",
        result.hits.len(),
        result.total,
        result.query,
        result.processing_time_ms
    );

    for (i, record) in result.hits.iter().enumerate() {
        let base = record.base();
        out.push('\n');
        out.push_str(&format!(
            "{}. [{}] {}\n",
            i + 1,
            record.label(),
            plain(&base.title)
        ));

        let meta = record.meta();
        if !meta.is_empty() {
            out.push_str(&format!("   {}\n", meta.join(" · ")));
        }
        if let Some(link) = record.link() {
            out.push_str(&format!("   {}\n", link));
        }
        if !base.content.is_empty() {
            out.push_str(&format!("   {}\n", plain(&base.content)));
        }
    }

    out
}

/// Formats a compiled query plan as JSON.
pub fn format_plan(plan: &QueryPlan) -> Result<String> {
    let view = JsonPlan {
        text: &plan.parsed.text,
        clauses: plan.parsed.clauses.iter().map(|c| c.expression()).collect(),
        filter: plan.filter.to_string(),
        request: &plan.request,
    };
    serde_json::to_string_pretty(&view).context("Failed to serialize query plan")
}

/// Replace highlight tags with terminal emphasis and flatten whitespace.
fn plain(text: &str) -> String {
    text.replace(HIGHLIGHT_PRE_TAG, EMPHASIS)
        .replace(HIGHLIGHT_POST_TAG, EMPHASIS)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
