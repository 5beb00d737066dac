//! # search-query
//!
//! Turns a free-text query with inline directives into an engine request,
//! and engine hits back into typed records.
//!
//! Pipeline:
//! raw query + options -> [`grammar::parse`] -> [`filter::compile`]
//! -> [`request::build`] -> engine -> [`projector::project_response`]
//!
//! Everything here is a pure function of its inputs. Invalid directives
//! and out-of-range options are dropped rather than reported.

pub mod display;
pub mod filter;
pub mod grammar;
pub mod projector;
pub mod request;

pub use display::type_label;
pub use filter::{compile, FilterExpression};
pub use grammar::{parse, ClauseSource, Directive, FilterClause, ParsedQuery};
pub use projector::{
    project, project_hit, project_response, ArticleResult, EventResult, FaqResult, FileResult,
    RecordBase, ResultRecord, SearchResult,
};
pub use request::{build, clamp_limit, ExactMatch, HybridSearch, SearchRequest};

use search_types::{ContentTypeConfig, SearchOptions};

/// Intermediate products of preparing one search.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub parsed: ParsedQuery,
    pub filter: FilterExpression,
    pub request: SearchRequest,
}

/// Parse, compile and build in one step.
pub fn prepare(raw: &str, options: &SearchOptions, config: &ContentTypeConfig) -> QueryPlan {
    let parsed = parse(raw);
    let filter = compile(&parsed.clauses, options, config);
    let request = build(&parsed.text, &filter.to_string(), options);
    QueryPlan {
        parsed,
        filter,
        request,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_types::SortOrder;

    #[test]
    fn test_prepare_end_to_end() {
        let options = SearchOptions::new()
            .with_type_filter("post")
            .with_sort(SortOrder::Relevance)
            .with_limit(500);
        let plan = prepare(
            "type:file year:2024 roof repair",
            &options,
            &ContentTypeConfig::default(),
        );

        assert_eq!(plan.parsed.text, "roof repair");
        assert_eq!(plan.request.q, "roof repair");
        assert_eq!(
            plan.request.filter.as_deref(),
            Some(r#"type = "file" AND year = 2024"#)
        );
        assert_eq!(plan.request.limit, 100);
        assert!(plan.request.is_hybrid());
    }

    #[test]
    fn test_prepare_unconstrained() {
        let plan = prepare("hall", &SearchOptions::new(), &ContentTypeConfig::none());
        assert!(plan.filter.is_empty());
        assert!(plan.request.filter.is_none());
        assert_eq!(
            plan.request.sort.as_deref(),
            Some(&["date_sortable:desc".to_string()][..])
        );
    }
}
