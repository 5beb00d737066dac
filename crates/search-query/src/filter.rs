//! Filter compilation.
//!
//! Merges grammar clauses with UI selections and the enabled content
//! types into one engine filter expression. Grammar wins: a UI value is
//! only applied for a directive the query did not already constrain.

use std::fmt;

use search_types::{is_valid_year, ContentTypeConfig, DocumentType, SearchOptions};
use tracing::debug;

use crate::grammar::{ClauseSource, Directive, FilterClause};

/// Compiled filter: an ordered list of clauses joined with `AND`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterExpression {
    clauses: Vec<FilterClause>,
}

impl FilterExpression {
    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    /// An empty expression means an unconstrained search.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Expression text, or None when there is nothing to filter on.
    pub fn to_filter_string(&self) -> Option<String> {
        (!self.is_empty()).then(|| self.to_string())
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" AND ")?;
            }
            f.write_str(clause.expression())?;
        }
        Ok(())
    }
}

/// Compile grammar clauses, UI options and content-type defaults.
///
/// Precedence:
/// 1. A grammar `type` clause suppresses every other type constraint.
/// 2. Otherwise a UI type filter is used.
/// 3. Otherwise the enabled content types form a disjunction (none enabled = no constraint).
/// 4. Grammar clauses follow, verbatim.
/// 5. UI document category, if valid and the grammar has none.
/// 6. UI year, if in range and the grammar has none.
pub fn compile(
    grammar: &[FilterClause],
    options: &SearchOptions,
    config: &ContentTypeConfig,
) -> FilterExpression {
    let in_grammar = |directive: Directive| grammar.iter().any(|c| c.directive() == directive);

    let mut clauses = Vec::with_capacity(grammar.len() + 3);

    if !in_grammar(Directive::Type) {
        if let Some(type_filter) = options.type_filter() {
            clauses.push(FilterClause::content_type(ClauseSource::Options, type_filter));
        } else if let Some(clause) = content_type_disjunction(config) {
            clauses.push(clause);
        }
    }

    clauses.extend(grammar.iter().cloned());

    if let Some(doctype) = options.doctype() {
        match DocumentType::parse(doctype) {
            Some(doctype) if !in_grammar(Directive::Doctype) => {
                clauses.push(FilterClause::document_type(ClauseSource::Options, doctype));
            }
            Some(_) => {}
            None => debug!(doctype = doctype, "Ignoring unknown document type option"),
        }
    }

    if let Some(year) = options.year {
        if !is_valid_year(year) {
            debug!(year = year, "Ignoring out-of-range year option");
        } else if !in_grammar(Directive::Year) {
            clauses.push(FilterClause::year(ClauseSource::Options, year));
        }
    }

    let expression = FilterExpression { clauses };
    debug!(filter = %expression, "Compiled filter expression");
    expression
}

/// `(type = "file" OR type = "post" ...)` over the enabled content types.
fn content_type_disjunction(config: &ContentTypeConfig) -> Option<FilterClause> {
    let enabled = config.enabled();
    if enabled.is_empty() {
        return None;
    }

    let alternatives = enabled
        .iter()
        .map(|t| format!("type = \"{}\"", t))
        .collect::<Vec<_>>()
        .join(" OR ");

    Some(FilterClause::new(
        Directive::Type,
        ClauseSource::Settings,
        format!("({})", alternatives),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::parse;

    fn all_configs() -> Vec<ContentTypeConfig> {
        (0..32u8)
            .map(|bits| ContentTypeConfig {
                files: bits & 1 != 0,
                posts: bits & 2 != 0,
                pages: bits & 4 != 0,
                faqs: bits & 8 != 0,
                events: bits & 16 != 0,
            })
            .collect()
    }

    #[test]
    fn test_defaults_build_type_disjunction() {
        let filter = compile(&[], &SearchOptions::new(), &ContentTypeConfig::default());
        assert_eq!(
            filter.to_string(),
            r#"(type = "file" OR type = "post" OR type = "page" OR type = "faq" OR type = "event")"#
        );
    }

    #[test]
    fn test_partial_content_types() {
        let config = ContentTypeConfig {
            posts: false,
            pages: false,
            faqs: false,
            ..Default::default()
        };
        let filter = compile(&[], &SearchOptions::new(), &config);
        assert_eq!(filter.to_string(), r#"(type = "file" OR type = "event")"#);
    }

    #[test]
    fn test_no_content_types_means_unconstrained() {
        let filter = compile(&[], &SearchOptions::new(), &ContentTypeConfig::none());
        assert!(filter.is_empty());
        assert_eq!(filter.to_filter_string(), None);
    }

    #[test]
    fn test_ui_type_overrides_defaults() {
        let options = SearchOptions::new().with_type_filter("post");
        let filter = compile(&[], &options, &ContentTypeConfig::default());
        assert_eq!(filter.to_string(), r#"type = "post""#);
        assert_eq!(filter.clauses()[0].source(), ClauseSource::Options);
    }

    #[test]
    fn test_grammar_type_wins_for_every_config() {
        let parsed = parse("type:file roof");
        let options = SearchOptions::new().with_type_filter("post");
        for config in all_configs() {
            let filter = compile(&parsed.clauses, &options, &config);
            assert_eq!(filter.to_string(), r#"type = "file""#);
        }
    }

    #[test]
    fn test_grammar_clauses_appended_after_type() {
        let parsed = parse("year:2022 in:finance budget");
        let filter = compile(&parsed.clauses, &SearchOptions::new(), &ContentTypeConfig::none());
        assert_eq!(
            filter.to_string(),
            r#"year = 2022 AND path CONTAINS "finance""#
        );
    }

    #[test]
    fn test_ui_doctype_and_year() {
        let options = SearchOptions::new()
            .with_type_filter("file")
            .with_doctype("Minutes")
            .with_year(2023);
        let filter = compile(&[], &options, &ContentTypeConfig::default());
        assert_eq!(
            filter.to_string(),
            r#"type = "file" AND document_type = "minutes" AND year = 2023"#
        );
    }

    #[test]
    fn test_grammar_doctype_and_year_win() {
        let parsed = parse("doctype:agenda year:2020");
        let options = SearchOptions::new()
            .with_type_filter("file")
            .with_doctype("minutes")
            .with_year(2023);
        let filter = compile(&parsed.clauses, &options, &ContentTypeConfig::default());
        assert_eq!(
            filter.to_string(),
            r#"type = "file" AND year = 2020 AND document_type = "agenda""#
        );
    }

    #[test]
    fn test_invalid_ui_values_dropped() {
        let options = SearchOptions::new()
            .with_type_filter("page")
            .with_doctype("budget")
            .with_year(1850);
        let filter = compile(&[], &options, &ContentTypeConfig::default());
        assert_eq!(filter.to_string(), r#"type = "page""#);
    }

    #[test]
    fn test_invalid_grammar_year_does_not_block_ui_year() {
        let parsed = parse("year:1700 fete");
        let options = SearchOptions::new().with_type_filter("event").with_year(2024);
        let filter = compile(&parsed.clauses, &options, &ContentTypeConfig::default());
        assert_eq!(filter.to_string(), r#"type = "event" AND year = 2024"#);
    }

    #[test]
    fn test_ui_type_is_escaped() {
        let options = SearchOptions::new().with_type_filter(r#"post" OR type = "x"#);
        let filter = compile(&[], &options, &ContentTypeConfig::default());
        assert_eq!(filter.to_string(), r#"type = "post\" OR type = \"x""#);
    }

    #[test]
    fn test_one_clause_per_directive_and_source() {
        let parsed = parse("type:faq year:2021 doctype:policy");
        let options = SearchOptions::new()
            .with_type_filter("post")
            .with_doctype("finance")
            .with_year(2022);
        let filter = compile(&parsed.clauses, &options, &ContentTypeConfig::default());
        let clauses = filter.clauses();
        for (i, a) in clauses.iter().enumerate() {
            for b in &clauses[i + 1..] {
                assert!(a.directive() != b.directive() || a.source() != b.source());
            }
        }
        assert_eq!(clauses.len(), 3);
    }

    #[test]
    fn test_compile_is_idempotent() {
        let parsed = parse("before:2024-06 in:council hall");
        let options = SearchOptions::new().with_doctype("agenda").with_year(2024);
        let config = ContentTypeConfig::default();
        let first = compile(&parsed.clauses, &options, &config);
        let second = compile(&parsed.clauses, &options, &config);
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }
}
