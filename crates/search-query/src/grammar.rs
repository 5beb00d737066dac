//! Inline query grammar.
//!
//! Extracts `key:value` directives from a raw query in one left-to-right
//! pass, then rebuilds the free text with the matched spans removed.
//!
//! Supported directives:
//!   type:file, type:post, type:page, type:faq, type:event (aliases: document, news)
//!   year:2024
//!   doctype:minutes, doctype:agenda, doctype:policy, doctype:planning, doctype:finance, doctype:other
//!   before:2024-01 or before:2024
//!   after:2023-06 or after:2023
//!   in:council (substring match against the file path)
//!
//! Keywords match case-insensitively and only at a word boundary, so
//! `doctype:` never matches as `type:`. Only the first occurrence of each
//! directive is honored; later occurrences stay in the text untouched.
//! A directive whose value fails validation is still removed from the
//! text but yields no clause.

use std::fmt;

use search_types::{is_valid_year, ContentType, DocumentType};
use tracing::debug;

/// Directive kinds, in the order their clauses are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Directive {
    Type,
    Year,
    Doctype,
    Before,
    After,
    In,
}

impl Directive {
    pub const ALL: [Directive; 6] = [
        Directive::Type,
        Directive::Year,
        Directive::Doctype,
        Directive::Before,
        Directive::After,
        Directive::In,
    ];

    /// Keyword including the trailing colon.
    pub fn keyword(&self) -> &'static str {
        match self {
            Directive::Type => "type:",
            Directive::Year => "year:",
            Directive::Doctype => "doctype:",
            Directive::Before => "before:",
            Directive::After => "after:",
            Directive::In => "in:",
        }
    }

    fn value_syntax(&self) -> ValueSyntax {
        match self {
            Directive::Type | Directive::Doctype | Directive::In => ValueSyntax::Word,
            Directive::Year => ValueSyntax::Year,
            Directive::Before | Directive::After => ValueSyntax::YearMonth,
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword().trim_end_matches(':'))
    }
}

/// Where a clause came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseSource {
    /// Typed inline in the query
    Grammar,
    /// Picked in the UI
    Options,
    /// Derived from the enabled content types
    Settings,
}

/// One engine filter fragment, tagged with the directive it constrains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    directive: Directive,
    source: ClauseSource,
    expression: String,
}

impl FilterClause {
    pub fn new(directive: Directive, source: ClauseSource, expression: impl Into<String>) -> Self {
        Self {
            directive,
            source,
            expression: expression.into(),
        }
    }

    pub fn directive(&self) -> Directive {
        self.directive
    }

    pub fn source(&self) -> ClauseSource {
        self.source
    }

    /// Filter-language text, e.g. `year = 2024`.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// `type = "<t>"`
    pub fn content_type(source: ClauseSource, value: &str) -> Self {
        Self::new(
            Directive::Type,
            source,
            format!("type = \"{}\"", escape_filter_value(value)),
        )
    }

    /// `year = <y>`
    pub fn year(source: ClauseSource, year: i32) -> Self {
        Self::new(Directive::Year, source, format!("year = {}", year))
    }

    /// `document_type = "<d>"`
    pub fn document_type(source: ClauseSource, doctype: DocumentType) -> Self {
        Self::new(
            Directive::Doctype,
            source,
            format!("document_type = \"{}\"", doctype),
        )
    }
}

impl fmt::Display for FilterClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

/// Escape a value for use inside a double-quoted filter string.
pub fn escape_filter_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '"' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Result of parsing a raw query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedQuery {
    /// Free text with matched directives removed and whitespace collapsed
    pub text: String,
    /// Clauses from valid directives, one per directive kind at most
    pub clauses: Vec<FilterClause>,
}

impl ParsedQuery {
    /// Whether the grammar produced a clause for this directive.
    pub fn has(&self, directive: Directive) -> bool {
        self.clauses.iter().any(|c| c.directive == directive)
    }
}

/// A directive occurrence located in the raw query.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DirectiveMatch {
    directive: Directive,
    start: usize,
    end: usize,
    value: DirectiveValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DirectiveValue {
    Word(String),
    Year(i32),
    YearMonth { year: i32, month: Option<u32> },
}

#[derive(Debug, Clone, Copy)]
enum ValueSyntax {
    /// One or more of `[A-Za-z0-9_]`
    Word,
    /// Exactly four digits
    Year,
    /// Four digits, optionally followed by `-` and two digits
    YearMonth,
}

/// Parse a raw query into free text and filter clauses.
pub fn parse(raw: &str) -> ParsedQuery {
    let matches = scan(raw);

    let mut clauses: Vec<FilterClause> = matches.iter().filter_map(to_clause).collect();
    clauses.sort_by_key(|c| c.directive);

    let mut stripped = String::with_capacity(raw.len());
    let mut cursor = 0;
    for m in &matches {
        stripped.push_str(&raw[cursor..m.start]);
        cursor = m.end;
    }
    stripped.push_str(&raw[cursor..]);

    let text = collapse_whitespace(&stripped);

    debug!(
        raw = raw,
        text = text.as_str(),
        directives = matches.len(),
        clauses = clauses.len(),
        "Parsed query grammar"
    );

    ParsedQuery { text, clauses }
}

/// Locate the first occurrence of each directive, left to right.
///
/// Spans never overlap: scanning resumes after the end of each match.
fn scan(raw: &str) -> Vec<DirectiveMatch> {
    let bytes = raw.as_bytes();
    let mut found: Vec<DirectiveMatch> = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if i > 0 && is_word_byte(bytes[i - 1]) {
            i += 1;
            continue;
        }

        let hit = Directive::ALL
            .iter()
            .filter(|d| !found.iter().any(|m| m.directive == **d))
            .find_map(|d| match_directive(bytes, i, *d));

        match hit {
            Some(m) => {
                i = m.end;
                found.push(m);
            }
            None => i += 1,
        }
    }

    found
}

fn match_directive(bytes: &[u8], start: usize, directive: Directive) -> Option<DirectiveMatch> {
    let keyword = directive.keyword().as_bytes();
    let rest = bytes.get(start..)?;
    if rest.len() < keyword.len() || !rest[..keyword.len()].eq_ignore_ascii_case(keyword) {
        return None;
    }

    let value_start = start + keyword.len();
    let (value, end) = match directive.value_syntax() {
        ValueSyntax::Word => {
            let len = bytes[value_start..]
                .iter()
                .take_while(|b| is_word_byte(**b))
                .count();
            if len == 0 {
                return None;
            }
            let end = value_start + len;
            let word = String::from_utf8_lossy(&bytes[value_start..end]).to_ascii_lowercase();
            (DirectiveValue::Word(word), end)
        }
        ValueSyntax::Year => {
            let year = read_digits(bytes, value_start, 4)?;
            (DirectiveValue::Year(year as i32), value_start + 4)
        }
        ValueSyntax::YearMonth => {
            let year = read_digits(bytes, value_start, 4)?;
            let mut end = value_start + 4;
            let mut month = None;
            if bytes.get(end) == Some(&b'-') {
                if let Some(m) = read_digits(bytes, end + 1, 2) {
                    month = Some(m);
                    end += 3;
                }
            }
            (
                DirectiveValue::YearMonth {
                    year: year as i32,
                    month,
                },
                end,
            )
        }
    };

    Some(DirectiveMatch {
        directive,
        start,
        end,
        value,
    })
}

/// Read exactly `count` ASCII digits at `start`.
fn read_digits(bytes: &[u8], start: usize, count: usize) -> Option<u32> {
    let digits = bytes.get(start..start + count)?;
    if !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some(
        digits
            .iter()
            .fold(0u32, |acc, d| acc * 10 + u32::from(d - b'0')),
    )
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn to_clause(m: &DirectiveMatch) -> Option<FilterClause> {
    let source = ClauseSource::Grammar;
    let clause = match (&m.directive, &m.value) {
        (Directive::Type, DirectiveValue::Word(word)) => {
            ContentType::from_alias(word).map(|t| FilterClause::content_type(source, t.as_str()))
        }
        (Directive::Year, DirectiveValue::Year(year)) => {
            is_valid_year(*year).then(|| FilterClause::year(source, *year))
        }
        (Directive::Doctype, DirectiveValue::Word(word)) => {
            DocumentType::parse(word).map(|d| FilterClause::document_type(source, d))
        }
        (Directive::Before, DirectiveValue::YearMonth { year, month }) => {
            date_bound(*year, month.unwrap_or(12), 31).map(|date| {
                FilterClause::new(
                    Directive::Before,
                    source,
                    format!("date_sortable < {}", date),
                )
            })
        }
        (Directive::After, DirectiveValue::YearMonth { year, month }) => {
            date_bound(*year, month.unwrap_or(1), 1).map(|date| {
                FilterClause::new(
                    Directive::After,
                    source,
                    format!("date_sortable > {}", date),
                )
            })
        }
        (Directive::In, DirectiveValue::Word(word)) => Some(FilterClause::new(
            Directive::In,
            source,
            format!("path CONTAINS \"{}\"", escape_filter_value(word)),
        )),
        _ => None,
    };

    if clause.is_none() {
        debug!(directive = %m.directive, value = ?m.value, "Dropping invalid directive");
    }
    clause
}

/// `YYYYMMDD` as an integer. The day is not checked against the month.
fn date_bound(year: i32, month: u32, day: u32) -> Option<i64> {
    if !is_valid_year(year) || !(1..=12).contains(&month) {
        return None;
    }
    Some(i64::from(year) * 10_000 + i64::from(month) * 100 + i64::from(day))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
