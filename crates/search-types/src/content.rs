//! Content types and document categories known to the search index.
//!
//! Every indexed record carries a `type` discriminant (file, post, page,
//! faq, event). Files additionally carry a `document_type` category.

use serde::{Deserialize, Serialize};

/// Earliest year accepted by year-based filters.
pub const MIN_YEAR: i32 = 1990;

/// Latest year accepted by year-based filters.
pub const MAX_YEAR: i32 = 2100;

/// Whether a year falls inside the range the index is filtered on.
pub fn is_valid_year(year: i32) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year)
}

/// Content type discriminant stored on every indexed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    File,
    Post,
    Page,
    Faq,
    Event,
}

impl ContentType {
    /// All content types, in the order they appear in default filters.
    pub const ALL: [ContentType; 5] = [
        ContentType::File,
        ContentType::Post,
        ContentType::Page,
        ContentType::Faq,
        ContentType::Event,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::File => "file",
            ContentType::Post => "post",
            ContentType::Page => "page",
            ContentType::Faq => "faq",
            ContentType::Event => "event",
        }
    }

    /// Parse a canonical type name, returning None for unknown types.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "file" => Some(ContentType::File),
            "post" => Some(ContentType::Post),
            "page" => Some(ContentType::Page),
            "faq" => Some(ContentType::Faq),
            "event" => Some(ContentType::Event),
            _ => None,
        }
    }

    /// Parse a user-typed name, accepting `document` and `news` aliases.
    ///
    /// Matching is case-insensitive.
    pub fn from_alias(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "document" => Some(ContentType::File),
            "news" => Some(ContentType::Post),
            other => Self::parse(other),
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category assigned to indexed files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Minutes,
    Agenda,
    Policy,
    Planning,
    Finance,
    Other,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Minutes => "minutes",
            DocumentType::Agenda => "agenda",
            DocumentType::Policy => "policy",
            DocumentType::Planning => "planning",
            DocumentType::Finance => "finance",
            DocumentType::Other => "other",
        }
    }

    /// Parse a category name case-insensitively, returning None when unknown.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "minutes" => Some(DocumentType::Minutes),
            "agenda" => Some(DocumentType::Agenda),
            "policy" => Some(DocumentType::Policy),
            "planning" => Some(DocumentType::Planning),
            "finance" => Some(DocumentType::Finance),
            "other" => Some(DocumentType::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which content types are searchable when the caller does not pick one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeConfig {
    pub files: bool,
    pub posts: bool,
    pub pages: bool,
    pub faqs: bool,
    pub events: bool,
}

impl Default for ContentTypeConfig {
    fn default() -> Self {
        Self {
            files: true,
            posts: true,
            pages: true,
            faqs: true,
            events: true,
        }
    }
}

impl ContentTypeConfig {
    /// Config with every content type disabled.
    pub fn none() -> Self {
        Self {
            files: false,
            posts: false,
            pages: false,
            faqs: false,
            events: false,
        }
    }

    pub fn is_enabled(&self, content_type: ContentType) -> bool {
        match content_type {
            ContentType::File => self.files,
            ContentType::Post => self.posts,
            ContentType::Page => self.pages,
            ContentType::Faq => self.faqs,
            ContentType::Event => self.events,
        }
    }

    /// Enabled content types in canonical order.
    pub fn enabled(&self) -> Vec<ContentType> {
        ContentType::ALL
            .into_iter()
            .filter(|t| self.is_enabled(*t))
            .collect()
    }
}
