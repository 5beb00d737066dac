//! # search-types
//!
//! Shared domain types for parish search.
//!
//! This crate defines the values passed between the query core, the
//! engine client and the CLI:
//! - Content types: the `type` discriminant of indexed records and file categories
//! - Search options: per-request UI selections (type, category, year, sort, exact match)
//! - Settings: layered configuration for the engine connection
//!
//! ## Usage
//!
//! ```rust
//! use search_types::{SearchOptions, SortOrder};
//!
//! let options = SearchOptions::new().with_sort(SortOrder::Relevance);
//! assert_eq!(options.limit, 10);
//! ```

pub mod config;
pub mod content;
pub mod error;
pub mod options;

pub use config::{Settings, ENV_PREFIX};
pub use content::{is_valid_year, ContentType, ContentTypeConfig, DocumentType, MAX_YEAR, MIN_YEAR};
pub use error::SearchError;
pub use options::{SearchOptions, SortOrder};
