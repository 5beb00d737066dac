//! CLI argument parsing for parish search.
//!
//! CLI flags override all other config sources.

use clap::{Args, Parser, Subcommand};

use search_types::SortOrder;

/// Parish Search
///
/// Search parish documents, news, pages, FAQs and events. Queries may
/// mix free text with directives such as `type:file`, `year:2024`,
/// `doctype:minutes`, `before:2024-06`, `after:2023` and `in:council`.
#[derive(Parser, Debug)]
#[command(name = "parish-search")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/parish-search/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Override the search engine URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a search against the engine
    Search(SearchArgs),

    /// Show the engine request a query compiles to, without sending it
    Explain(SearchArgs),

    /// Check that the search engine is reachable
    Health,

    /// Print the effective configuration (API key masked)
    Config,
}

/// Query and UI-equivalent options.
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Query text, directives included
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Content type (file, post, page, faq, event)
    #[arg(short = 't', long = "type")]
    pub type_filter: Option<String>,

    /// Document category (minutes, agenda, policy, planning, finance, other)
    #[arg(short, long)]
    pub doctype: Option<String>,

    /// Year (1990-2100)
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Result ordering (relevance, date_desc, date_asc)
    #[arg(short, long, default_value = "date_desc")]
    pub sort: SortOrder,

    /// Require every term to match exactly
    #[arg(short, long)]
    pub exact: bool,

    /// Maximum results (default from config, at most 100)
    #[arg(short = 'n', long)]
    pub limit: Option<i64>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    /// Query words joined back into one string.
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }
}
