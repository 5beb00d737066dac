//! Client library for the document search engine.
//!
//! This crate provides:
//! - `SearchClient` for running searches and health checks
//! - `SearchTransport`, the HTTP seam, with reqwest and mock implementations
//! - The caller-facing JSON contract (`SearchInput` in, `SearchResult` or `ErrorEnvelope` out)
//!
//! # Example
//!
//! ```rust,no_run
//! use search_client::{SearchClient, SearchInput};
//! use search_types::Settings;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::load(None)?;
//!     let client = SearchClient::http(&settings)?;
//!
//!     match client.handle(SearchInput::new("type:file year:2024 minutes")).await {
//!         Ok(result) => println!("{} hits", result.total),
//!         Err(envelope) => eprintln!("{}", envelope.message),
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod contract;
pub mod error;
pub mod mock;
pub mod transport;

pub use client::{
    ClientConfig, SearchClient, HEALTH_FAILED_MESSAGE, NOT_CONFIGURED_MESSAGE, SEARCH_FAILED_MESSAGE,
};
pub use contract::{ErrorEnvelope, LooseValue, SearchInput};
pub use error::{ClientError, TransportError};
pub use mock::MockTransport;
pub use transport::{HttpTransport, Method, SearchTransport, TransportRequest, TransportResponse};

// Re-export result types for convenience
pub use search_query::{ResultRecord, SearchResult};
