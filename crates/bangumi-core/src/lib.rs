//! Bangumi Importer Core Library
//!
//! Fetches subject pages from bangumi (chii.in / bgm.tv) and turns them
//! into records for the `BANGUMI_DATA` catalog of a static front-end.
//!
//! # Overview
//!
//! - URL resolution from bare ids or subject page URLs
//! - A plain HTTP client with charset-aware body decoding
//! - HTML parsers for subject pages and search results
//! - A formatter producing a pasteable `const BANGUMI_DATA = [...]` snippet
//!
//! # Example
//!
//! ```no_run
//! use bangumi_core::{to_js_snippet, BangumiScraper, Result, WatchStatus};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let scraper = BangumiScraper::new()?;
//!
//!     // Search for a subject
//!     let results = scraper.search("日常").await?;
//!     for result in &results {
//!         println!("{}", result);
//!     }
//!
//!     // Import one
//!     let record = scraper
//!         .fetch_subject("https://chii.in/subject/9912", WatchStatus::Finished)
//!         .await?;
//!     println!("{}", to_js_snippet(&record)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! Field extraction never fails: a page missing some element simply
//! yields a record with that field empty.

mod client;
pub mod encoding;
mod error;
mod format;
pub mod parser;
mod scraper;
mod types;
pub mod url;

// Re-export client types
pub use client::{BangumiClient, ClientConfig};

// Re-export error types
pub use error::{BangumiError, Result};

// Re-export formatter
pub use format::{to_js_snippet, to_json, DATA_VARIABLE, SNIPPET_HEADER};

// Re-export parser functions
pub use parser::{parse_search_results, parse_subject};

// Re-export main scraper API
pub use scraper::BangumiScraper;

// Re-export data types
pub use types::{SearchResult, SubjectRecord, WatchStatus};

// Re-export URL helper functions for convenience
pub use url::{build_search_url, build_subject_url, extract_subject_id, resolve_subject, SubjectTarget};
