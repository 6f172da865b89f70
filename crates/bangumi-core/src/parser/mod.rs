//! HTML parsers for bangumi
//!
//! Contains modules for parsing different page types.

pub mod search;
pub mod select;
pub mod subject;

pub use search::parse_search_results;
pub use subject::parse_subject;
