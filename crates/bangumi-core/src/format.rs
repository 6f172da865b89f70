//! Output formatting
//!
//! Turns a record into the `BANGUMI_DATA` declaration the front-end's
//! import box accepts.

use crate::error::Result;
use crate::types::SubjectRecord;

/// First line of every snippet
pub const SNIPPET_HEADER: &str = "// generated by bangumi-import";

/// Variable the front-end reads its catalog from
pub const DATA_VARIABLE: &str = "BANGUMI_DATA";

/// Formats a record as a complete, pasteable JS declaration
///
/// The record is wrapped in a one-element array and pretty printed with
/// two-space indentation. Non-ASCII text is written as-is.
///
/// # Example
/// ```
/// use bangumi_core::{to_js_snippet, SubjectRecord, WatchStatus};
/// let record = SubjectRecord {
///     id: "1".into(), main_title: "日常".into(), other_title: vec![],
///     year: 0, episodes: 0, rating: None, tags: vec![], cover: String::new(),
///     status: WatchStatus::Planned, desc: String::new(),
/// };
/// let snippet = to_js_snippet(&record).unwrap();
/// assert!(snippet.starts_with("// generated by bangumi-import\nconst BANGUMI_DATA = ["));
/// assert!(snippet.contains("\"mainTitle\": \"日常\""));
/// assert!(snippet.ends_with("];"));
/// ```
pub fn to_js_snippet(record: &SubjectRecord) -> Result<String> {
    let json = serde_json::to_string_pretty(&[record])?;
    Ok(format!(
        "{}\nconst {} = {};",
        SNIPPET_HEADER, DATA_VARIABLE, json
    ))
}

/// Formats a record as plain pretty-printed JSON
pub fn to_json(record: &SubjectRecord) -> Result<String> {
    Ok(serde_json::to_string_pretty(record)?)
}
