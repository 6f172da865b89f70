//! Core data types for the bangumi importer
//!
//! `SubjectRecord` mirrors the object shape the front-end expects inside
//! `BANGUMI_DATA`, so field order and names matter for serialization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BangumiError;

/// Watch status attached to an imported subject
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchStatus {
    Unprepared,
    #[default]
    Planned,
    Watching,
    Abandoned,
    Finished,
}

impl WatchStatus {
    /// Every status, in the order offered to the user
    pub const ALL: [WatchStatus; 5] = [
        WatchStatus::Unprepared,
        WatchStatus::Planned,
        WatchStatus::Watching,
        WatchStatus::Abandoned,
        WatchStatus::Finished,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WatchStatus::Unprepared => "unprepared",
            WatchStatus::Planned => "planned",
            WatchStatus::Watching => "watching",
            WatchStatus::Abandoned => "abandoned",
            WatchStatus::Finished => "finished",
        }
    }
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WatchStatus {
    type Err = BangumiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        WatchStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| BangumiError::InvalidStatus(wanted.to_string()))
    }
}

/// One subject as exported to the front-end
///
/// Missing page data degrades to empty strings, empty lists and zero;
/// only `rating` is nullable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRecord {
    /// Numeric subject id (or the raw input when none could be found)
    pub id: String,

    /// Original title from the page header
    pub main_title: String,

    /// Chinese name followed by aliases, deduplicated
    pub other_title: Vec<String>,

    /// Year of first broadcast, 0 when unknown
    pub year: u32,

    /// Episode count, 0 when unknown
    pub episodes: u32,

    /// Site score, `None` when the page has no rating
    pub rating: Option<f64>,

    /// User tags in page order, deduplicated
    pub tags: Vec<String>,

    /// Absolute cover image URL, empty when absent
    pub cover: String,

    pub status: WatchStatus,

    /// Synopsis
    pub desc: String,
}

/// A lightweight candidate from the subject search page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Subject id parsed from the result link, empty when unparseable
    pub id: String,

    pub title: String,

    /// Secondary (usually original-language) title, may be empty
    pub subtitle: String,
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        if !self.subtitle.is_empty() {
            write!(f, " / {}", self.subtitle)?;
        }
        if !self.id.is_empty() {
            write!(f, " [{}]", self.id)?;
        }
        Ok(())
    }
}
