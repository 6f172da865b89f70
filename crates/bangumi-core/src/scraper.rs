//! Main scraper API for bangumi
//!
//! Provides the high-level API combining the HTTP client and parsers.

use crate::client::{BangumiClient, ClientConfig};
use crate::error::{BangumiError, Result};
use crate::parser::{parse_search_results, parse_subject};
use crate::types::{SearchResult, SubjectRecord, WatchStatus};
use crate::url::{build_search_url_with_base, resolve_subject_with_base};

/// Main scraper API for bangumi
///
/// Resolves user input, fetches the page and runs the extractors.
pub struct BangumiScraper {
    client: BangumiClient,
}

impl BangumiScraper {
    /// Create a new scraper with default configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new() -> Result<Self> {
        let client = BangumiClient::new()?;
        Ok(Self { client })
    }

    /// Create a new scraper with custom client configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = BangumiClient::with_config(config)?;
        Ok(Self { client })
    }

    /// Fetch a subject page and build its record
    ///
    /// # Arguments
    /// * `input` - Bare numeric id or subject page URL
    /// * `status` - Watch status written into the record
    ///
    /// # Errors
    /// - `InvalidId` if input is empty or whitespace only
    /// - `InvalidUrl` if input is neither an id nor an http(s) URL
    /// - `HttpError` / `HttpStatus` if the request fails
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> bangumi_core::Result<()> {
    /// use bangumi_core::{BangumiScraper, WatchStatus};
    /// let scraper = BangumiScraper::new()?;
    /// let record = scraper.fetch_subject("9912", WatchStatus::Planned).await?;
    /// println!("{} ({})", record.main_title, record.year);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch_subject(&self, input: &str, status: WatchStatus) -> Result<SubjectRecord> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(BangumiError::InvalidId(
                "Subject ID or URL cannot be empty".to_string(),
            ));
        }

        let target = resolve_subject_with_base(trimmed, self.client.base_url());
        let html = self.client.fetch(&target.url).await?;
        Ok(parse_subject(&html, &target.id, status))
    }

    /// Search anime subjects by keyword
    ///
    /// # Returns
    /// Candidates in page order, empty if nothing matched
    ///
    /// # Errors
    /// - `InvalidId` if keyword is empty or whitespace only
    /// - `HttpError` / `HttpStatus` if the request fails
    pub async fn search(&self, keyword: &str) -> Result<Vec<SearchResult>> {
        let trimmed = keyword.trim();
        if trimmed.is_empty() {
            return Err(BangumiError::InvalidId(
                "Search keyword cannot be empty".to_string(),
            ));
        }

        let url = build_search_url_with_base(trimmed, self.client.base_url());
        let html = self.client.fetch(&url).await?;
        Ok(parse_search_results(&html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scraper_creation() {
        let scraper = BangumiScraper::new();
        assert!(scraper.is_ok());
    }

    #[test]
    fn test_scraper_with_custom_config() {
        let config = ClientConfig {
            timeout_secs: 60,
            ..ClientConfig::default()
        };
        let scraper = BangumiScraper::with_config(config);
        assert!(scraper.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_subject_empty_input() {
        let scraper = BangumiScraper::new().unwrap();
        let result = scraper.fetch_subject("  ", WatchStatus::Planned).await;
        match result {
            Err(BangumiError::InvalidId(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected InvalidId error"),
        }
    }

    #[tokio::test]
    async fn test_fetch_subject_garbage_input() {
        let scraper = BangumiScraper::new().unwrap();
        let result = scraper.fetch_subject("nichijou", WatchStatus::Planned).await;
        assert!(matches!(result, Err(BangumiError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_search_empty_keyword() {
        let scraper = BangumiScraper::new().unwrap();
        let result = scraper.search("").await;
        match result {
            Err(BangumiError::InvalidId(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected InvalidId error"),
        }
    }
}
