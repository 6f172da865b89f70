//! HTTP client for bangumi pages
//!
//! One GET per fetch with a fixed user agent and timeout. Failures are
//! returned to the caller as-is; retrying is the caller's decision.

use std::time::Duration;

use crate::encoding::decode_body;
use crate::error::{BangumiError, Result};
use crate::url::BASE_URL;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Catalog site used for bare ids and searches (default: https://chii.in)
    pub base_url: String,
    /// Request timeout in seconds (default: 15)
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout_secs: 15,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// HTTP client wrapper
///
/// Handles all HTTP communication with the catalog site, including
/// status checking and body decoding.
pub struct BangumiClient {
    client: reqwest::Client,
    base_url: String,
}

impl BangumiClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            reqwest::header::HeaderValue::from_static("zh-CN,zh;q=0.9,ja;q=0.8,en;q=0.7"),
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent)
            .default_headers(headers)
            .build()
            .map_err(BangumiError::HttpError)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL used to expand bare ids and build search URLs
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a page and return its decoded HTML
    ///
    /// # Arguments
    /// * `url` - Absolute URL to fetch
    ///
    /// # Errors
    /// - `InvalidUrl` - The URL is not absolute http(s)
    /// - `HttpError` - Connection failure, timeout, or unreadable body
    /// - `HttpStatus` - The server answered with a non-2xx status
    pub async fn fetch(&self, url: &str) -> Result<String> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(BangumiError::InvalidUrl(url.to_string()));
        }

        tracing::debug!(url, "fetching page");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(BangumiError::HttpError)?;

        let status = response.status();
        tracing::debug!(url, status = status.as_u16(), "received response");
        if !status.is_success() {
            return Err(BangumiError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await.map_err(BangumiError::HttpError)?;
        Ok(decode_body(&bytes, content_type.as_deref()))
    }
}
