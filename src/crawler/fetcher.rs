//! HTTP fetcher implementation
//!
//! This module is the single place where request identity and timeout policy
//! live. Every listing and detail request goes through `Fetcher`, which:
//! - Sends a desktop-browser User-Agent and an Accept-Language header
//! - Applies a whole-request timeout
//! - Classifies failures and downgrades them to "no body" for the caller

use crate::config::ClientConfig;
use crate::{ConfigError, GuideError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, body read failure, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns true if the page body was retrieved
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the body on success, None on any failure
    pub fn into_body(self) -> Option<String> {
        match self {
            Self::Success { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Builds an HTTP client with the configured identity and timeout
///
/// # Example
///
/// ```no_run
/// use guide_crawler::config::ClientConfig;
/// use guide_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&ClientConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &ClientConfig) -> Result<Client, GuideError> {
    let accept_language = HeaderValue::from_str(&config.accept_language).map_err(|e| {
        ConfigError::Validation(format!(
            "invalid accept_language {:?}: {}",
            config.accept_language, e
        ))
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT_LANGUAGE, accept_language);

    let client = Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Page fetcher shared by the listing and detail processors
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a fetcher from client configuration
    pub fn new(config: &ClientConfig) -> Result<Self, GuideError> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Fetches a URL, classifying the outcome
    ///
    /// This never returns an error; every failure is logged and reported as
    /// `HttpError` or `NetworkError`.
    pub async fn fetch(&self, url: &Url) -> FetchResult {
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                let error = if e.is_timeout() {
                    "Request timeout".to_string()
                } else if e.is_connect() {
                    format!("Connection failed: {}", e)
                } else {
                    e.to_string()
                };
                tracing::warn!("Failed to fetch {}: {}", url, error);
                return FetchResult::NetworkError { error };
            }
        };

        let status = response.status();
        let final_url = response.url().to_string();

        if !status.is_success() {
            tracing::warn!("Failed to fetch {}: HTTP {}", url, status.as_u16());
            return FetchResult::HttpError {
                status_code: status.as_u16(),
            };
        }

        match response.text().await {
            Ok(body) => {
                tracing::debug!("Fetched {} ({} bytes)", final_url, body.len());
                FetchResult::Success {
                    final_url,
                    status_code: status.as_u16(),
                    body,
                }
            }
            Err(e) => {
                tracing::warn!("Failed to read body of {}: {}", url, e);
                FetchResult::NetworkError {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Fetches a URL and returns its body, or None on any failure
    pub async fn fetch_body(&self, url: &Url) -> Option<String> {
        self.fetch(url).await.into_body()
    }
}
