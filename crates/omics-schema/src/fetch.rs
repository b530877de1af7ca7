//! # Remote Schema Retrieval
//!
//! [`SchemaFetcher`] is the seam between [`crate::SchemaSource`] and the
//! network. [`HttpFetcher`] is the production implementation: a blocking
//! `reqwest` client with a hard [`FETCH_TIMEOUT`]. Requests are never
//! retried.

use std::time::Duration;

use omics_core::{BoxError, LoadError};

/// Upper bound on a single remote schema request.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Body of a successful remote fetch.
#[derive(Debug, Clone)]
pub struct FetchedSchema {
    /// Response body text.
    pub body: String,
    /// Declared `Content-Type`, if any. Only a hint; never trusted.
    pub content_type: Option<String>,
}

/// Retrieves the raw text of a schema published at a URL.
pub trait SchemaFetcher: Send + Sync {
    /// Perform one GET of `url`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::SchemaUnreachable`] on transport failure or any
    /// non-2xx status.
    fn fetch(&self, url: &str) -> Result<FetchedSchema, LoadError>;
}

/// Blocking HTTP fetcher backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Build a fetcher using [`FETCH_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Fails only if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, BoxError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("omicsguard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl SchemaFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedSchema, LoadError> {
        let to_unreachable = |source: BoxError| {
            tracing::error!(url, error = %source, "network error fetching schema");
            LoadError::SchemaUnreachable {
                url: url.to_string(),
                source,
            }
        };

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| to_unreachable(Box::new(e)))?;

        // Unfollowed 3xx and 1xx count as failures, not only 4xx/5xx.
        let status = response.status();
        if !status.is_success() {
            return Err(to_unreachable(format!("HTTP status {status}").into()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.text().map_err(|e| to_unreachable(Box::new(e)))?;
        Ok(FetchedSchema { body, content_type })
    }
}
