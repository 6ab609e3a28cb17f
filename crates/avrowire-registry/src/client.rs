//! HTTP client for the schema registry
//!
//! The registry is an external HTTP service mapping numeric schema ids to
//! schema definitions. This module owns that boundary: a single GET per
//! lookup, a bounded timeout, and raw response bytes back to the caller.
//! Parsing the response is the cache's job, not the client's.

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;

use crate::error::{RegistryError, Result};

/// Default read timeout for registry fetches.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport boundary for schema lookups.
///
/// Implemented by [`HttpSchemaFetcher`] in production; tests substitute
/// in-memory fetchers to exercise the cache without a network.
#[async_trait]
pub trait SchemaFetcher: Send + Sync {
    /// Fetch the raw registry response body for `id`.
    async fn fetch(&self, id: u32) -> Result<Bytes>;
}

/// HTTP implementation of [`SchemaFetcher`].
///
/// The request URL is the configured base with the decimal id appended
/// verbatim — the base must already carry any required path separator or
/// trailing slash (caller contract, not validated here). An `https` base
/// gets TLS from the underlying client.
pub struct HttpSchemaFetcher {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpSchemaFetcher {
    /// Create a fetcher with the default 30 second timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_FETCH_TIMEOUT)
    }

    /// Create a fetcher with an explicit timeout.
    ///
    /// The timeout is installed on the client, so it bounds every fetch made
    /// through this instance.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into(),
            http_client,
        }
    }

    /// The configured registry base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SchemaFetcher for HttpSchemaFetcher {
    async fn fetch(&self, id: u32) -> Result<Bytes> {
        let url = format!("{}{}", self.base_url, id);

        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(RegistryError::HttpStatus {
                id,
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().await?;

        tracing::debug!(
            schema_id = id,
            bytes = body.len(),
            "Fetched schema from registry"
        );

        Ok(body)
    }
}
