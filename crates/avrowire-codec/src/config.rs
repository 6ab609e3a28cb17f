//! Decoder configuration
//!
//! The host adapter supplies a small set of values; everything else is
//! defaulted. Built through [`DecoderConfig::builder`], which validates the
//! one required field.

use std::time::Duration;

use crate::error::{CodecError, Result};
use crate::frame::DEFAULT_SCHEMA_ID_WIDTH;

pub use avrowire_registry::DEFAULT_FETCH_TIMEOUT;

/// Configuration for an [`EventDecoder`](crate::EventDecoder).
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    /// Registry base URL; the schema id is appended verbatim, so the base
    /// must carry its own trailing slash or path separator.
    pub registry_base_url: String,

    /// Fan decoded records out per nested group instead of passing them
    /// through whole.
    pub flatten: bool,

    /// Schema id width in bytes on the wire, `1..=4`.
    pub schema_id_width: u8,

    /// Bound on each registry fetch.
    pub fetch_timeout: Duration,
}

impl DecoderConfig {
    pub fn builder() -> DecoderConfigBuilder {
        DecoderConfigBuilder::default()
    }
}

/// Builder for [`DecoderConfig`].
#[derive(Debug, Default)]
pub struct DecoderConfigBuilder {
    registry_base_url: Option<String>,
    flatten: bool,
    schema_id_width: Option<u8>,
    fetch_timeout: Option<Duration>,
}

impl DecoderConfigBuilder {
    /// Registry base URL (required).
    pub fn registry_base_url(mut self, url: impl Into<String>) -> Self {
        self.registry_base_url = Some(url.into());
        self
    }

    /// Enable or disable flattening (default: disabled).
    pub fn flatten(mut self, enabled: bool) -> Self {
        self.flatten = enabled;
        self
    }

    /// Schema id width in bytes (default: 4). Values outside `1..=4` are
    /// clamped.
    pub fn schema_id_width(mut self, width: u8) -> Self {
        self.schema_id_width = Some(width);
        self
    }

    /// Registry fetch timeout (default: 30 s).
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<DecoderConfig> {
        let registry_base_url = self
            .registry_base_url
            .ok_or_else(|| CodecError::Config("registry_base_url is required".to_string()))?;

        Ok(DecoderConfig {
            registry_base_url,
            flatten: self.flatten,
            schema_id_width: self
                .schema_id_width
                .unwrap_or(DEFAULT_SCHEMA_ID_WIDTH)
                .clamp(1, 4),
            fetch_timeout: self.fetch_timeout.unwrap_or(DEFAULT_FETCH_TIMEOUT),
        })
    }
}
