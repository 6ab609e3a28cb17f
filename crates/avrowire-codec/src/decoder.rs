//! Decode pipeline
//!
//! [`EventDecoder`] ties the stages together: frame parse, schema
//! resolution, Avro decode, conversion, flatten. One call per blob, zero or
//! more records back.
//!
//! ## Failure stance
//!
//! Every stage failure is a typed early-out that produces an empty vec.
//! Nothing in this path panics, and nothing is surfaced to the host beyond
//! the absence of output — a mixed-producer stream is full of blobs that are
//! simply not ours, and a registry outage must degrade the pipeline, not
//! kill it. Skips are logged (`debug` for foreign framing, `warn` for
//! resolution/decode problems) so operators can see what is being dropped.
//!
//! ## Ownership
//!
//! Each decoder owns its schema cache. Two decoders configured against
//! different registries share nothing, so they cannot contaminate each
//! other's resolutions.
//!
//! ## Concurrency
//!
//! `decode` takes `&self` and performs no internal threading; the host may
//! drive one decoder from many tasks. The only await point that blocks is
//! the registry fetch on a cache miss, bounded by the configured timeout; a
//! timed-out fetch fails only its own call.

use std::sync::Arc;

use avrowire_registry::{HttpSchemaFetcher, SchemaCache, SchemaFetcher};

use crate::config::DecoderConfig;
use crate::convert;
use crate::decode;
use crate::flatten::{self, OutputRecord};
use crate::frame::Frame;

/// Streaming decoder for framed Avro datums.
pub struct EventDecoder {
    cache: SchemaCache,
    flatten_enabled: bool,
    schema_id_width: u8,
}

impl EventDecoder {
    /// Build a decoder that resolves schemas over HTTP per `config`.
    pub fn new(config: DecoderConfig) -> Self {
        let fetcher = Arc::new(HttpSchemaFetcher::with_timeout(
            config.registry_base_url.clone(),
            config.fetch_timeout,
        ));
        Self::with_fetcher(config, fetcher)
    }

    /// Build a decoder over an explicit fetcher (tests, alternative
    /// transports).
    pub fn with_fetcher(config: DecoderConfig, fetcher: Arc<dyn SchemaFetcher>) -> Self {
        Self {
            cache: SchemaCache::new(fetcher),
            flatten_enabled: config.flatten,
            schema_id_width: config.schema_id_width,
        }
    }

    /// Decode one framed blob into zero or more output records.
    pub async fn decode(&self, blob: &[u8]) -> Vec<OutputRecord> {
        let frame = match Frame::parse(blob, self.schema_id_width) {
            Some(frame) => frame,
            None => {
                tracing::debug!(len = blob.len(), "Unrecognized framing, skipping blob");
                return Vec::new();
            }
        };

        let schema = match self.cache.resolve(frame.schema_id).await {
            Some(schema) => schema,
            // Resolution failures are logged inside the cache.
            None => return Vec::new(),
        };

        let datum = match decode::decode_datum(&schema, &blob[frame.payload_offset..]) {
            Ok(datum) => datum,
            Err(e) => {
                tracing::warn!(
                    schema_id = frame.schema_id,
                    error = %e,
                    "Avro decode failed, skipping blob"
                );
                return Vec::new();
            }
        };

        let record = match convert::to_record(datum) {
            Some(record) => record,
            None => {
                tracing::warn!(
                    schema_id = frame.schema_id,
                    "Decoded datum has no top-level fields, skipping blob"
                );
                return Vec::new();
            }
        };

        flatten::flatten(&record, self.flatten_enabled)
    }

    /// The decoder's schema cache.
    pub fn cache(&self) -> &SchemaCache {
        &self.cache
    }
}
