//! Read-through Schema Cache
//!
//! Maps schema ids to parsed Avro schemas. Misses fall through to the
//! registry fetcher; hits never touch the network.
//!
//! ## Lifetime
//!
//! Registry ids are immutable — once an id is assigned a schema it never
//! changes — so entries are cached permanently for the lifetime of the
//! cache. There is no TTL and no eviction.
//!
//! ## Failure collapse
//!
//! Every way the miss path can fail (transport error, timeout, non-2xx,
//! empty body, malformed JSON, missing `"schema"` field, unparseable schema
//! text) collapses to `None` from [`SchemaCache::resolve`]. Nothing is
//! inserted on failure, so the next resolution of the same id retries the
//! fetch. The error itself is logged at `warn` and goes no further.
//!
//! ## Concurrency
//!
//! The map is guarded by an async `RwLock`: lookups take the read lock,
//! inserts the write lock. Concurrent misses for the same id may both fetch;
//! the fetch is idempotent and both produce the same entry, so the race is
//! harmless and not prevented.

use std::collections::HashMap;
use std::sync::Arc;

use apache_avro::Schema;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::client::SchemaFetcher;
use crate::error::{RegistryError, Result};

/// Registry response envelope: JSON carrying the Avro schema as a string.
#[derive(Debug, Deserialize)]
struct SchemaEnvelope {
    schema: String,
}

/// In-memory id → parsed-schema cache, filled on miss via a [`SchemaFetcher`].
pub struct SchemaCache {
    fetcher: Arc<dyn SchemaFetcher>,
    schemas: RwLock<HashMap<u32, Arc<Schema>>>,
}

impl SchemaCache {
    pub fn new(fetcher: Arc<dyn SchemaFetcher>) -> Self {
        Self {
            fetcher,
            schemas: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve a schema id to its parsed schema.
    ///
    /// Returns `None` when the id cannot be resolved for any reason; the
    /// caller is expected to skip the record. A `None` today does not poison
    /// tomorrow: failed lookups leave the cache untouched.
    pub async fn resolve(&self, id: u32) -> Option<Arc<Schema>> {
        if let Some(schema) = self.schemas.read().await.get(&id) {
            return Some(Arc::clone(schema));
        }

        match self.fetch_and_parse(id).await {
            Ok(schema) => {
                let schema = Arc::new(schema);
                // Two tasks racing the same miss both land here; the entries
                // are identical so last write wins.
                self.schemas
                    .write()
                    .await
                    .insert(id, Arc::clone(&schema));

                tracing::debug!(schema_id = id, "Cached schema");
                Some(schema)
            }
            Err(e) => {
                tracing::warn!(
                    schema_id = id,
                    error = %e,
                    "Schema resolution failed, record will be skipped"
                );
                None
            }
        }
    }

    async fn fetch_and_parse(&self, id: u32) -> Result<Schema> {
        let body = self.fetcher.fetch(id).await?;

        if body.is_empty() {
            return Err(RegistryError::EmptyResponse(id));
        }

        let envelope: SchemaEnvelope = serde_json::from_slice(&body)?;

        Schema::parse_str(&envelope.schema).map_err(|e| RegistryError::InvalidSchema {
            id,
            reason: e.to_string(),
        })
    }

    /// Whether `id` is already cached (no fetch is triggered).
    pub async fn contains(&self, id: u32) -> bool {
        self.schemas.read().await.contains_key(&id)
    }

    /// Number of cached schemas.
    pub async fn len(&self) -> usize {
        self.schemas.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.schemas.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const RECORD_SCHEMA: &str =
        r#"{"type":"record","name":"Event","fields":[{"name":"host","type":"string"}]}"#;

    fn envelope(schema: &str) -> Bytes {
        Bytes::from(serde_json::json!({ "schema": schema }).to_string())
    }

    /// Serves a fixed body and counts fetches.
    struct MemoryFetcher {
        body: Bytes,
        fetches: AtomicUsize,
    }

    impl MemoryFetcher {
        fn new(body: Bytes) -> Self {
            Self {
                body,
                fetches: AtomicUsize::new(0),
            }
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SchemaFetcher for MemoryFetcher {
        async fn fetch(&self, _id: u32) -> Result<Bytes> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.clone())
        }
    }

    /// Fails the first `failures` fetches, then serves the body.
    struct FlakyFetcher {
        body: Bytes,
        failures: usize,
        fetches: AtomicUsize,
    }

    #[async_trait]
    impl SchemaFetcher for FlakyFetcher {
        async fn fetch(&self, id: u32) -> Result<Bytes> {
            let attempt = self.fetches.fetch_add(1, Ordering::SeqCst);
            if attempt < self.failures {
                Err(RegistryError::HttpStatus { id, status: 500 })
            } else {
                Ok(self.body.clone())
            }
        }
    }

    // ========================================================================
    // Hit / miss behavior
    // ========================================================================

    #[tokio::test]
    async fn test_miss_fetches_and_caches() {
        let fetcher = Arc::new(MemoryFetcher::new(envelope(RECORD_SCHEMA)));
        let cache = SchemaCache::new(Arc::clone(&fetcher) as Arc<dyn SchemaFetcher>);

        let schema = cache.resolve(7).await;
        assert!(schema.is_some());
        assert!(cache.contains(7).await);
        assert_eq!(fetcher.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_second_resolve_does_no_io() {
        let fetcher = Arc::new(MemoryFetcher::new(envelope(RECORD_SCHEMA)));
        let cache = SchemaCache::new(Arc::clone(&fetcher) as Arc<dyn SchemaFetcher>);

        let first = cache.resolve(7).await.unwrap();
        let second = cache.resolve(7).await.unwrap();

        assert_eq!(fetcher.fetch_count(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_distinct_ids_fetch_separately() {
        let fetcher = Arc::new(MemoryFetcher::new(envelope(RECORD_SCHEMA)));
        let cache = SchemaCache::new(Arc::clone(&fetcher) as Arc<dyn SchemaFetcher>);

        cache.resolve(1).await.unwrap();
        cache.resolve(2).await.unwrap();

        assert_eq!(fetcher.fetch_count(), 2);
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test]
    async fn test_concurrent_same_id_yields_one_entry() {
        let fetcher = Arc::new(MemoryFetcher::new(envelope(RECORD_SCHEMA)));
        let cache = Arc::new(SchemaCache::new(
            Arc::clone(&fetcher) as Arc<dyn SchemaFetcher>
        ));

        let (a, b) = tokio::join!(cache.resolve(9), cache.resolve(9));
        assert!(a.is_some());
        assert!(b.is_some());

        // Both misses may fetch (idempotent re-fetch is allowed), but the
        // cache must converge to a single entry.
        assert!(fetcher.fetch_count() >= 1);
        assert_eq!(cache.len().await, 1);
    }

    // ========================================================================
    // Failure collapse — every miss-path failure resolves to None
    // ========================================================================

    #[tokio::test]
    async fn test_http_failure_resolves_to_none_and_caches_nothing() {
        let fetcher = Arc::new(FlakyFetcher {
            body: envelope(RECORD_SCHEMA),
            failures: usize::MAX,
            fetches: AtomicUsize::new(0),
        });
        let cache = SchemaCache::new(fetcher as Arc<dyn SchemaFetcher>);

        assert!(cache.resolve(3).await.is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_failure_then_success_populates() {
        let fetcher = Arc::new(FlakyFetcher {
            body: envelope(RECORD_SCHEMA),
            failures: 1,
            fetches: AtomicUsize::new(0),
        });
        let cache = SchemaCache::new(Arc::clone(&fetcher) as Arc<dyn SchemaFetcher>);

        // First attempt fails and must not leave a tombstone behind.
        assert!(cache.resolve(3).await.is_none());
        assert!(!cache.contains(3).await);

        // Retry on the next call succeeds and populates the cache.
        assert!(cache.resolve(3).await.is_some());
        assert!(cache.contains(3).await);
        assert_eq!(fetcher.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_body_resolves_to_none() {
        let fetcher = Arc::new(MemoryFetcher::new(Bytes::new()));
        let cache = SchemaCache::new(fetcher as Arc<dyn SchemaFetcher>);

        assert!(cache.resolve(4).await.is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_non_json_body_resolves_to_none() {
        let fetcher = Arc::new(MemoryFetcher::new(Bytes::from_static(b"<html>oops</html>")));
        let cache = SchemaCache::new(fetcher as Arc<dyn SchemaFetcher>);

        assert!(cache.resolve(4).await.is_none());
    }

    #[tokio::test]
    async fn test_missing_schema_field_resolves_to_none() {
        let fetcher = Arc::new(MemoryFetcher::new(Bytes::from_static(
            br#"{"subject":"events-value","version":3}"#,
        )));
        let cache = SchemaCache::new(fetcher as Arc<dyn SchemaFetcher>);

        assert!(cache.resolve(4).await.is_none());
    }

    #[tokio::test]
    async fn test_invalid_schema_text_resolves_to_none() {
        let fetcher = Arc::new(MemoryFetcher::new(envelope("not an avro schema")));
        let cache = SchemaCache::new(fetcher as Arc<dyn SchemaFetcher>);

        assert!(cache.resolve(4).await.is_none());
        assert!(cache.is_empty().await);
    }

    // ========================================================================
    // Envelope parsing
    // ========================================================================

    #[tokio::test]
    async fn test_envelope_with_extra_fields_is_accepted() {
        // Real registries return subject/version/id alongside the schema.
        let body = Bytes::from(
            serde_json::json!({
                "id": 7,
                "subject": "events-value",
                "version": 2,
                "schema": RECORD_SCHEMA,
            })
            .to_string(),
        );
        let fetcher = Arc::new(MemoryFetcher::new(body));
        let cache = SchemaCache::new(fetcher as Arc<dyn SchemaFetcher>);

        assert!(cache.resolve(7).await.is_some());
    }

    #[tokio::test]
    async fn test_primitive_schema_resolves() {
        let fetcher = Arc::new(MemoryFetcher::new(envelope(r#"{"type":"string"}"#)));
        let cache = SchemaCache::new(fetcher as Arc<dyn SchemaFetcher>);

        let schema = cache.resolve(1).await.unwrap();
        assert_eq!(*schema, Schema::String);
    }
}
