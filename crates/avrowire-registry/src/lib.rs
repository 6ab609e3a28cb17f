//! AvroWire Schema Registry Client
//!
//! Resolves Avro schemas by numeric id against a remote schema registry and
//! caches the parsed results for the lifetime of the process.
//!
//! # Features
//!
//! - **Read-through cache**: schemas are fetched once per id and cached
//!   permanently (registry ids are immutable, so no TTL or eviction)
//! - **Bounded fetch**: every registry request carries a client-level timeout
//! - **Failure collapse**: any miss-path failure (network, timeout, bad JSON,
//!   bad schema text) resolves to "not found" so the caller can skip the
//!   record instead of crashing the stream
//! - **Pluggable transport**: the HTTP boundary is a trait, so tests can
//!   substitute an in-memory fetcher
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use avrowire_registry::{HttpSchemaFetcher, SchemaCache};
//!
//! // Base URL carries its own trailing slash; ids are appended verbatim.
//! let fetcher = Arc::new(HttpSchemaFetcher::new("http://localhost:8081/schemas/ids/"));
//! let cache = SchemaCache::new(fetcher);
//!
//! match cache.resolve(42).await {
//!     Some(schema) => { /* decode with the writer schema */ }
//!     None => { /* skip this record; next call retries the fetch */ }
//! }
//! ```

pub mod cache;
pub mod client;
pub mod error;

pub use cache::SchemaCache;
pub use client::{HttpSchemaFetcher, SchemaFetcher, DEFAULT_FETCH_TIMEOUT};
pub use error::{RegistryError, Result};
