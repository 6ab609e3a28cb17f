//! AvroWire Codec
//!
//! Decodes single framed Avro datums from a mixed-producer stream into
//! structured output records.
//!
//! ## Wire Format
//!
//! ```text
//! +----------------+----------------------+--------------------------+
//! | Magic (1 byte) | Schema id (1-4 bytes)| Avro binary payload (N)  |
//! +----------------+----------------------+--------------------------+
//! ```
//!
//! - Magic `0x00`: the schema id that follows is big-endian
//! - Magic `0xFF`: the schema id that follows is little-endian
//! - Any other magic: the whole blob is skipped
//!
//! Both variants exist in the wild from different producers, so both are
//! always accepted.
//!
//! ## Pipeline
//!
//! One call to [`EventDecoder::decode`] runs, in order:
//!
//! 1. Frame parse ([`frame`]) — extract magic, schema id, payload offset
//! 2. Schema resolution (`avrowire_registry`) — cache hit or registry fetch
//! 3. Avro binary decode ([`decode`]) — writer schema only, no projection
//! 4. Value conversion ([`convert`]) — Avro value tree to a JSON value tree
//! 5. Flattening ([`flatten`]) — optional fan-out into per-group records
//!
//! Every stage fails soft: a malformed frame, an unresolvable schema, a
//! payload/schema mismatch, or a structurally odd value each skip the blob
//! and emit nothing. A stream with a dead registry degrades to producing no
//! records; it never crashes the host.

pub mod config;
pub mod convert;
pub mod decode;
pub mod decoder;
pub mod error;
pub mod flatten;
pub mod frame;

pub use config::{DecoderConfig, DecoderConfigBuilder};
pub use decoder::EventDecoder;
pub use error::{CodecError, Result};
pub use flatten::{OutputRecord, SUBINDEX_FIELD};
pub use frame::{Frame, DEFAULT_SCHEMA_ID_WIDTH, MAGIC_BIG_ENDIAN, MAGIC_LITTLE_ENDIAN};
