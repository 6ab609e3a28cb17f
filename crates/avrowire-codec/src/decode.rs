//! Avro binary datum decoding
//!
//! Thin wrapper over `apache_avro::from_avro_datum`. The payload is decoded
//! with the writer schema as-is; no reader-schema projection is performed,
//! so schema evolution across versions is the registry's responsibility, not
//! this decoder's.

use apache_avro::types::Value;
use apache_avro::Schema;

use crate::error::{CodecError, Result};

/// Decode one Avro binary-encoded datum under `schema`.
///
/// Truncated payloads and schema/payload mismatches come back as
/// [`CodecError::Decode`]; the pipeline treats them as skip-and-emit-nothing.
pub fn decode_datum(schema: &Schema, mut payload: &[u8]) -> Result<Value> {
    apache_avro::from_avro_datum(schema, &mut payload, None)
        .map_err(|e| CodecError::Decode(e.to_string()))
}
