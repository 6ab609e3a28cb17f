//! Framed Decode Walkthrough
//!
//! Demonstrates the wire format and the decode pipeline stages without
//! needing a live registry.
//!
//! ## Wire Format
//!
//! Every blob is one Avro datum behind a 5-byte header (at the default
//! 4-byte id width):
//!
//! - Byte 0: magic — `0x00` (big-endian id) or `0xFF` (little-endian id)
//! - Bytes 1-4: schema id in the magic-selected byte order
//! - Bytes 5+: Avro binary payload
//!
//! ## Against a real registry
//!
//! ```ignore
//! use avrowire_codec::{DecoderConfig, EventDecoder};
//!
//! let config = DecoderConfig::builder()
//!     .registry_base_url("http://localhost:8081/schemas/ids/")
//!     .flatten(true)
//!     .build()?;
//!
//! let decoder = EventDecoder::new(config);
//!
//! // One blob in, zero or more records out. Foreign framing, registry
//! // outages, and mismatched payloads all come back as an empty vec.
//! for record in decoder.decode(&blob).await {
//!     println!("{}", serde_json::Value::Object(record));
//! }
//! ```

use avrowire_codec::{flatten, Frame, MAGIC_BIG_ENDIAN, MAGIC_LITTLE_ENDIAN};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Both producer generations frame the same schema id differently.
    let big_endian = [MAGIC_BIG_ENDIAN, 0x00, 0x00, 0x00, 0x07, 0xDE, 0xAD];
    let little_endian = [MAGIC_LITTLE_ENDIAN, 0x07, 0x00, 0x00, 0x00, 0xDE, 0xAD];
    let foreign = [0x7B, 0x22, 0x68, 0x6F, 0x73, 0x74, 0x22]; // plain JSON bytes

    for blob in [&big_endian[..], &little_endian[..], &foreign[..]] {
        match Frame::parse(blob, 4) {
            Some(frame) => println!(
                "magic 0x{:02x} -> schema id {} (payload starts at {})",
                frame.magic, frame.schema_id, frame.payload_offset
            ),
            None => println!("foreign framing -> blob skipped"),
        }
    }

    // The flatten stage fans one decoded record out per named group entry.
    let decoded = serde_json::json!({
        "host": "web-1",
        "gauges": {"cpu.load": {"value": 1}},
        "counters": [{"name": "req.count", "count": 5}]
    });
    let record = match decoded {
        serde_json::Value::Object(record) => record,
        _ => unreachable!(),
    };

    println!("\nflatten disabled:");
    for record in flatten::flatten(&record, false) {
        println!("  {}", serde_json::Value::Object(record));
    }

    println!("flatten enabled:");
    for record in flatten::flatten(&record, true) {
        println!("  {}", serde_json::Value::Object(record));
    }
}
