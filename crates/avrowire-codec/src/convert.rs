//! Decoded-value conversion
//!
//! Turns the `apache_avro` value tree into a `serde_json` value tree, the
//! shape the flattener and the downstream sink consume. The JSON tree is the
//! tagged Scalar/Sequence/Mapping representation the rest of the pipeline
//! pattern-matches on: `Object` is a mapping, `Array` is a sequence,
//! everything else is a scalar.
//!
//! Conversion rules:
//!
//! - records and maps become objects (field order preserved for records)
//! - unions unwrap to their inner value
//! - enums become their symbol strings
//! - date/time logical types surface as their underlying integers
//! - bytes and fixed become arrays of byte values

use apache_avro::types::Value as AvroValue;
use serde_json::{Map, Number, Value as JsonValue};

/// Convert a decoded Avro value into a JSON value.
pub fn to_json(value: AvroValue) -> JsonValue {
    match value {
        AvroValue::Null => JsonValue::Null,
        AvroValue::Boolean(b) => JsonValue::Bool(b),
        AvroValue::Int(i) => JsonValue::Number(i.into()),
        AvroValue::Long(l) => JsonValue::Number(l.into()),
        AvroValue::Float(f) => float_to_json(f as f64),
        AvroValue::Double(d) => float_to_json(d),
        AvroValue::String(s) => JsonValue::String(s),
        AvroValue::Enum(_, symbol) => JsonValue::String(symbol),
        AvroValue::Bytes(bytes) | AvroValue::Fixed(_, bytes) => {
            JsonValue::Array(bytes.into_iter().map(|b| JsonValue::Number(b.into())).collect())
        }
        AvroValue::Union(_, inner) => to_json(*inner),
        AvroValue::Array(items) => JsonValue::Array(items.into_iter().map(to_json).collect()),
        AvroValue::Map(entries) => {
            let mut object = Map::with_capacity(entries.len());
            for (key, value) in entries {
                object.insert(key, to_json(value));
            }
            JsonValue::Object(object)
        }
        AvroValue::Record(fields) => {
            let mut object = Map::with_capacity(fields.len());
            for (name, value) in fields {
                object.insert(name, to_json(value));
            }
            JsonValue::Object(object)
        }
        AvroValue::Date(days) => JsonValue::Number(days.into()),
        AvroValue::TimeMillis(t) => JsonValue::Number(t.into()),
        AvroValue::TimeMicros(t) => JsonValue::Number(t.into()),
        AvroValue::TimestampMillis(t) => JsonValue::Number(t.into()),
        AvroValue::TimestampMicros(t) => JsonValue::Number(t.into()),
        AvroValue::Uuid(uuid) => JsonValue::String(uuid.to_string()),
        other => {
            // Remaining logical types (decimals, durations, nanosecond
            // timestamps) have no natural JSON scalar; they are not produced
            // by the supported producers.
            tracing::debug!(value = ?other, "Unsupported Avro value variant, emitting null");
            JsonValue::Null
        }
    }
}

/// Convert a decoded top-level datum into a field/value mapping.
///
/// Returns `None` when the datum is not a record or map — such a datum has
/// no top-level fields to emit, so the blob is skipped as a structural
/// anomaly.
pub fn to_record(value: AvroValue) -> Option<Map<String, JsonValue>> {
    match to_json(value) {
        JsonValue::Object(object) => Some(object),
        _ => None,
    }
}

fn float_to_json(f: f64) -> JsonValue {
    // NaN and infinities have no JSON representation.
    match Number::from_f64(f) {
        Some(n) => JsonValue::Number(n),
        None => JsonValue::Null,
    }
}
