//! Event flattening
//!
//! Expands one decoded record into multiple flat output records, one per
//! named entry inside each nested group. The shape comes from the metrics
//! domain the stream originated in — a record like
//!
//! ```text
//! { "host": "web-1",
//!   "gauges":   { "cpu.load": { "value": 0.7 } },
//!   "counters": [ { "name": "req.count", "count": 5 } ] }
//! ```
//!
//! fans out into one record per gauge and one per counter, each carrying the
//! shared scalar fields plus the group's flattened contents — but the
//! algorithm is generic over field names, not tied to the metric group
//! names.
//!
//! Output field names never contain `.` (downstream indexers reject them),
//! so entry names are sanitized with `_` before prefixing. Name collisions
//! between flattened keys are resolved last-write-wins; there is no
//! collision detection.

use serde_json::{Map, Value};

/// Marker field identifying which group an output record was derived from.
pub const SUBINDEX_FIELD: &str = "es_subindex";

/// One emitted record: an ordered field-name → value mapping.
pub type OutputRecord = Map<String, Value>;

/// Flatten a decoded record into zero or more output records.
///
/// With `enabled == false` this is a pass-through: exactly one record with
/// all top-level fields unchanged.
///
/// With `enabled == true`:
///
/// 1. Top-level fields are partitioned into `root` (scalar values) and
///    groups (object- or array-valued fields).
/// 2. Each group fans out:
///    - array group: one record per element that is an object carrying a
///      `"name"` entry; the name is sanitized and removed, and the element's
///      remaining pairs are emitted as `{name}_{key}`. Elements without a
///      name are dropped silently.
///    - object group: one record per `(name, inner)` pair whose `inner` is
///      itself an object, flattened the same way. Non-object inners are
///      dropped silently.
///
/// Every emitted record is a copy of `root` plus the group marker
/// [`SUBINDEX_FIELD`] plus the flattened pairs. A record whose groups are
/// all empty or anomalous fans out to zero records.
pub fn flatten(record: &Map<String, Value>, enabled: bool) -> Vec<OutputRecord> {
    if !enabled {
        return vec![record.clone()];
    }

    let mut root = Map::new();
    let mut groups: Vec<(&String, &Value)> = Vec::new();

    for (key, value) in record {
        match value {
            Value::Object(_) | Value::Array(_) => groups.push((key, value)),
            _ => {
                root.insert(key.clone(), value.clone());
            }
        }
    }

    let mut out = Vec::new();

    for (group, value) in groups {
        match value {
            Value::Array(elements) => {
                for element in elements {
                    let entry = match element {
                        Value::Object(entry) => entry,
                        _ => continue,
                    };
                    // Only named elements produce records.
                    let name = match entry.get("name") {
                        Some(Value::String(name)) => sanitize(name),
                        _ => continue,
                    };

                    let mut record = root.clone();
                    record.insert(SUBINDEX_FIELD.to_string(), Value::String(group.clone()));
                    for (key, val) in entry {
                        if key == "name" {
                            continue;
                        }
                        record.insert(format!("{}_{}", name, key), val.clone());
                    }
                    out.push(record);
                }
            }
            Value::Object(entries) => {
                for (name, inner) in entries {
                    let inner = match inner {
                        Value::Object(inner) => inner,
                        _ => continue,
                    };
                    let name = sanitize(name);

                    let mut record = root.clone();
                    record.insert(SUBINDEX_FIELD.to_string(), Value::String(group.clone()));
                    for (key, val) in inner {
                        record.insert(format!("{}_{}", name, key), val.clone());
                    }
                    out.push(record);
                }
            }
            _ => {}
        }
    }

    out
}

fn sanitize(name: &str) -> String {
    name.replace('.', "_")
}
