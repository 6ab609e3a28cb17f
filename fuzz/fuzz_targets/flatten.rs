#![no_main]

use avrowire_codec::flatten::flatten;
use avrowire_codec::SUBINDEX_FIELD;
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

fuzz_target!(|data: &[u8]| {
    // Flattening must never panic on any record shape JSON can express.

    let record = match serde_json::from_slice::<Map<String, Value>>(data) {
        Ok(record) => record,
        Err(_) => return,
    };

    // Disabled: exactly one record, equal to the input.
    let passthrough = flatten(&record, false);
    assert_eq!(passthrough.len(), 1);
    assert_eq!(passthrough[0], record);

    // Enabled: every emitted record carries the group marker.
    for out in flatten(&record, true) {
        assert!(out.contains_key(SUBINDEX_FIELD));
    }
});
