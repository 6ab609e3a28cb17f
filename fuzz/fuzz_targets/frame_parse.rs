#![no_main]

use avrowire_codec::{Frame, MAGIC_BIG_ENDIAN, MAGIC_LITTLE_ENDIAN};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Frame parsing must never panic, whatever the bytes are.
    // Tests handling of:
    // - Empty and short inputs
    // - Unrecognized magic values
    // - Every id width, in and out of the supported range

    for width in 0u8..=8 {
        if let Some(frame) = Frame::parse(data, width) {
            // A parsed frame always has a recognized magic and an offset
            // that fits inside the input.
            assert!(frame.magic == MAGIC_BIG_ENDIAN || frame.magic == MAGIC_LITTLE_ENDIAN);
            assert!(frame.payload_offset >= 2 && frame.payload_offset <= 5);
            assert!(frame.payload_offset <= data.len());
        }
    }
});
