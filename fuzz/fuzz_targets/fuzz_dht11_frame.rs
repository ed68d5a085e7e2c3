//! Fuzz target: `dht11::decode_frame`
//!
//! Arbitrary 5-byte frames must either be rejected or decode to a finite
//! reading inside the sensor's plausible range.
//!
//! cargo fuzz run fuzz_dht11_frame

#![no_main]

use libfuzzer_sys::fuzz_target;
use thermoreg::sensors::dht11::decode_frame;

fuzz_target!(|frame: [u8; 5]| {
    if let Ok(r) = decode_frame(&frame) {
        assert!(r.temperature_c.is_finite());
        assert!((-40.0..=80.0).contains(&r.temperature_c));
        assert!((0.0..=100.0).contains(&r.humidity_pct));
        let sum = frame[..4].iter().fold(0u8, |a, b| a.wrapping_add(*b));
        assert_eq!(sum, frame[4], "accepted a frame with a bad checksum");
    }
});
