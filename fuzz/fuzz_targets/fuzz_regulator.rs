//! Fuzz target: `Regulator::step`
//!
//! Feeds arbitrary sample sequences (including NaN, infinities and missing
//! readings) through the regulator, threading state between steps.  After
//! every step the Peltier never runs without the cooler, a sensor-fault
//! step returns the previous state, and a step with a valid temperature
//! only leaves the Peltier on with current inside the window.
//!
//! cargo fuzz run fuzz_regulator

#![no_main]

use libfuzzer_sys::fuzz_target;
use thermoreg::control::{ActuatorState, Regulator, Sample};

fn reading(bytes: &[u8]) -> Option<f32> {
    // Leading 0xFF marks a failed read.
    match bytes {
        [0xFF, ..] => None,
        [_, a, b, c, d] => Some(f32::from_le_bytes([*a, *b, *c, *d])),
        _ => None,
    }
}

fuzz_target!(|data: &[u8]| {
    let regulator = Regulator::default();
    let th = *regulator.thresholds();
    let mut state = ActuatorState::OFF;

    for chunk in data.chunks_exact(10) {
        let sample = Sample::new(reading(&chunk[..5]), reading(&chunk[5..]));
        let d = regulator.step(&sample, state);

        assert!(!d.state.peltier_on || d.state.cooler_on, "Peltier on without cooler");
        if sample.temperature_c.is_none() {
            assert_eq!(d.state, state, "sensor fault must hold state");
        } else if d.state.peltier_on {
            assert!(sample.current_a.is_some_and(|c| th.current_in_window(c)));
        }
        state = d.state;
    }
});
