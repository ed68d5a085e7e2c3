//! Sensor subsystem: individual drivers and the aggregating [`Sampler`].
//!
//! The sampler owns both sensor drivers and produces one [`Sample`] per
//! control cycle.  Temperature and current are read independently: a
//! failed DHT11 read does not skip the current conversion, and vice
//! versa.  A failed read becomes `None` in the sample, never a stale or
//! zero value.

pub mod current;
pub mod dht11;

use log::warn;

use crate::control::Sample;
use current::CurrentSensor;
use dht11::Dht11;

/// Aggregates the temperature and current sensors.
pub struct Sampler {
    pub dht: Dht11,
    pub current: CurrentSensor,
}

impl Sampler {
    pub fn new(dht: Dht11, current: CurrentSensor) -> Self {
        Self { dht, current }
    }

    /// Read both sensors and return a unified sample.
    ///
    /// Read failures are logged and surfaced as `None`; a single flaky
    /// sensor must not crash the control loop.
    pub fn read(&mut self) -> Sample {
        let temperature_c = match self.dht.read() {
            Ok(r) => Some(r.temperature_c),
            Err(e) => {
                warn!("DHT11 read failed: {}", e);
                None
            }
        };

        let current_a = match self.current.read() {
            Ok(a) => Some(a),
            Err(e) => {
                warn!("Current sense read failed: {}", e);
                None
            }
        };

        Sample::new(temperature_c, current_a)
    }
}
