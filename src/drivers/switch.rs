//! Binary output switch (MOSFET low-side driver, active HIGH).
//!
//! Used for both the Peltier element and the heatsink cooler fan.  The
//! driver remembers the last level it successfully wrote; a failed write
//! leaves the recorded level unchanged so callers never believe an output
//! is de-energised when it is not.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the GPIO via `hw_init::gpio_write`.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::error::ActuatorError;

#[derive(Debug)]
pub struct OutputSwitch {
    name: &'static str,
    gpio: i32,
    on: bool,
}

impl OutputSwitch {
    /// The pin is assumed already driven LOW by `hw_init`.
    pub fn new(name: &'static str, gpio: i32) -> Self {
        Self { name, gpio, on: false }
    }

    /// Drive the output.  Rewrites the level even when unchanged.
    pub fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        hw_init::gpio_write(self.gpio, on).map_err(|rc| {
            log::error!("{}: GPIO{} write failed (rc={})", self.name, self.gpio, rc);
            ActuatorError::GpioWriteFailed { output: self.name }
        })?;
        self.on = on;
        Ok(())
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}
