//! Generic actuator over any pair of `embedded-hal` output pins.
//!
//! Lets the regulator run on a board that is not an ESP32: hand it the
//! HAL's Peltier and cooler pins and it implements [`ActuatorPort`] with
//! the same switching order as the ESP-IDF [`HardwareAdapter`].
//!
//! [`HardwareAdapter`]: super::hardware::HardwareAdapter

use embedded_hal::digital::OutputPin;

use crate::app::ports::ActuatorPort;
use crate::control::ActuatorState;
use crate::error::ActuatorError;

pub struct PinActuator<P, C> {
    peltier: P,
    cooler: C,
}

impl<P: OutputPin, C: OutputPin> PinActuator<P, C> {
    /// Takes ownership of both pins and drives them low.
    pub fn new(peltier: P, cooler: C) -> Result<Self, ActuatorError> {
        let mut this = Self { peltier, cooler };
        this.apply(ActuatorState::OFF)?;
        Ok(this)
    }

    /// Give the pins back.
    pub fn release(self) -> (P, C) {
        (self.peltier, self.cooler)
    }
}

fn drive<O: OutputPin>(pin: &mut O, on: bool, output: &'static str) -> Result<(), ActuatorError> {
    let res = if on { pin.set_high() } else { pin.set_low() };
    res.map_err(|_| ActuatorError::GpioWriteFailed { output })
}

impl<P: OutputPin, C: OutputPin> ActuatorPort for PinActuator<P, C> {
    fn apply(&mut self, state: ActuatorState) -> Result<(), ActuatorError> {
        if state.peltier_on {
            drive(&mut self.cooler, state.cooler_on, "cooler")?;
            drive(&mut self.peltier, true, "peltier")
        } else {
            drive(&mut self.peltier, false, "peltier")?;
            drive(&mut self.cooler, state.cooler_on, "cooler")
        }
    }
}
