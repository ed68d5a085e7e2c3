//! Hardware adapter, bridging real peripherals to the domain port traits.
//!
//! Owns the [`Sampler`] and both output switches, exposing them through
//! [`SamplerPort`] and [`ActuatorPort`].  This is the only module in the
//! system that touches actual hardware.  On non-espidf targets the
//! underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{ActuatorPort, SamplerPort};
use crate::control::{ActuatorState, Sample};
use crate::drivers::switch::OutputSwitch;
use crate::error::ActuatorError;
use crate::pins;
use crate::sensors::Sampler;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sampler: Sampler,
    peltier: OutputSwitch,
    cooler: OutputSwitch,
}

impl HardwareAdapter {
    pub fn new(sampler: Sampler) -> Self {
        Self {
            sampler,
            peltier: OutputSwitch::new("peltier", pins::PELTIER_GPIO),
            cooler: OutputSwitch::new("cooler", pins::COOLER_GPIO),
        }
    }

    /// Levels last written successfully to the output pins.
    pub fn outputs(&self) -> ActuatorState {
        ActuatorState {
            peltier_on: self.peltier.is_on(),
            cooler_on: self.cooler.is_on(),
        }
    }
}

// ── SamplerPort implementation ────────────────────────────────

impl SamplerPort for HardwareAdapter {
    fn sample(&mut self) -> Sample {
        self.sampler.read()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn apply(&mut self, state: ActuatorState) -> Result<(), ActuatorError> {
        // A failed first write aborts before the second, so the Peltier is
        // never energised without its cooler.
        if state.peltier_on {
            self.cooler.set(state.cooler_on)?;
            self.peltier.set(true)
        } else {
            self.peltier.set(false)?;
            self.cooler.set(state.cooler_on)
        }
    }
}
