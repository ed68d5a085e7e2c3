//! Hysteretic (bang-bang) Peltier regulator.
//!
//! A pure step function: `(Sample, previous ActuatorState) → Decision`.
//! It owns no I/O and never blocks, so the whole decision table can be
//! exercised on the host.
//!
//! ```text
//!                 T > max+hyst  AND  I in window
//!   ┌────────────┐ ─────────────────────────────▶ ┌─────────┐
//!   │ Disengaged │                                │ Engaged │
//!   └────────────┘ ◀───────────────────────────── └─────────┘
//!                 T < min-hyst  OR  I outside window
//! ```
//!
//! Between the two guards the Peltier keeps its previous state. When both
//! would fire, disengage wins.

use serde::Serialize;

use crate::config::Thresholds;

use super::alarms::{Alarm, AlarmSet};

/// One control-cycle reading. `None` marks a failed read.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Sample {
    pub temperature_c: Option<f32>,
    pub current_a: Option<f32>,
}

impl Sample {
    pub fn new(temperature_c: Option<f32>, current_a: Option<f32>) -> Self {
        Self {
            temperature_c: temperature_c.filter(|t| t.is_finite()),
            current_a: current_a.filter(|c| c.is_finite()),
        }
    }

    /// Build from raw floats, mapping NaN and infinities to "invalid".
    pub fn from_raw(temperature_c: f32, current_a: f32) -> Self {
        Self::new(Some(temperature_c), Some(current_a))
    }
}

/// Peltier output as a two-state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PeltierState {
    Disengaged,
    Engaged,
}

/// Commanded state of the two binary outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ActuatorState {
    pub peltier_on: bool,
    pub cooler_on: bool,
}

impl ActuatorState {
    /// Both outputs off; the state at power-on.
    pub const OFF: Self = Self {
        peltier_on: false,
        cooler_on: false,
    };

    pub fn peltier_state(&self) -> PeltierState {
        if self.peltier_on {
            PeltierState::Engaged
        } else {
            PeltierState::Disengaged
        }
    }
}

/// Output of one regulator step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub state: ActuatorState,
    pub alarms: AlarmSet,
}

pub struct Regulator {
    thresholds: Thresholds,
}

impl Regulator {
    pub const fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Compute the next actuator state and this cycle's alarms.
    pub fn step(&self, sample: &Sample, prev: ActuatorState) -> Decision {
        let th = &self.thresholds;

        // Invalid current reads as out-of-window.
        let current_ok = sample.current_a.is_some_and(|c| th.current_in_window(c));

        let state = match sample.temperature_c {
            Some(t) => {
                let engage = t > th.engage_above_c() && current_ok;
                let disengage = t < th.disengage_below_c() || !current_ok;
                let peltier_on = if disengage {
                    false
                } else if engage {
                    true
                } else {
                    prev.peltier_on
                };
                ActuatorState {
                    peltier_on,
                    cooler_on: peltier_on || t > th.cooler_assist_above_c(),
                }
            }
            // Sensor fault: hold the last known-good command.
            None => prev,
        };

        Decision {
            state,
            alarms: self.alarms(sample, state),
        }
    }

    /// Alarms are evaluated against the post-decision `state`.
    fn alarms(&self, sample: &Sample, state: ActuatorState) -> AlarmSet {
        let th = &self.thresholds;
        let mut alarms = AlarmSet::EMPTY;

        match sample.current_a {
            Some(c) => {
                alarms.raise_if(Alarm::CurrentLow, c < th.min_current_a && state.peltier_on);
                alarms.raise_if(Alarm::CurrentHigh, c > th.max_current_a);
            }
            None => alarms.insert(Alarm::CurrentSenseFault),
        }

        match sample.temperature_c {
            Some(t) => {
                alarms.raise_if(Alarm::TempCriticalHigh, t > th.critical_high_above_c());
                alarms.raise_if(Alarm::TempCriticalLow, t < th.critical_low_below_c());
            }
            None => alarms.insert(Alarm::SensorFault),
        }

        alarms
    }
}

impl Default for Regulator {
    fn default() -> Self {
        Self::new(Thresholds::REFERENCE)
    }
}
