//! Outbound application events.
//!
//! The [`ControlLoop`](super::service::ControlLoop) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log a status line to the serial
//! console, emit a JSON telemetry line, etc.

use serde::Serialize;

use crate::config::SystemConfig;
use crate::control::{ActuatorState, AlarmSet, PeltierState, Sample};
use crate::error::ActuatorError;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy)]
pub enum AppEvent {
    /// The control loop has started; carries the configuration in force.
    Started(SystemConfig),

    /// One control cycle completed.
    Cycle(CycleReport),

    /// The Peltier output changed state.
    PeltierChanged { from: PeltierState, to: PeltierState },

    /// The actuator failed to drive an output this cycle.
    ActuatorFault(ActuatorError),
}

/// Everything one cycle produced, for operator display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CycleReport {
    /// Cycle sequence number, starting at 1.
    pub cycle: u32,
    /// Millisecond tick at which the cycle ran.
    pub tick_ms: u32,
    pub sample: Sample,
    pub state: ActuatorState,
    pub alarms: AlarmSet,
}
