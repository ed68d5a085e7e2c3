//! Port traits: the hexagonal boundary between decision logic and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlLoop (domain)
//! ```
//!
//! Driven adapters (sensors, output stages, reporters, clocks) implement
//! these traits.  The [`ControlLoop`](super::service::ControlLoop)
//! consumes them via generics, so the regulator never touches hardware
//! directly.  Each hardware target supplies only thin adapters.

use crate::control::{ActuatorState, Sample};
use crate::error::ActuatorError;

// ───────────────────────────────────────────────────────────────
// Sampler port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per cycle.
///
/// Implementations must surface a failed read as `None` in the returned
/// [`Sample`], never as `0.0` or as the previous value.  Any bounded wait
/// (ADC conversion, sensor handshake) belongs here, not in the regulator.
pub trait SamplerPort {
    fn sample(&mut self) -> Sample;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: drives both binary outputs to match `state`.
///
/// Called every cycle even when the state is unchanged, so a missed write
/// is corrected on the next cycle.  Implementations must never leave the
/// Peltier energised with the cooler off: switch the cooler on first when
/// engaging and the Peltier off first when disengaging.
pub trait ActuatorPort {
    fn apply(&mut self, state: ActuatorState) -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log, JSON
/// telemetry line, in-memory recorder in tests).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond tick (wraps at `u32::MAX`).
pub trait ClockPort {
    fn now_ms(&self) -> u32;
}

/// Fan an event out to two sinks.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn emit(&mut self, event: &super::events::AppEvent) {
        self.0.emit(event);
        self.1.emit(event);
    }
}
