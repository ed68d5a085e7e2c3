//! Control loop service, the hexagonal core.
//!
//! [`ControlLoop`] owns the regulator, the cycle cadence, and the single
//! piece of state carried between cycles: the last commanded
//! [`ActuatorState`].  All I/O flows through port traits injected at call
//! sites, making the whole loop testable with mock adapters.
//!
//! ```text
//!  SamplerPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                  │      ControlLoop        │
//! ActuatorPort ◀── │  Cadence · Regulator    │
//!                  └────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::config::SystemConfig;
use crate::control::{ActuatorState, Regulator};
use crate::scheduler::Cadence;

use super::events::{AppEvent, CycleReport};
use super::ports::{ActuatorPort, EventSink, SamplerPort};

/// Sampler → Regulator → Actuator/Reporter, once per cadence period.
pub struct ControlLoop {
    config: SystemConfig,
    regulator: Regulator,
    cadence: Cadence,
    /// Commanded output state; the controller's only memory.
    state: ActuatorState,
    cycles: u32,
}

impl ControlLoop {
    /// Construct the loop from configuration.  Outputs start off.
    ///
    /// Does **not** touch hardware; call [`start`](Self::start) next.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            config,
            regulator: Regulator::new(config.thresholds),
            cadence: Cadence::new(config.cycle_period_ms),
            state: ActuatorState::OFF,
            cycles: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive both outputs low and announce the configuration.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        self.state = ActuatorState::OFF;
        if let Err(e) = hw.apply(self.state) {
            warn!("Initial output reset failed: {}", e);
            sink.emit(&AppEvent::ActuatorFault(e));
        }
        sink.emit(&AppEvent::Started(self.config));
        info!(
            "ControlLoop started (period={}ms)",
            self.cadence.period_ms()
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run a cycle if the cadence is due at `now_ms`; otherwise return
    /// immediately with `None`.
    pub fn poll(
        &mut self,
        now_ms: u32,
        hw: &mut (impl SamplerPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) -> Option<CycleReport> {
        if !self.cadence.ready(now_ms) {
            return None;
        }
        Some(self.run_cycle(now_ms, hw, sink))
    }

    /// Run one full cycle unconditionally: sample → decide → apply → report.
    ///
    /// The `hw` parameter satisfies **both** [`SamplerPort`] and
    /// [`ActuatorPort`], avoiding a double mutable borrow while keeping
    /// the port boundary explicit.
    pub fn run_cycle(
        &mut self,
        now_ms: u32,
        hw: &mut (impl SamplerPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) -> CycleReport {
        self.cycles = self.cycles.wrapping_add(1);

        // 1. Sample via SamplerPort
        let sample = hw.sample();

        // 2. Decide
        let prev = self.state;
        let decision = self.regulator.step(&sample, prev);
        self.state = decision.state;

        // 3. Apply via ActuatorPort, every cycle
        if let Err(e) = hw.apply(self.state) {
            warn!("Actuator write failed (cycle {}): {}", self.cycles, e);
            sink.emit(&AppEvent::ActuatorFault(e));
        }

        // 4. Report
        if prev.peltier_on != self.state.peltier_on {
            sink.emit(&AppEvent::PeltierChanged {
                from: prev.peltier_state(),
                to: self.state.peltier_state(),
            });
        }

        let report = CycleReport {
            cycle: self.cycles,
            tick_ms: now_ms,
            sample,
            state: self.state,
            alarms: decision.alarms,
        };
        debug!("cycle {} alarms=0b{:08b}", report.cycle, report.alarms.bits());
        sink.emit(&AppEvent::Cycle(report));
        report
    }

    // ── Queries ───────────────────────────────────────────────

    /// Currently commanded output state.
    pub fn state(&self) -> ActuatorState {
        self.state
    }

    /// Cycles executed since startup.
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Milliseconds until the next cycle is due.
    pub fn next_due_in_ms(&self, now_ms: u32) -> u32 {
        self.cadence.remaining_ms(now_ms)
    }
}
