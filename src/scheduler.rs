//! Periodic cycle gate.
//!
//! The control loop never sleeps for a whole cycle.  Instead it polls a
//! [`Cadence`] with the current millisecond tick and runs a cycle only
//! when the period has elapsed, leaving the loop free to do other
//! lightweight work (watchdog feed, yield) in between.
//!
//! ```text
//!  tick ──▶ Cadence::ready(now) ──yes──▶ Sampler → Regulator → Actuator/Reporter
//!                   │
//!                   └──no──▶ return immediately
//! ```
//!
//! Ticks are `u32` milliseconds and wrap after ~49.7 days; all comparisons
//! use wrapping subtraction so the rollover is transparent.

/// Fixed-period tick gate.
#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    period_ms: u32,
    /// Tick at which the last cycle ran; `None` until the first one.
    last_ms: Option<u32>,
}

impl Cadence {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            last_ms: None,
        }
    }

    /// Returns `true` (and arms the next period) when a cycle is due.
    /// The very first poll is always due.
    pub fn ready(&mut self, now_ms: u32) -> bool {
        let due = match self.last_ms {
            None => true,
            Some(last) => now_ms.wrapping_sub(last) >= self.period_ms,
        };
        if due {
            self.last_ms = Some(now_ms);
        }
        due
    }

    /// Milliseconds until the next cycle is due (0 if already due).
    pub fn remaining_ms(&self, now_ms: u32) -> u32 {
        match self.last_ms {
            None => 0,
            Some(last) => self.period_ms.saturating_sub(now_ms.wrapping_sub(last)),
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }
}
