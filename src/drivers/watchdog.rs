//! Task Watchdog Timer (TWDT) tied to control-loop progress.
//!
//! The TWDT alone only catches a main loop that stops spinning.  A loop
//! that keeps spinning while [`ControlLoop`] stops completing cycles (a
//! sensor read wedged, a cadence that never fires) would leave the Peltier
//! latched with no current interlock, so the watchdog is only fed while the
//! cycle counter keeps advancing.  Once it stalls for longer than the
//! timeout, feeding stops and the TWDT resets the chip.
//!
//! [`ControlLoop`]: crate::app::service::ControlLoop

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use log::{error, info};

use crate::config::SystemConfig;

/// Control cycles that may be missed before the chip is reset.
pub const STALL_CYCLES: u32 = 5;

/// TWDT timeout for a given cadence.
pub const fn timeout_ms(config: &SystemConfig) -> u32 {
    config.cycle_period_ms.saturating_mul(STALL_CYCLES)
}

pub struct Watchdog {
    timeout_ms: u32,
    last_cycle: u32,
    /// Tick at which `last_cycle` was first seen; `None` until the first feed.
    progress_at: Option<u32>,
    stalled: bool,
    #[cfg(target_os = "espidf")]
    subscribed: bool,
}

impl Watchdog {
    /// Configure the TWDT for `config`'s cadence and subscribe the calling
    /// task.
    pub fn for_config(config: &SystemConfig) -> Self {
        let timeout_ms = timeout_ms(config);

        #[cfg(target_os = "espidf")]
        let subscribed = unsafe {
            let cfg = esp_task_wdt_config_t {
                timeout_ms,
                idle_core_mask: 0,
                trigger_panic: true,
            };
            let ret = esp_task_wdt_reconfigure(&cfg);
            if ret != ESP_OK {
                log::warn!("TWDT reconfigure returned {} (may already be configured)", ret);
            }
            let ret = esp_task_wdt_add(core::ptr::null_mut());
            if ret != ESP_OK {
                log::warn!("Watchdog: failed to subscribe ({})", ret);
            }
            ret == ESP_OK
        };

        info!(
            "Watchdog: {} ms, reset after {} stalled cycles",
            timeout_ms, STALL_CYCLES
        );

        Self {
            timeout_ms,
            last_cycle: 0,
            progress_at: None,
            stalled: false,
            #[cfg(target_os = "espidf")]
            subscribed,
        }
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Record the control loop's completed-cycle count at `now_ms` and reset
    /// the TWDT unless the count has been stuck for longer than the timeout.
    ///
    /// Returns whether the TWDT was fed.
    pub fn feed(&mut self, cycles: u32, now_ms: u32) -> bool {
        match self.progress_at {
            Some(_) if cycles == self.last_cycle => {}
            _ => {
                self.last_cycle = cycles;
                self.progress_at = Some(now_ms);
                self.stalled = false;
            }
        }

        if self.cycle_overdue(now_ms) {
            if !self.stalled {
                error!(
                    "Watchdog: no control cycle since #{} for over {} ms, withholding feed",
                    self.last_cycle, self.timeout_ms
                );
                self.stalled = true;
            }
            return false;
        }

        #[cfg(target_os = "espidf")]
        if self.subscribed {
            unsafe {
                esp_task_wdt_reset();
            }
        }
        true
    }

    /// The cycle counter has not moved for longer than the timeout.
    pub fn cycle_overdue(&self, now_ms: u32) -> bool {
        self.progress_at
            .is_some_and(|at| now_ms.wrapping_sub(at) > self.timeout_ms)
    }
}
