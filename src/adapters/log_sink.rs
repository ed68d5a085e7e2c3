//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing the operator-facing status stream
//! to the ESP-IDF logger (UART / USB-CDC in production):
//!
//! - a banner with the target band and current window at start-up,
//! - one status line per cycle,
//! - one warning per alarm present in that cycle,
//! - a line on every Peltier transition.

use core::fmt::Write;

use heapless::String;
use log::{error, info, warn};

use crate::app::events::{AppEvent, CycleReport};
use crate::app::ports::EventSink;
use crate::config::SystemConfig;

/// Capacity of a rendered status line.
pub const STATUS_LINE_CAP: usize = 128;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

/// `T=16.0°C | I=6.5A | peltier=ON | cooler=OFF`; invalid readings print
/// as `ERR`.
pub fn format_status_line(report: &CycleReport) -> String<STATUS_LINE_CAP> {
    let mut line = String::new();
    // Two f32::MAX readings plus the output flags still fit.
    let _ = match report.sample.temperature_c {
        Some(t) => write!(line, "T={:.1}\u{00b0}C", t),
        None => write!(line, "T=ERR"),
    };
    let _ = match report.sample.current_a {
        Some(i) => write!(line, " | I={:.1}A", i),
        None => write!(line, " | I=ERR"),
    };
    let _ = write!(
        line,
        " | peltier={} | cooler={}",
        on_off(report.state.peltier_on),
        on_off(report.state.cooler_on),
    );
    line
}

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}

fn banner(config: &SystemConfig) {
    let t = &config.thresholds;
    info!("=== Peltier temperature regulator ===");
    info!("Target range: {:+.0}\u{00b0}C to {:+.0}\u{00b0}C (hysteresis {:.1}\u{00b0}C)",
        t.min_temp_c, t.max_temp_c, t.hysteresis_c);
    info!("Target current: {:.0}A-{:.0}A", t.min_current_a, t.max_current_a);
    info!("Cycle period: {} ms", config.cycle_period_ms);
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(config) => banner(config),
            AppEvent::Cycle(report) => {
                info!("{}", format_status_line(report));
                for alarm in report.alarms.iter() {
                    warn!("WARNING: {}", alarm);
                }
            }
            AppEvent::PeltierChanged { from, to } => {
                info!("PELTIER | {:?} -> {:?}", from, to);
            }
            AppEvent::ActuatorFault(e) => {
                error!("ACTUATOR | {}", e);
            }
        }
    }
}
