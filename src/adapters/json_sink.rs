//! JSON-lines telemetry sink.
//!
//! Renders each [`CycleReport`] as one compact JSON object under the
//! `telemetry` log target, so a host-side collector can filter the serial
//! stream on that target and parse every line independently.  Other
//! events are left to [`LogEventSink`](super::log_sink::LogEventSink).

use log::{info, warn};

use crate::app::events::{AppEvent, CycleReport};
use crate::app::ports::EventSink;

/// Log target carrying telemetry lines.
pub const TELEMETRY_TARGET: &str = "telemetry";

#[derive(Debug, Default)]
pub struct JsonLineSink;

impl JsonLineSink {
    pub fn new() -> Self {
        Self
    }
}

/// Serialize one cycle report.
pub fn render(report: &CycleReport) -> Result<String, serde_json::Error> {
    serde_json::to_string(report)
}

impl EventSink for JsonLineSink {
    fn emit(&mut self, event: &AppEvent) {
        if let AppEvent::Cycle(report) = event {
            match render(report) {
                Ok(line) => info!(target: TELEMETRY_TARGET, "{}", line),
                Err(e) => warn!("telemetry encode failed (cycle {}): {}", report.cycle, e),
            }
        }
    }
}
