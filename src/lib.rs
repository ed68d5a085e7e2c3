//! Thermoreg firmware library.
//!
//! Hysteretic Peltier regulator with a drive-current interlock, a heatsink
//! cooler output, and advisory alarms.  Exposes the pure-logic modules for
//! integration testing on the host.  All ESP-IDF-specific code is guarded
//! by `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod pins;
pub mod scheduler;
pub mod status;

// Hardware-facing layers.  Their ESP-IDF bodies are cfg-gated inside;
// on the host they fall back to simulation stubs.
pub mod adapters;
pub mod drivers;
pub mod sensors;

#[cfg(target_os = "espidf")]
mod esp_link_shims;
