//! Thermoreg firmware, main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  HardwareAdapter     LogEventSink + JsonLineSink         │
//! │  (Sampler+Actuator)  (EventSink)         Esp32Clock      │
//! │                                                          │
//! │  ───────────────── Port Trait Boundary ─────────────     │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │          ControlLoop (pure logic)              │      │
//! │  │  Cadence · Regulator · Alarms                  │      │
//! │  └────────────────────────────────────────────────┘      │
//! │                                                          │
//! │  StatusBoard (last cycle snapshot) · Watchdog            │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::Result;
use log::{error, info};

use thermoreg::adapters::hardware::HardwareAdapter;
use thermoreg::adapters::json_sink::JsonLineSink;
use thermoreg::adapters::log_sink::LogEventSink;
use thermoreg::adapters::time::Esp32Clock;
use thermoreg::app::ports::ClockPort;
use thermoreg::app::service::ControlLoop;
use thermoreg::config::CONFIG;
use thermoreg::drivers::{hw_init, watchdog::Watchdog};
use thermoreg::pins;
use thermoreg::sensors::{current::CurrentSensor, dht11::Dht11, Sampler};
use thermoreg::status::STATUS;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Thermoreg v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    CONFIG
        .validate()
        .map_err(|e| anyhow::anyhow!("{}", thermoreg::error::Error::from(e)))?;

    // ── 3. Peripherals ────────────────────────────────────────
    // Outputs are driven LOW here, before anything else can run.
    if let Err(e) = hw_init::init_peripherals() {
        // Without GPIO the outputs stay at their reset level (off).  Halt
        // and let the watchdog reset us.
        error!("HAL init failed: {}, halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    let mut watchdog = Watchdog::for_config(&CONFIG);

    // ── 4. Adapters + control loop ────────────────────────────
    let sampler = Sampler::new(
        Dht11::new(pins::DHT_DATA_GPIO),
        CurrentSensor::new(pins::CURRENT_ADC_CHANNEL, CONFIG.current_sense),
    );
    let mut hw = HardwareAdapter::new(sampler);
    let mut sink = (LogEventSink::new(), JsonLineSink::new());
    let clock = Esp32Clock::new();

    let mut control = ControlLoop::new(CONFIG);
    control.start(&mut hw, &mut sink);

    // ── 5. Main loop ──────────────────────────────────────────
    let idle = Duration::from_millis(u64::from(CONFIG.idle_yield_ms));
    loop {
        let now = clock.now_ms();
        if let Some(report) = control.poll(now, &mut hw, &mut sink) {
            STATUS.publish(report);
        }
        watchdog.feed(control.cycles(), now);
        std::thread::sleep(idle);
    }
}

